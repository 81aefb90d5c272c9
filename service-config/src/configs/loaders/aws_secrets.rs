use aws_config::{self, BehaviorVersion};
use aws_sdk_secretsmanager::{
    Client, error::DisplayErrorContext, operation::get_secret_value::GetSecretValueError,
};
use aws_types::region::Region;
use tracing::{debug, error};

use crate::error::{ConfigError, SecretFetchKind};

use super::{SecretStore, environment::{first_env, optional_env}};

#[derive(Debug, Clone)]
pub struct AwsSecretStoreConfig {
    pub region: String,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

impl AwsSecretStoreConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            profile: None,
            endpoint_url: None,
        }
    }

    /// Picks up `AWS_PROFILE` and an endpoint override from the environment.
    pub fn from_env(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            profile: optional_env("AWS_PROFILE"),
            endpoint_url: first_env(&["SECRETSMANAGER_ENDPOINT", "AWS_ENDPOINT"]),
        }
    }
}

#[derive(Clone)]
pub struct AwsSecretStore {
    client: Client,
}

impl AwsSecretStore {
    pub async fn new(config: AwsSecretStoreConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region));

        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }

        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url.clone());
        }

        let shared_config = loader.load().await;
        Self::with_client(Client::new(&shared_config))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for AwsSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretStore")
            .field("region", &self.client.config().region())
            .finish()
    }
}

pub fn classify(err: &GetSecretValueError) -> SecretFetchKind {
    match err {
        GetSecretValueError::DecryptionFailure(_) => SecretFetchKind::DecryptionFailure,
        GetSecretValueError::InternalServiceError(_) => SecretFetchKind::InternalServiceError,
        GetSecretValueError::InvalidParameterException(_) => SecretFetchKind::InvalidParameter,
        GetSecretValueError::InvalidRequestException(_) => SecretFetchKind::InvalidRequest,
        GetSecretValueError::ResourceNotFoundException(_) => SecretFetchKind::ResourceNotFound,
        _ => SecretFetchKind::Other,
    }
}

#[async_trait::async_trait]
impl SecretStore for AwsSecretStore {
    async fn secret_string(
        &self,
        secret_id: &str,
        version_stage: &str,
    ) -> Result<String, ConfigError> {
        debug!(secret_id, version_stage, "Requesting secret from AWS Secrets Manager");

        let result = match self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .version_stage(version_stage)
            .send()
            .await
        {
            Ok(result) => result,
            Err(err) => {
                let message = DisplayErrorContext(&err).to_string();
                let kind = classify(&err.into_service_error());
                error!(secret_id, %kind, "Failed to get secret: {}", message);
                return Err(ConfigError::secret_fetch(
                    kind,
                    format!("Failed to get secret '{secret_id}': {message}"),
                ));
            }
        };

        result
            .secret_string()
            .map(|s| s.to_string())
            .ok_or_else(|| ConfigError::SecretShape(format!("Secret '{secret_id}' has no string value")))
    }
}
