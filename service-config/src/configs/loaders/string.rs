use std::{fs, path::Path};

use crate::error::{ConfigError, SecretFetchKind};

use super::SecretStore;

/// Serves one fixed payload for every secret id. Used for local runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSecretStore {
    payload: Option<String>,
}

impl StaticSecretStore {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    /// A store that holds no secrets; every lookup fails as not found.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let payload = fs::read_to_string(path).map_err(|e| {
            ConfigError::secret_fetch(
                SecretFetchKind::Other,
                format!("Failed to read secret file '{}': {}", path.display(), e),
            )
        })?;
        Ok(Self::new(payload))
    }
}

#[async_trait::async_trait]
impl SecretStore for StaticSecretStore {
    async fn secret_string(
        &self,
        secret_id: &str,
        _version_stage: &str,
    ) -> Result<String, ConfigError> {
        self.payload.clone().ok_or_else(|| {
            ConfigError::secret_fetch(
                SecretFetchKind::ResourceNotFound,
                format!("Secret '{secret_id}' not found"),
            )
        })
    }
}
