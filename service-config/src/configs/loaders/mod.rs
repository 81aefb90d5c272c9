pub mod aws_secrets;
pub mod environment;
pub mod file;
pub mod string;

use crate::error::ConfigError;

pub use aws_secrets::{AwsSecretStore, AwsSecretStoreConfig};
pub use string::StaticSecretStore;

/// Source of the secret payload holding the database credentials.
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync {
    /// Returns the string payload of `secret_id` at `version_stage`.
    async fn secret_string(
        &self,
        secret_id: &str,
        version_stage: &str,
    ) -> Result<String, ConfigError>;
}

#[async_trait::async_trait]
impl<S: SecretStore + ?Sized> SecretStore for Box<S> {
    async fn secret_string(
        &self,
        secret_id: &str,
        version_stage: &str,
    ) -> Result<String, ConfigError> {
        (**self).secret_string(secret_id, version_stage).await
    }
}
