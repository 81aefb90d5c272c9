pub mod loaders;
pub mod local;
pub mod secret;

use std::path::PathBuf;

use tracing::{debug, info};

pub use loaders::{AwsSecretStore, AwsSecretStoreConfig, SecretStore, StaticSecretStore};
pub use local::LocalSettings;
pub use secret::DbSecret;

use crate::error::ConfigError;

pub const ENV_PREFIX: &str = "VTT";
pub const SECRET_ID: &str = "/Servian/TechChallengeApp/RDS";
pub const SECRET_REGION: &str = "ap-southeast-2";
pub const SECRET_VERSION_STAGE: &str = "AWSCURRENT";

#[async_trait::async_trait]
pub trait Configs: Sized {
    async fn load() -> Result<Self, ConfigError>;
}

/// Settings handed to the web service at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_host: String,
    pub db_port: String,
    pub listen_host: String,
    pub listen_port: String,
}

impl Configuration {
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.listen_host, self.listen_port)
    }

    /// libpq keyword/value connection string for the database.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode=disable",
            self.db_host, self.db_port, self.db_user, self.db_password, self.db_name
        )
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_name", &self.db_name)
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("listen_host", &self.listen_host)
            .field("listen_port", &self.listen_port)
            .finish()
    }
}

#[async_trait::async_trait]
impl Configs for Configuration {
    async fn load() -> Result<Self, ConfigError> {
        let store = AwsSecretStore::new(AwsSecretStoreConfig::from_env(SECRET_REGION)).await;
        ConfigLoader::new(store).load().await
    }
}

/// Merges local settings with database credentials from a [`SecretStore`].
///
/// Every call to [`ConfigLoader::load`] re-reads the file and environment and
/// performs one secret lookup; nothing is cached.
#[derive(Debug)]
pub struct ConfigLoader<S> {
    config_dir: PathBuf,
    env_prefix: String,
    secret_id: String,
    secret_store: S,
}

impl<S: SecretStore> ConfigLoader<S> {
    pub fn new(secret_store: S) -> Self {
        Self {
            config_dir: PathBuf::from("."),
            env_prefix: ENV_PREFIX.to_string(),
            secret_id: SECRET_ID.to_string(),
            secret_store,
        }
    }

    pub fn with_config_dir(mut self, config_dir: impl Into<PathBuf>) -> Self {
        self.config_dir = config_dir.into();
        self
    }

    pub fn with_env_prefix(mut self, env_prefix: impl Into<String>) -> Self {
        self.env_prefix = env_prefix.into();
        self
    }

    pub fn with_secret_id(mut self, secret_id: impl Into<String>) -> Self {
        self.secret_id = secret_id.into();
        self
    }

    pub async fn load(&self) -> Result<Configuration, ConfigError> {
        let local = LocalSettings::read(&self.config_dir, &self.env_prefix)?;

        let payload = self
            .secret_store
            .secret_string(&self.secret_id, SECRET_VERSION_STAGE)
            .await?;
        let secret = DbSecret::from_json(&payload)?;
        debug!(secret_id = self.secret_id.as_str(), "Decoded database secret");

        let config = Configuration {
            db_port: secret.port_text(),
            db_user: secret.username,
            db_password: secret.password,
            db_name: secret.dbname,
            db_host: secret.host,
            listen_host: local.listen_host.trim().to_string(),
            listen_port: local.listen_port.trim().to_string(),
        };
        info!(
            listen_address = config.listen_address().as_str(),
            db_host = config.db_host.as_str(),
            "Configuration loaded"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SecretFetchKind;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    const SECRET: &str =
        r#"{"username":"app","password":"pw","dbname":"app_db","host":"db.local","port":5432}"#;

    fn conf_dir(contents: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("conf.toml"), contents).unwrap();
        dir
    }

    #[tokio::test]
    #[serial]
    async fn test_listen_fields_are_trimmed() {
        let dir = conf_dir("ListenHost = \" 127.0.0.1 \"\nListenPort = \" 3000\"\n");
        let config = ConfigLoader::new(StaticSecretStore::new(SECRET))
            .with_config_dir(dir.path())
            .with_env_prefix("SCMODTRIM")
            .load()
            .await
            .unwrap();

        assert_eq!(config.listen_host, "127.0.0.1");
        assert_eq!(config.listen_port, "3000");
    }

    #[tokio::test]
    #[serial]
    async fn test_fetch_error_is_returned() {
        let dir = conf_dir("");
        let err = ConfigLoader::new(StaticSecretStore::empty())
            .with_config_dir(dir.path())
            .with_env_prefix("SCMODFETCH")
            .load()
            .await
            .unwrap_err();

        assert_eq!(err.secret_fetch_kind(), Some(SecretFetchKind::ResourceNotFound));
    }

    #[test]
    fn test_new_uses_fixed_inputs() {
        let loader = ConfigLoader::new(StaticSecretStore::empty());
        assert_eq!(loader.config_dir, PathBuf::from("."));
        assert_eq!(loader.env_prefix, "VTT");
        assert_eq!(loader.secret_id, "/Servian/TechChallengeApp/RDS");
    }

    #[tokio::test]
    #[serial]
    async fn test_default_secret_id_is_requested() {
        let dir = conf_dir("");
        let err = ConfigLoader::new(StaticSecretStore::empty())
            .with_config_dir(dir.path())
            .with_env_prefix("SCMODDEFID")
            .load()
            .await
            .unwrap_err();

        assert!(err.to_string().contains("/Servian/TechChallengeApp/RDS"));
    }

    #[tokio::test]
    #[serial]
    async fn test_secret_id_is_forwarded() {
        let dir = conf_dir("");
        let err = ConfigLoader::new(StaticSecretStore::empty())
            .with_config_dir(dir.path())
            .with_env_prefix("SCMODID")
            .with_secret_id("custom/secret")
            .load()
            .await
            .unwrap_err();

        assert!(err.to_string().contains("custom/secret"));
    }

    #[test]
    fn test_derived_strings() {
        let config = Configuration {
            db_user: "app".into(),
            db_password: "pw".into(),
            db_name: "app_db".into(),
            db_host: "db.local".into(),
            db_port: "5432".into(),
            listen_host: "0.0.0.0".into(),
            listen_port: "3000".into(),
        };

        assert_eq!(config.listen_address(), "0.0.0.0:3000");
        assert_eq!(
            config.connection_string(),
            "host=db.local port=5432 user=app password=pw dbname=app_db sslmode=disable"
        );
        let debug = format!("{:?}", config);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("password: \"pw\""));
    }
}
