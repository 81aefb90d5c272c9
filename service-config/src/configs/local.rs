use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use super::loaders::file;
use crate::error::ConfigError;

const DB_USER: &str = "dbuser";
const DB_PASSWORD: &str = "dbpassword";
const DB_NAME: &str = "dbname";
const DB_HOST: &str = "dbhost";
const DB_PORT: &str = "dbport";
const LISTEN_HOST: &str = "listenhost";
const LISTEN_PORT: &str = "listenport";

// DbPort keeps the historical placeholder; the effective port always comes from the secret.
const DEFAULTS: [(&str, &str); 7] = [
    (DB_USER, "postgres"),
    (DB_PASSWORD, "postgres"),
    (DB_NAME, "postgres"),
    (DB_PORT, "postgres"),
    (DB_HOST, "localhost"),
    (LISTEN_HOST, "127.0.0.1"),
    (LISTEN_PORT, "3000"),
];

/// Settings merged from defaults, the local `conf` file and `<PREFIX>_<KEY>`
/// environment variables, in increasing order of precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSettings {
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_host: String,
    pub db_port: String,
    pub listen_host: String,
    pub listen_port: String,
}

impl LocalSettings {
    /// Reads the `conf` file from `dir`. A missing or malformed file is an error.
    pub fn read(dir: &Path, env_prefix: &str) -> Result<Self, ConfigError> {
        let path = file::find_config_file(dir)?;
        let contents = file::load(&path)?;
        let normalized = lowercase_keys(&contents).map_err(|e| {
            ConfigError::ConfigFile(format!("Failed to parse '{}': {}", path.display(), e))
        })?;
        debug!("Loaded local config from {:?}", path);

        let mut builder = Config::builder();
        for (key, value) in DEFAULTS {
            builder = builder.set_default(key, value)?;
        }

        let settings = builder
            .add_source(File::from_str(&normalized, FileFormat::Toml))
            .add_source(Environment::with_prefix(env_prefix).ignore_empty(true))
            .build()?;

        Ok(Self {
            db_user: settings.get_string(DB_USER)?,
            db_password: settings.get_string(DB_PASSWORD)?,
            db_name: settings.get_string(DB_NAME)?,
            db_host: settings.get_string(DB_HOST)?,
            db_port: settings.get_string(DB_PORT)?,
            listen_host: settings.get_string(LISTEN_HOST)?,
            listen_port: settings.get_string(LISTEN_PORT)?,
        })
    }
}

/// Lower-cases the top-level keys so `ListenHost`, `listenhost` and
/// `LISTENHOST` all land on the same setting.
fn lowercase_keys(contents: &str) -> Result<String, String> {
    let table = contents
        .parse::<toml::Table>()
        .map_err(|e| e.to_string())?;
    let lowered: toml::Table = table
        .into_iter()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect();
    toml::to_string(&lowered).map_err(|e| e.to_string())
}
