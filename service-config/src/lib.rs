pub mod configs;
pub mod error;

pub use configs::{ConfigLoader, Configs, Configuration};
pub use error::{ConfigError, SecretFetchKind};
