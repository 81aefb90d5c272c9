use std::fmt;

/// Category of a failed secret store request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretFetchKind {
    /// The secret could not be decrypted with its KMS key.
    DecryptionFailure,
    InternalServiceError,
    InvalidParameter,
    /// The parameters are valid but not for the current state of the secret.
    InvalidRequest,
    ResourceNotFound,
    /// Transport, credential or unmodelled service failures.
    Other,
}

impl fmt::Display for SecretFetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecryptionFailure => write!(f, "decryption failure"),
            Self::InternalServiceError => write!(f, "internal service error"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::InvalidRequest => write!(f, "invalid request"),
            Self::ResourceNotFound => write!(f, "resource not found"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The local configuration file is missing, unreadable or malformed.
    ConfigFile(String),
    SecretFetch {
        kind: SecretFetchKind,
        message: String,
    },
    /// The secret payload does not have the expected keys and types.
    SecretShape(String),
}

impl ConfigError {
    pub fn secret_fetch(kind: SecretFetchKind, message: impl Into<String>) -> Self {
        Self::SecretFetch {
            kind,
            message: message.into(),
        }
    }

    pub fn secret_fetch_kind(&self) -> Option<SecretFetchKind> {
        match self {
            Self::SecretFetch { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigFile(msg) => write!(f, "Config file error: {}", msg),
            Self::SecretFetch { kind, message } => {
                write!(f, "Secret fetch failed ({}): {}", kind, message)
            }
            Self::SecretShape(msg) => write!(f, "Unexpected secret shape: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigFile(err.to_string())
    }
}
