use serde_derive::Deserialize;
use serde_json::Number;

use crate::error::ConfigError;

/// Database credentials as stored in the secret payload.
#[derive(Clone, Deserialize)]
pub struct DbSecret {
    pub username: String,
    pub password: String,
    pub dbname: String,
    pub host: String,
    pub port: Number,
}

impl DbSecret {
    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(payload).map_err(|e| ConfigError::SecretShape(e.to_string()))
    }

    /// The port as decimal text; integral values have no fractional part.
    pub fn port_text(&self) -> String {
        render_number(&self.port)
    }
}

impl std::fmt::Debug for DbSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSecret")
            .field("username", &self.username)
            .field("dbname", &self.dbname)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

fn render_number(number: &Number) -> String {
    if number.is_u64() || number.is_i64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < 1e15 => format!("{}", value as i64),
        Some(value) => value.to_string(),
        None => number.to_string(),
    }
}
