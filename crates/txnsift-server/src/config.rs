//! Environment configuration for the webhook server.
//!
//! All settings are loaded once at process start and never mutated.
//! Credentials come from the environment; components receive them by
//! explicit injection rather than reading ambient globals.

use std::env;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// An environment variable holds an unusable value
    #[error("Invalid value for {name}: {value}")]
    InvalidVar {
        /// Variable name
        name: String,
        /// The offending value
        value: String,
    },
}

/// Server configuration loaded from the environment
///
/// | Variable | Required | Default |
/// |---|---|---|
/// | `OPENAI_API_KEY` | yes | — |
/// | `AIRTABLE_API_KEY` | yes | — |
/// | `AIRTABLE_BASE_ID` | yes | — |
/// | `AIRTABLE_TABLE_NAME` | yes | — |
/// | `BIND_ADDRESS` | no | `0.0.0.0` |
/// | `BIND_PORT` | no | `8080` |
/// | `NOTIFICATIONS_ENABLED` | no | `true` |
/// | `OPENAI_MODEL` | no | provider default |
/// | `TRAILER_MARKER` | no | none |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g. "0.0.0.0")
    pub bind_address: String,

    /// Bind port
    pub bind_port: u16,

    /// OpenAI API key
    pub openai_api_key: String,

    /// Completion model override; `None` uses the provider default
    pub openai_model: Option<String>,

    /// Airtable API key
    pub airtable_api_key: String,

    /// Airtable base identifier
    pub airtable_base_id: String,

    /// Airtable table name
    pub airtable_table_name: String,

    /// Whether push notifications are delivered (off in development)
    pub notifications_enabled: bool,

    /// Boilerplate trailer marker stripped from alert bodies, if any
    pub trailer_marker: Option<String>,
}

impl ServerConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_port = match optional_var("BIND_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "BIND_PORT".to_string(),
                value: raw,
            })?,
            None => 8080,
        };

        let notifications_enabled = match optional_var("NOTIFICATIONS_ENABLED") {
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidVar {
                        name: "NOTIFICATIONS_ENABLED".to_string(),
                        value: raw,
                    })
                }
            },
            None => true,
        };

        Ok(Self {
            bind_address: optional_var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0".to_string()),
            bind_port,
            openai_api_key: required_var("OPENAI_API_KEY")?,
            openai_model: optional_var("OPENAI_MODEL"),
            airtable_api_key: required_var("AIRTABLE_API_KEY")?,
            airtable_base_id: required_var("AIRTABLE_BASE_ID")?,
            airtable_table_name: required_var("AIRTABLE_TABLE_NAME")?,
            notifications_enabled,
            trailer_marker: optional_var("TRAILER_MARKER"),
        })
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    optional_var(name).ok_or_else(|| ConfigError::MissingVar(name.to_string()))
}

fn optional_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            openai_api_key: "sk-test".to_string(),
            openai_model: None,
            airtable_api_key: "key-test".to_string(),
            airtable_base_id: "appBase123".to_string(),
            airtable_table_name: "Transactions".to_string(),
            notifications_enabled: true,
            trailer_marker: None,
        }
    }

    #[test]
    fn test_bind_addr() {
        assert_eq!(test_config().bind_addr(), "127.0.0.1:8080");
    }

    // Environment-variable reads are not exercised here: tests run in
    // parallel and process-global env mutation races across threads.
    #[test]
    fn test_missing_var_error_names_variable() {
        let err = ConfigError::MissingVar("OPENAI_API_KEY".to_string());
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
