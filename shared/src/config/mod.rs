//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Database connection, pool and storage backend selection
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Outbound email provider configuration
//! - `server` - HTTP server and CORS configuration

pub mod database;
pub mod environment;
pub mod mail;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use database::{DatabaseConfig, StoreBackend};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::{MailConfig, MailProvider, SmtpTls};
pub use server::{CorsConfig, ServerConfig};

/// Errors raised while validating configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(String),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },

    #[error("Not allowed in {environment}: {reason}")]
    NotAllowed { environment: Environment, reason: String },
}

/// Parse an optional setting
///
/// Unset or blank values yield `None`; a value that is set but does not
/// parse is an error rather than a silent fallback to the default.
pub(crate) fn parse_setting<T: std::str::FromStr>(
    key: &str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::Invalid {
                    key: key.to_string(),
                    value: raw,
                })
        }
        _ => Ok(None),
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Which account store backs the service
    #[serde(default)]
    pub store: StoreBackend,

    /// Outbound email configuration
    pub mail: MailConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            store: StoreBackend::default(),
            mail: MailConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 3000),
            database: DatabaseConfig::new("mysql://root@localhost:3306/account_verify_dev"),
            store: StoreBackend::Memory,
            mail: MailConfig::default(),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Every sub-configuration reads its own variables; logging defaults
    /// follow the detected environment and can be overridden with
    /// `LOG_LEVEL` / `LOG_FORMAT`. Fails when `STORE_BACKEND` or a mail
    /// setting is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        Ok(Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            store: StoreBackend::from_env()?,
            mail: MailConfig::from_env()?,
            cors: CorsConfig::from_env(environment),
            logging: LoggingConfig::from_env(environment),
        })
    }

    /// Check the configuration for settings that cannot work together
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mail.validate()?;

        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                key: "SERVER_PORT".to_string(),
                value: "0".to_string(),
            });
        }

        if self.environment.is_production() {
            if self.store == StoreBackend::Memory {
                return Err(ConfigError::NotAllowed {
                    environment: self.environment,
                    reason: "in-memory account store".to_string(),
                });
            }
            if self.mail.provider == MailProvider::Mock {
                return Err(ConfigError::NotAllowed {
                    environment: self.environment,
                    reason: "mock mail provider".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config_is_valid() {
        let config = AppConfig::development();
        assert!(config.validate().is_ok());
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.mail.provider, MailProvider::Mock);
    }

    #[test]
    fn test_production_rejects_mock_mailer() {
        let mut config = AppConfig::development();
        config.environment = Environment::Production;
        config.store = StoreBackend::MySql;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::NotAllowed { .. }));
        assert!(err.to_string().contains("mock mail provider"));
    }

    #[test]
    fn test_production_rejects_memory_store() {
        let mut config = AppConfig::development();
        config.environment = Environment::Production;
        config.mail.provider = MailProvider::Brevo;
        config.mail.brevo_api_key = Some("key".to_string());

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("in-memory account store"));
    }

    #[test]
    fn test_parse_setting() {
        assert_eq!(parse_setting::<u16>("SMTP_PORT", None), Ok(None));
        assert_eq!(parse_setting::<u16>("SMTP_PORT", Some("  ".to_string())), Ok(None));
        assert_eq!(parse_setting::<u16>("SMTP_PORT", Some("587".to_string())), Ok(Some(587)));
        assert_eq!(
            parse_setting::<u16>("SMTP_PORT", Some("five".to_string())),
            Err(ConfigError::Invalid {
                key: "SMTP_PORT".to_string(),
                value: "five".to_string(),
            })
        );
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = AppConfig::development();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
