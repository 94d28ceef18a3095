//! Outbound email configuration module

use serde::{Deserialize, Serialize};

use super::{parse_setting, ConfigError};

/// Email delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Log messages instead of delivering them
    #[default]
    Mock,
    /// Deliver through an SMTP relay
    Smtp,
    /// Deliver through the Brevo transactional email API
    Brevo,
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(MailProvider::Mock),
            "smtp" => Ok(MailProvider::Smtp),
            "brevo" => Ok(MailProvider::Brevo),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

/// How the SMTP connection is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTls {
    /// TLS from the first byte (SMTPS, usually port 465)
    #[default]
    Implicit,
    /// Plain connection upgraded with STARTTLS (usually port 587)
    StartTls,
    /// Unencrypted, only for local relays and test servers
    None,
}

impl std::str::FromStr for SmtpTls {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "implicit" | "tls" | "smtps" => Ok(SmtpTls::Implicit),
            "starttls" => Ok(SmtpTls::StartTls),
            "none" | "plain" => Ok(SmtpTls::None),
            _ => Err(format!("Invalid SMTP TLS mode: {}", s)),
        }
    }
}

/// Mail delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Delivery provider
    pub provider: MailProvider,

    /// Sender address, optionally with display name ("App <no-reply@app.io>")
    pub from_address: String,

    /// SMTP relay host
    #[serde(default)]
    pub smtp_host: Option<String>,

    /// SMTP relay port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP user name
    #[serde(default)]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[serde(default, skip_serializing)]
    pub smtp_password: Option<String>,

    /// SMTP transport security
    #[serde(default)]
    pub smtp_tls: SmtpTls,

    /// Brevo API key
    #[serde(default, skip_serializing)]
    pub brevo_api_key: Option<String>,

    /// Maximum delivery attempts for HTTP providers
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Mock,
            from_address: String::from("no-reply@localhost"),
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            smtp_tls: SmtpTls::default(),
            brevo_api_key: None,
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup
    ///
    /// Unset variables take their defaults; a variable that is set to a
    /// value that does not parse yields `ConfigError::Invalid`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            provider: parse_setting("MAIL_PROVIDER", lookup("MAIL_PROVIDER"))?
                .unwrap_or_default(),
            from_address: text("MAIL_FROM").unwrap_or(defaults.from_address),
            smtp_host: text("SMTP_HOST"),
            smtp_port: parse_setting("SMTP_PORT", lookup("SMTP_PORT"))?
                .unwrap_or(defaults.smtp_port),
            smtp_username: text("SMTP_USERNAME"),
            smtp_password: text("SMTP_PASSWORD"),
            smtp_tls: parse_setting("SMTP_TLS", lookup("SMTP_TLS"))?.unwrap_or_default(),
            brevo_api_key: text("BREVO_API_KEY"),
            max_retries: parse_setting("MAIL_MAX_RETRIES", lookup("MAIL_MAX_RETRIES"))?
                .unwrap_or(defaults.max_retries),
            retry_delay_ms: parse_setting("MAIL_RETRY_DELAY_MS", lookup("MAIL_RETRY_DELAY_MS"))?
                .unwrap_or(defaults.retry_delay_ms),
            timeout_secs: parse_setting("MAIL_TIMEOUT_SECS", lookup("MAIL_TIMEOUT_SECS"))?
                .unwrap_or(defaults.timeout_secs),
        })
    }

    /// Check that the selected provider has what it needs
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.from_address.trim().is_empty() {
            return Err(ConfigError::Missing("MAIL_FROM".to_string()));
        }

        match self.provider {
            MailProvider::Mock => Ok(()),
            MailProvider::Smtp => {
                if self.smtp_host.is_none() {
                    return Err(ConfigError::Missing("SMTP_HOST".to_string()));
                }
                if self.smtp_username.is_some() != self.smtp_password.is_some() {
                    return Err(ConfigError::Missing(
                        "SMTP_USERNAME and SMTP_PASSWORD must be set together".to_string(),
                    ));
                }
                Ok(())
            }
            MailProvider::Brevo => {
                if self.brevo_api_key.is_none() {
                    return Err(ConfigError::Missing("BREVO_API_KEY".to_string()));
                }
                Ok(())
            }
        }
    }
}

fn default_smtp_port() -> u16 {
    465
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}
