//! Mail Service Module
//!
//! This module provides outbound email implementations used to deliver
//! verification tokens.
//!
//! ## Features
//!
//! - **Mail Service Trait**: Common interface for all providers
//! - **Mock Implementation**: Console output and an in-memory outbox for development
//! - **SMTP Support**: Any SMTP relay via lettre
//! - **Brevo Support**: Brevo transactional email API with retries
//! - **Security**: Email addresses are masked in logs

use async_trait::async_trait;

use av_core::services::verification::MailSender;
use av_shared::config::{MailConfig, MailProvider};

pub mod brevo;
pub mod mail_service;
pub mod mock;
pub mod smtp;

pub use brevo::{BrevoConfig, BrevoMailSender};
pub use mail_service::MailService;
pub use mock::{MockMailSender, OutboxMessage};
pub use smtp::{SmtpConfig, SmtpMailSender};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Mail transport chosen at startup from configuration
#[derive(Clone)]
pub enum ConfiguredMailSender {
    Mock(MockMailSender),
    Smtp(SmtpMailSender),
    Brevo(BrevoMailSender),
}

impl ConfiguredMailSender {
    fn inner(&self) -> &dyn MailService {
        match self {
            ConfiguredMailSender::Mock(s) => s,
            ConfiguredMailSender::Smtp(s) => s,
            ConfiguredMailSender::Brevo(s) => s,
        }
    }
}

#[async_trait]
impl MailService for ConfiguredMailSender {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        self.inner().send_mail(to, subject, body).await
    }

    fn provider_name(&self) -> &str {
        self.inner().provider_name()
    }
}

#[async_trait]
impl MailSender for ConfiguredMailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        self.send_mail(to, subject, body)
            .await
            .map_err(|e| e.to_string())
    }
}

/// Create a mail service based on configuration
///
/// # Arguments
///
/// * `config` - Mail configuration containing provider settings
pub fn create_mail_sender(config: &MailConfig) -> Result<ConfiguredMailSender, InfrastructureError> {
    let sender = match config.provider {
        MailProvider::Mock => ConfiguredMailSender::Mock(MockMailSender::new()),
        MailProvider::Smtp => {
            ConfiguredMailSender::Smtp(SmtpMailSender::new(SmtpConfig::from_mail_config(config)?)?)
        }
        MailProvider::Brevo => {
            ConfiguredMailSender::Brevo(BrevoMailSender::new(BrevoConfig::from_mail_config(config)?)?)
        }
    };

    tracing::info!(provider = sender.provider_name(), "Mail service created");
    Ok(sender)
}
