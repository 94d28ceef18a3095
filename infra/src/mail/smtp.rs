//! SMTP Mail Service Implementation
//!
//! Sends email through an SMTP relay using lettre's async transport.
//!
//! ## Features
//!
//! - Implicit TLS (SMTPS, usually port 465), STARTTLS, or plaintext
//! - Optional username/password authentication
//! - Message ids generated locally so they can be logged and returned

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::{debug, error, info};
use uuid::Uuid;

use av_shared::config::{MailConfig, SmtpTls};
use av_shared::utils::validation::mask_email;

use super::mail_service::{address_domain, MailService};
use crate::InfrastructureError;

/// SMTP connection settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub tls: SmtpTls,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address
    pub from_address: String,
    /// Per-command timeout in seconds
    pub timeout_secs: u64,
}

impl SmtpConfig {
    /// Extract SMTP settings from the mail configuration
    pub fn from_mail_config(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let host = config
            .smtp_host
            .clone()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| InfrastructureError::Config("SMTP_HOST is required".to_string()))?;

        Ok(Self {
            host,
            port: config.smtp_port,
            tls: config.smtp_tls,
            username: config.smtp_username.clone(),
            password: config.smtp_password.clone(),
            from_address: config.from_address.clone(),
            timeout_secs: config.timeout_secs,
        })
    }
}

/// SMTP mail service
#[derive(Clone)]
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    config: SmtpConfig,
}

impl SmtpMailSender {
    /// Build the transport; no connection is opened until the first send
    pub fn new(config: SmtpConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = config.from_address.parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid sender address: {}", e))
        })?;

        let builder = match config.tls {
            SmtpTls::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host),
            SmtpTls::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host),
            SmtpTls::None => Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(
                &config.host,
            )),
        }
        .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay: {}", e)))?;

        let mut builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(
            host = %config.host,
            port = config.port,
            tls = ?config.tls,
            "SMTP mail service configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
            config,
        })
    }

    pub fn config(&self) -> &SmtpConfig {
        &self.config
    }

    fn build_message(
        &self,
        message_id: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<Message, InfrastructureError> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| InfrastructureError::Mail(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .message_id(Some(message_id.to_string()))
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| InfrastructureError::Mail(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl MailService for SmtpMailSender {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        let message_id = format!(
            "<{}@{}>",
            Uuid::new_v4(),
            address_domain(&self.config.from_address)
        );
        let message = self.build_message(&message_id, to, subject, body)?;

        debug!(to = %mask_email(to), "Sending email via SMTP");

        match self.transport.send(message).await {
            Ok(response) => {
                info!(
                    target: "mail_service",
                    provider = "smtp",
                    to = %mask_email(to),
                    message_id = %message_id,
                    code = %response.code(),
                    "Email accepted by SMTP relay"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(
                    provider = "smtp",
                    to = %mask_email(to),
                    error = %e,
                    "Failed to send email via SMTP"
                );
                Err(InfrastructureError::Mail(format!("SMTP send failed: {}", e)))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }
}
