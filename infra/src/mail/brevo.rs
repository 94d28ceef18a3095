//! Brevo Mail Service Implementation
//!
//! Sends email through Brevo's transactional email HTTP API.
//!
//! ## Features
//!
//! - Retry with exponential backoff on rate limiting (429), server errors
//!   (5xx) and failed connection attempts
//! - No retry on other client errors or on transport errors once the
//!   request may have been sent

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use av_shared::config::MailConfig;
use av_shared::utils::validation::mask_email;

use super::mail_service::MailService;
use crate::InfrastructureError;

/// Production endpoint of the Brevo API
pub const BREVO_API_BASE_URL: &str = "https://api.brevo.com/v3";

/// Brevo API configuration
#[derive(Debug, Clone)]
pub struct BrevoConfig {
    /// API key sent in the `api-key` header
    pub api_key: String,
    /// Sender address
    pub from_address: String,
    /// API base URL
    pub base_url: String,
    /// Total attempts per message
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds
    pub retry_delay_ms: u64,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BrevoConfig {
    /// Extract Brevo settings from the mail configuration
    pub fn from_mail_config(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let api_key = config
            .brevo_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| InfrastructureError::Config("BREVO_API_KEY is required".to_string()))?;

        Ok(Self {
            api_key,
            from_address: config.from_address.clone(),
            base_url: BREVO_API_BASE_URL.to_string(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
            timeout_secs: config.timeout_secs,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoEmailAddress<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendEmailBody<'a> {
    sender: BrevoEmailAddress<'a>,
    to: Vec<BrevoEmailAddress<'a>>,
    subject: &'a str,
    text_content: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendEmailResponse {
    message_id: String,
}

/// Whether a failed request is worth sending again
pub(crate) fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Brevo mail service
#[derive(Clone)]
pub struct BrevoMailSender {
    client: Client,
    config: BrevoConfig,
}

impl BrevoMailSender {
    /// Create a new Brevo mail service
    pub fn new(config: BrevoConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!(from = %config.from_address, "Brevo mail service configured");

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/smtp/email", self.config.base_url.trim_end_matches('/'))
    }

    /// Send with retry logic
    async fn send_with_retry(
        &self,
        payload: &BrevoSendEmailBody<'_>,
        to: &str,
    ) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending email attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_email(to)
            );

            let outcome = self
                .client
                .post(self.endpoint())
                .header("api-key", &self.config.api_key)
                .header("accept", "application/json")
                .json(payload)
                .send()
                .await;

            let failure = match outcome {
                Ok(response) if response.status().is_success() => {
                    let body: BrevoSendEmailResponse = response.json().await?;
                    info!(
                        target: "mail_service",
                        provider = "brevo",
                        to = %mask_email(to),
                        message_id = %body.message_id,
                        "Email accepted by Brevo"
                    );
                    return Ok(body.message_id);
                }
                Ok(response) => {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_default();
                    if !is_retryable_status(status) {
                        error!(status = %status, "Brevo rejected the request");
                        return Err(InfrastructureError::Mail(format!(
                            "Brevo rejected request ({}): {}",
                            status, text
                        )));
                    }
                    format!("status {}: {}", status, text)
                }
                Err(e) if e.is_connect() => e.to_string(),
                Err(e) => {
                    // The request may have reached Brevo; a resend could deliver twice
                    error!(error = %e, "Brevo request failed after connecting");
                    return Err(InfrastructureError::Http(e));
                }
            };

            error!(
                "Failed to send email (attempt {}/{}): {}",
                attempts, self.config.max_retries, failure
            );

            if attempts >= self.config.max_retries {
                return Err(InfrastructureError::Mail(format!(
                    "Failed to send email after {} attempts: {}",
                    attempts, failure
                )));
            }

            warn!("Retrying Brevo request after {:?}", delay);
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl MailService for BrevoMailSender {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        let payload = BrevoSendEmailBody {
            sender: BrevoEmailAddress {
                email: &self.config.from_address,
            },
            to: vec![BrevoEmailAddress { email: to }],
            subject,
            text_content: body,
        };

        self.send_with_retry(&payload, to).await
    }

    fn provider_name(&self) -> &str {
        "Brevo"
    }
}
