//! Traits for outbound mail integration

use async_trait::async_trait;

/// Trait for email delivery
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Send one plain-text message
    ///
    /// Returns the provider's message id on success, or a description of
    /// the failure.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String>;
}
