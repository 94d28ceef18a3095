//! Mail Service Interface
//!
//! Defines the trait for outbound email implementations and the helpers
//! they share.

use async_trait::async_trait;
use crate::InfrastructureError;

/// Mail service trait for sending plain-text email
///
/// Implementations include:
/// - SMTP (lettre)
/// - Brevo transactional email API
/// - Mock implementation for development
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send a plain-text email
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier of the accepted message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}

/// Domain part of an address, used to build message ids
pub fn address_domain(address: &str) -> &str {
    address
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
        .unwrap_or("localhost")
}
