//! Configuration for the verification service

use crate::domain::value_objects::DEFAULT_TOKEN_BYTES;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Random bytes per token (hex-encoded, so the token is twice as long)
    pub token_bytes: usize,
    /// Subject line of the verification email
    pub email_subject: String,
    /// Delete the new account when its verification email cannot be sent
    pub rollback_on_delivery_failure: bool,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            token_bytes: DEFAULT_TOKEN_BYTES,
            email_subject: "Email Verification".to_string(),
            rollback_on_delivery_failure: true,
        }
    }
}
