//! Types for verification service results

use crate::domain::entities::account::Account;

/// Result of a successful registration
#[derive(Debug, Clone)]
pub struct RegistrationResult {
    /// The account that was created
    pub account: Account,
    /// Message id reported by the mail provider
    pub message_id: String,
}

impl RegistrationResult {
    pub const MESSAGE: &'static str = "User registered successfully";

    pub fn message(&self) -> &'static str {
        Self::MESSAGE
    }
}

/// Result of a successful email verification
#[derive(Debug, Clone)]
pub struct VerificationResult {
    /// The account after verification
    pub account: Account,
    /// The account was verified before this call; nothing was written
    pub already_verified: bool,
}

impl VerificationResult {
    pub const MESSAGE: &'static str = "Email verified successfully";

    pub fn message(&self) -> &'static str {
        Self::MESSAGE
    }
}
