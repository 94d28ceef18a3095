//! Verification state reported by the status check.

use serde::{Deserialize, Serialize};

/// Whether an account has confirmed its email address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    NotVerified,
}

impl VerificationStatus {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationStatus::Verified)
    }

    /// Message returned to clients
    pub fn message(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "User is verified",
            VerificationStatus::NotVerified => "User is not verified",
        }
    }
}

impl From<bool> for VerificationStatus {
    fn from(is_verified: bool) -> Self {
        if is_verified {
            VerificationStatus::Verified
        } else {
            VerificationStatus::NotVerified
        }
    }
}
