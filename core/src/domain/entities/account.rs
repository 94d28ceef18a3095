//! Account entity representing a registered identity awaiting or holding email verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{VerificationStatus, VerificationToken};
use crate::errors::IdentityField;

/// Field an account can be looked up by
pub type AccountField = IdentityField;

/// Account entity
///
/// `username` and `email` are unique and never change after creation.
/// `verification_token` is assigned once, in [`Account::new`], and
/// `is_verified` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Unique user name
    pub username: String,

    /// Unique email address the token is sent to
    pub email: String,

    /// Token the user must present to verify the email address
    pub verification_token: VerificationToken,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp when the email address was verified
    pub verified_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a new, unverified account
    pub fn new(username: String, email: String, verification_token: VerificationToken) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            verification_token,
            is_verified: false,
            created_at: now,
            updated_at: now,
            verified_at: None,
        }
    }

    /// Value of a lookup field
    pub fn field(&self, field: AccountField) -> &str {
        match field {
            AccountField::Username => &self.username,
            AccountField::Email => &self.email,
        }
    }

    /// Marks the email address as verified
    ///
    /// Returns `false` when the account was already verified; the original
    /// verification timestamp is kept in that case.
    pub fn verify(&mut self) -> bool {
        if self.is_verified {
            return false;
        }
        let now = Utc::now();
        self.is_verified = true;
        self.verified_at = Some(now);
        self.updated_at = now;
        true
    }

    pub fn status(&self) -> VerificationStatus {
        VerificationStatus::from(self.is_verified)
    }
}
