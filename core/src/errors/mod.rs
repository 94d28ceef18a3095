//! Domain-specific error types and error handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// The account field a uniqueness constraint applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityField {
    Username,
    Email,
}

impl IdentityField {
    /// Column / field name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityField::Username => "username",
            IdentityField::Email => "email",
        }
    }

    /// Capitalized name for user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            IdentityField::Username => "Username",
            IdentityField::Email => "Email",
        }
    }
}

impl std::fmt::Display for IdentityField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core domain errors
///
/// Every variant except `Unavailable` and `Internal` is a client error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username or email is already taken
    #[error("{} already exists", .field.label())]
    DuplicateIdentity { field: IdentityField },

    /// The verification email could not be delivered
    #[error("Failed to send verification email")]
    DeliveryFailure { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Invalid verification token")]
    InvalidToken,

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A collaborator (database, network) could not be reached
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Shorthand for the "User not found" error every lookup returns
    pub fn user_not_found() -> Self {
        DomainError::NotFound {
            resource: "User".to_string(),
        }
    }

    /// Whether the caller sent something wrong, as opposed to the server failing
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            DomainError::Unavailable { .. } | DomainError::Internal { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
