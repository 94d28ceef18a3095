//! Account registration and email verification
//!
//! This module provides the registration workflow:
//! - Token generation and account creation through the record store
//! - Delivery of the token through a mail sender
//! - Token confirmation and status lookup

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::AccountVerificationService;
pub use traits::MailSender;
pub use types::{RegistrationResult, VerificationResult};
