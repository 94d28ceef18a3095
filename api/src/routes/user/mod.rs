//! Account route handlers
//!
//! This module contains the registration and email verification endpoints:
//! - Registration (creates the account and emails a token)
//! - Email verification with the emailed token
//! - Verification status lookup

pub mod check_verification;
pub mod register;
pub mod verify_email;

use std::sync::Arc;

use av_core::repositories::AccountRepository;
use av_core::services::verification::{AccountVerificationService, MailSender};

pub use check_verification::check_verification;
pub use register::register;
pub use verify_email::verify_email;

/// Application state that holds shared services
pub struct AppState<R, M>
where
    R: AccountRepository,
    M: MailSender,
{
    pub verification_service: Arc<AccountVerificationService<R, M>>,
}

impl<R, M> AppState<R, M>
where
    R: AccountRepository,
    M: MailSender,
{
    pub fn new(verification_service: Arc<AccountVerificationService<R, M>>) -> Self {
        Self {
            verification_service,
        }
    }
}
