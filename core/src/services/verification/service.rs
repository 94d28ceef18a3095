//! Main account verification service implementation

use av_shared::utils::validation::mask_email;
use std::sync::Arc;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::{VerificationStatus, VerificationToken};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::AccountRepository;

use super::config::VerificationServiceConfig;
use super::traits::MailSender;
use super::types::{RegistrationResult, VerificationResult};

/// Registration and email verification service
///
/// Per account the state machine is
/// `unverified --(verify_email with matching token)--> verified`, and
/// `verified` is terminal.
pub struct AccountVerificationService<R: AccountRepository, M: MailSender> {
    /// Record store holding accounts
    repository: Arc<R>,
    /// Outbound mail transport
    mail_sender: Arc<M>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<R: AccountRepository, M: MailSender> AccountVerificationService<R, M> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `repository` - Account store implementation
    /// * `mail_sender` - Mail transport implementation
    /// * `config` - Service configuration
    pub fn new(repository: Arc<R>, mail_sender: Arc<M>, config: VerificationServiceConfig) -> Self {
        Self {
            repository,
            mail_sender,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Register a new account and email it a verification token
    ///
    /// This method:
    /// 1. Rejects blank input
    /// 2. Generates a token from the OS CSPRNG
    /// 3. Inserts the account; the store rejects a taken username or email
    /// 4. Sends the token to the email address
    ///
    /// If sending fails the account is deleted again (unless
    /// `rollback_on_delivery_failure` is off) and `DeliveryFailure` is returned.
    pub async fn register(&self, username: &str, email: &str) -> DomainResult<RegistrationResult> {
        if username.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "username must not be empty".to_string(),
            });
        }
        if email.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "email must not be empty".to_string(),
            });
        }

        let token = VerificationToken::generate(self.config.token_bytes);
        let account = Account::new(username.to_string(), email.to_string(), token);

        let account = self.repository.create(account).await.map_err(|e| {
            if let DomainError::DuplicateIdentity { field } = &e {
                tracing::info!(
                    username = username,
                    email = %mask_email(email),
                    field = %field,
                    event = "registration_rejected",
                    "Registration rejected: identity already taken"
                );
            }
            e
        })?;

        tracing::info!(
            account_id = %account.id,
            username = %account.username,
            email = %mask_email(&account.email),
            event = "account_created",
            "Created unverified account"
        );

        let message_id = match self.send_verification_email(&account).await {
            Ok(message_id) => message_id,
            Err(error) => {
                self.rollback_registration(&account).await;
                return Err(error);
            }
        };

        tracing::info!(
            account_id = %account.id,
            message_id = %message_id,
            event = "verification_email_sent",
            "Sent verification email"
        );

        Ok(RegistrationResult {
            account,
            message_id,
        })
    }

    /// Confirm an email address with the token that was sent to it
    ///
    /// Verifying an already verified account with its token succeeds
    /// without writing to the store.
    pub async fn verify_email(&self, username: &str, token: &str) -> DomainResult<VerificationResult> {
        let mut account = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(DomainError::user_not_found)?;

        if !account.verification_token.matches(token) {
            tracing::warn!(
                account_id = %account.id,
                username = username,
                event = "invalid_verification_token",
                "Verification attempted with a wrong token"
            );
            return Err(DomainError::InvalidToken);
        }

        if !account.verify() {
            tracing::debug!(
                account_id = %account.id,
                event = "already_verified",
                "Account was already verified"
            );
            return Ok(VerificationResult {
                account,
                already_verified: true,
            });
        }

        let account = self.repository.update(account).await?;

        tracing::info!(
            account_id = %account.id,
            username = %account.username,
            event = "email_verified",
            "Email address verified"
        );

        Ok(VerificationResult {
            account,
            already_verified: false,
        })
    }

    /// Report whether an account has verified its email address
    pub async fn check_verification(&self, username: &str) -> DomainResult<VerificationStatus> {
        self.repository
            .find_by_username(username)
            .await?
            .map(|account| account.status())
            .ok_or_else(DomainError::user_not_found)
    }

    /// Check that the account store is reachable
    pub async fn store_health(&self) -> DomainResult<()> {
        self.repository.ping().await
    }

    async fn send_verification_email(&self, account: &Account) -> DomainResult<String> {
        let body = format!(
            "Your verification token is: {}",
            account.verification_token.as_str()
        );

        self.mail_sender
            .send(&account.email, &self.config.email_subject, &body)
            .await
            .map_err(|e| {
                tracing::error!(
                    account_id = %account.id,
                    email = %mask_email(&account.email),
                    error = %e,
                    event = "verification_email_failed",
                    "Error sending verification email"
                );
                DomainError::DeliveryFailure { message: e }
            })
    }

    /// Undo the insert of an account whose email could not be delivered
    ///
    /// A failed delete is logged and otherwise ignored; the caller still
    /// gets `DeliveryFailure`.
    async fn rollback_registration(&self, account: &Account) {
        if !self.config.rollback_on_delivery_failure {
            tracing::warn!(
                account_id = %account.id,
                event = "account_left_unnotified",
                "Keeping account whose verification email was not delivered"
            );
            return;
        }

        match self.repository.delete(account.id).await {
            Ok(_) => tracing::info!(
                account_id = %account.id,
                event = "registration_rolled_back",
                "Removed account after delivery failure"
            ),
            Err(e) => tracing::error!(
                account_id = %account.id,
                error = %e,
                event = "rollback_failed",
                "Could not remove account after delivery failure"
            ),
        }
    }
}
