//! Account repository trait defining the interface for account persistence.
//!
//! The record store owns the uniqueness rules: `create` is a conditional
//! insert that either stores the account or reports which identity field
//! collided, in one step. Callers never check-then-insert.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountField};
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use av_core::repositories::AccountRepository;
/// use av_core::domain::entities::{Account, AccountField};
/// use av_core::errors::DomainError;
///
/// struct PostgresAccountRepository;
///
/// #[async_trait]
/// impl AccountRepository for PostgresAccountRepository {
///     async fn find_by_field(
///         &self,
///         field: AccountField,
///         value: &str,
///     ) -> Result<Option<Account>, DomainError> {
///         Ok(None)
///     }
///     # async fn create(&self, account: Account) -> Result<Account, DomainError> { Ok(account) }
///     # async fn update(&self, account: Account) -> Result<Account, DomainError> { Ok(account) }
///     # async fn delete(&self, id: Uuid) -> Result<bool, DomainError> { Ok(false) }
///     # async fn count(&self, verified: Option<bool>) -> Result<u64, DomainError> { Ok(0) }
///     // ... other methods
/// }
/// ```
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by username or email
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account has that value
    /// * `Err(DomainError)` - The store could not be queried
    async fn find_by_field(
        &self,
        field: AccountField,
        value: &str,
    ) -> Result<Option<Account>, DomainError>;

    /// Find an account by its username
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        self.find_by_field(AccountField::Username, username).await
    }

    /// Find an account by its email address
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.find_by_field(AccountField::Email, email).await
    }

    /// Insert a new account unless its username or email is taken
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::DuplicateIdentity)` - Username or email already
    ///   present; username is reported when both collide
    /// * `Err(DomainError)` - The store failed
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Persist changes to an existing account
    ///
    /// # Returns
    /// * `Ok(Account)` - The updated account
    /// * `Err(DomainError::NotFound)` - No account has that id
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Delete an account
    ///
    /// # Returns
    /// * `Ok(true)` - Account was deleted
    /// * `Ok(false)` - Account not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Count accounts, optionally only verified or only unverified ones
    async fn count(&self, verified: Option<bool>) -> Result<u64, DomainError>;

    /// Check that the store can serve requests
    ///
    /// Stores without an external backend are always reachable.
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
