//! In-memory implementation of AccountRepository
//!
//! Used for development (`STORE_BACKEND=memory`) and as the test double
//! for the service and HTTP layers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountField};
use crate::errors::{DomainError, IdentityField};

use super::trait_::AccountRepository;

/// Account store backed by a `HashMap` behind a single async lock
///
/// Uniqueness is checked and the row inserted under the same write
/// guard, so concurrent `create` calls cannot both claim an identity.
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every account
    pub async fn clear(&self) {
        self.accounts.write().await.clear();
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_field(
        &self,
        field: AccountField,
        value: &str,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.field(field) == value).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        for field in [IdentityField::Username, IdentityField::Email] {
            if accounts
                .values()
                .any(|a| a.field(field) == account.field(field))
            {
                return Err(DomainError::DuplicateIdentity { field });
            }
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(DomainError::user_not_found());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.remove(&id).is_some())
    }

    async fn count(&self, verified: Option<bool>) -> Result<u64, DomainError> {
        let accounts = self.accounts.read().await;
        let count = match verified {
            Some(flag) => accounts.values().filter(|a| a.is_verified == flag).count(),
            None => accounts.len(),
        };
        Ok(count as u64)
    }
}
