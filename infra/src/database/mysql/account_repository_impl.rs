//! MySQL implementation of the AccountRepository trait.
//!
//! Uniqueness of username and email is enforced by the table's unique
//! keys; a rejected insert is translated into `DuplicateIdentity` by
//! reading the key name out of MySQL's duplicate-entry error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use av_core::domain::entities::account::{Account, AccountField};
use av_core::domain::value_objects::VerificationToken;
use av_core::errors::{DomainError, IdentityField};
use av_core::repositories::AccountRepository;

use crate::database::connection::EMAIL_UNIQUE_KEY;

const ACCOUNT_COLUMNS: &str =
    "id, username, email, verification_token, is_verified, created_at, updated_at, verified_at";

/// MySQL implementation of AccountRepository
#[derive(Clone)]
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(decode_error("id"))?;
        let token: String = row
            .try_get("verification_token")
            .map_err(decode_error("verification_token"))?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid account UUID: {}", e),
            })?,
            username: row.try_get("username").map_err(decode_error("username"))?,
            email: row.try_get("email").map_err(decode_error("email"))?,
            verification_token: VerificationToken::from_stored(token),
            is_verified: row.try_get("is_verified").map_err(decode_error("is_verified"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(decode_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(decode_error("updated_at"))?,
            verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("verified_at")
                .map_err(decode_error("verified_at"))?,
        })
    }
}

fn decode_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

/// Map a query failure to the domain error the service expects
fn store_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, context = context, "Account store query failed");
    DomainError::Unavailable {
        message: format!("{}: {}", context, e),
    }
}

/// Work out which identity a duplicate-entry error refers to
///
/// MySQL reports `Duplicate entry '<value>' for key '<key>'`, where the key
/// is either bare (5.7) or prefixed with the table name (8.0). Only the
/// key part is inspected because the value is user input.
pub(crate) fn duplicate_field_from_message(message: &str) -> IdentityField {
    let key = message
        .rsplit_once("for key '")
        .map(|(_, key)| key.trim_end_matches('\''))
        .unwrap_or_default();

    if key.ends_with(EMAIL_UNIQUE_KEY) {
        IdentityField::Email
    } else {
        IdentityField::Username
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_field(
        &self,
        field: AccountField,
        value: &str,
    ) -> Result<Option<Account>, DomainError> {
        // Column name comes from a closed enum, never from input
        let query = format!(
            "SELECT {} FROM accounts WHERE {} = ? LIMIT 1",
            ACCOUNT_COLUMNS,
            field.as_str()
        );

        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find account", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, username, email, verification_token, is_verified,
                created_at, updated_at, verified_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.username)
            .bind(&account.email)
            .bind(account.verification_token.as_str())
            .bind(account.is_verified)
            .bind(account.created_at)
            .bind(account.updated_at)
            .bind(account.verified_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(account),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                let field = duplicate_field_from_message(db_err.message());
                tracing::debug!(field = %field, "Insert rejected by unique key");
                Err(DomainError::DuplicateIdentity { field })
            }
            Err(e) => Err(store_error("Failed to create account", e)),
        }
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts
            SET is_verified = ?, updated_at = ?, verified_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(account.is_verified)
            .bind(account.updated_at)
            .bind(account.verified_at)
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to update account", e))?;

        if result.rows_affected() == 0 {
            // MySQL counts changed rows, so confirm the row is really missing
            let exists = sqlx::query("SELECT 1 FROM accounts WHERE id = ?")
                .bind(account.id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| store_error("Failed to update account", e))?
                .is_some();

            if !exists {
                return Err(DomainError::user_not_found());
            }
        }

        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete account", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, verified: Option<bool>) -> Result<u64, DomainError> {
        let row = match verified {
            Some(flag) => {
                sqlx::query("SELECT COUNT(*) AS count FROM accounts WHERE is_verified = ?")
                    .bind(flag)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT COUNT(*) AS count FROM accounts")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| store_error("Failed to count accounts", e))?;

        let count: i64 = row.try_get("count").map_err(decode_error("count"))?;
        Ok(count as u64)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Database health check failed", e))?;
        Ok(())
    }
}
