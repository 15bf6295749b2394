//! Account repository for database operations
//!
//! One balance record per registered email. Accounts are created once with
//! the default opening balance; this demo defines no further ledger
//! operations.

use sqlx::PgPool;

use crate::core::db::models::Account;

/// Account repository error types
#[derive(Debug, thiserror::Error)]
pub enum AccountRepositoryError {
    #[error("Account already exists")]
    AlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Account repository for database operations
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by owning email
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, account_type, balance, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Create the account for an email with the default opening balance.
    ///
    /// Creation is first-wins: a concurrent duplicate surfaces the unique
    /// constraint and maps to [`AccountRepositoryError::AlreadyExists`].
    pub async fn create(
        &self,
        email: &str,
        account_type: &str,
    ) -> Result<Account, AccountRepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, account_type)
            VALUES ($1, $2)
            RETURNING id, email, account_type, balance, created_at
            "#,
        )
        .bind(email)
        .bind(account_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e
                && db.is_unique_violation()
            {
                AccountRepositoryError::AlreadyExists
            } else {
                AccountRepositoryError::DatabaseError(e)
            }
        })?;

        Ok(account)
    }
}
