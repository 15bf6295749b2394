//! Login attempt repository
//!
//! Append-only audit log of authentication attempts. Rows are never updated
//! or deleted; every login attempt produces exactly one row regardless of
//! outcome.

use sqlx::PgPool;

use crate::core::db::models::{AttemptOutcome, LoginAttempt};

/// Login attempt repository error types
#[derive(Debug, thiserror::Error)]
pub enum AttemptRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Repository for the append-only login attempt log
#[derive(Clone)]
pub struct LoginAttemptRepository {
    pool: PgPool,
}

impl LoginAttemptRepository {
    /// Create a new login attempt repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one attempt record.
    ///
    /// The email is stored as submitted, even when no such user exists.
    pub async fn append(
        &self,
        email: &str,
        source_ip: &str,
        outcome: AttemptOutcome,
    ) -> Result<LoginAttempt, AttemptRepositoryError> {
        let attempt = sqlx::query_as::<_, LoginAttempt>(
            r#"
            INSERT INTO login_attempts (email, source_ip, outcome)
            VALUES ($1, $2, $3)
            RETURNING id, email, source_ip, outcome, attempted_at
            "#,
        )
        .bind(email)
        .bind(source_ip)
        .bind(outcome.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(attempt)
    }

    /// Most recent attempts recorded for an email, newest first.
    pub async fn recent_for_email(
        &self,
        email: &str,
        limit: i64,
    ) -> Result<Vec<LoginAttempt>, AttemptRepositoryError> {
        let attempts = sqlx::query_as::<_, LoginAttempt>(
            r#"
            SELECT id, email, source_ip, outcome, attempted_at
            FROM login_attempts
            WHERE email = $1
            ORDER BY attempted_at DESC
            LIMIT $2
            "#,
        )
        .bind(email)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Integration Tests (require database)
    // ========================================================================

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_append_records_outcome_tag() {
        let pool = create_test_pool().await;
        let repo = LoginAttemptRepository::new(pool);
        let email = unique_email("append");

        let ok = repo
            .append(&email, "203.0.113.7", AttemptOutcome::Success)
            .await
            .unwrap();
        assert_eq!(ok.email, email);
        assert_eq!(ok.source_ip, "203.0.113.7");
        assert_eq!(ok.outcome, "success");

        let bad = repo
            .append(&email, "203.0.113.7", AttemptOutcome::Fail)
            .await
            .unwrap();
        assert_eq!(bad.outcome, "fail");
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_append_accepts_unknown_email() {
        let pool = create_test_pool().await;
        let repo = LoginAttemptRepository::new(pool);

        // No users table constraint: attempts log emails that never registered.
        let email = unique_email("ghost");
        let attempt = repo
            .append(&email, "198.51.100.4", AttemptOutcome::Fail)
            .await
            .unwrap();
        assert_eq!(attempt.email, email);
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_recent_for_email_newest_first() {
        let pool = create_test_pool().await;
        let repo = LoginAttemptRepository::new(pool);
        let email = unique_email("recent");

        repo.append(&email, "10.0.0.1", AttemptOutcome::Fail)
            .await
            .unwrap();
        repo.append(&email, "10.0.0.1", AttemptOutcome::Success)
            .await
            .unwrap();

        let attempts = repo.recent_for_email(&email, 10).await.unwrap();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].outcome, "success");
        assert_eq!(attempts[1].outcome, "fail");

        let limited = repo.recent_for_email(&email, 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    fn unique_email(tag: &str) -> String {
        format!("{}_{}@example.com", tag, uuid::Uuid::new_v4().simple())
    }

    async fn create_test_pool() -> PgPool {
        use crate::core::db::pool::{DbConfig, create_pool_with_migrations};

        let config = DbConfig::from_env().expect("DATABASE_URL must be set for tests");
        create_pool_with_migrations(&config)
            .await
            .expect("Failed to create test pool")
    }
}
