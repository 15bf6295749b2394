//! Database models for bankstack
//!
//! This module defines the entity structs that map to the PostgreSQL tables
//! shared by the login and account services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================================================
// User Model
// ============================================================================

/// User entity representing a registered user.
///
/// Users are created on registration and never updated or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Login Attempt Model
// ============================================================================

/// Outcome of a single login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptOutcome {
    Success,
    Fail,
}

impl AttemptOutcome {
    /// The tag stored in the `outcome` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptOutcome::Success => "success",
            AttemptOutcome::Fail => "fail",
        }
    }
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the append-only login audit log.
///
/// The email is recorded as submitted, whether or not such a user exists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LoginAttempt {
    pub id: Uuid,
    pub email: String,
    pub source_ip: String,
    pub outcome: String,
    pub attempted_at: DateTime<Utc>,
}

impl LoginAttempt {
    /// Whether this attempt carries the `success` tag.
    pub fn is_success(&self) -> bool {
        self.outcome == AttemptOutcome::Success.as_str()
    }
}

// ============================================================================
// Account Model
// ============================================================================

/// Opening balance granted to every new account.
pub const DEFAULT_BALANCE: f64 = 1000.0;

/// Account entity: one balance record per registered identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub account_type: String,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}
