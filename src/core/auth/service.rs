//! Authentication service
//!
//! Orchestrates the login and registration flows: credential store lookup,
//! password verification, attempt logging, and token issuance. Exposes the
//! error taxonomy shared by both services' handlers.

use crate::core::auth::password::{self, PasswordError};
use crate::core::auth::token::{TokenError, TokenService};
use crate::core::db::models::{AttemptOutcome, LoginAttempt, User};
use crate::core::db::repositories::{
    AttemptRepositoryError, LoginAttemptRepository, UserRepository, UserRepositoryError,
};

/// Authentication error taxonomy
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Bad credentials. Never distinguishes an unknown email from a wrong
    /// password.
    #[error("Invalid email or password")]
    AuthenticationFailure,

    #[error("Email already registered")]
    DuplicateIdentity,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserRepositoryError> for AuthError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::EmailAlreadyExists => AuthError::DuplicateIdentity,
            UserRepositoryError::DatabaseError(e) => AuthError::Database(e.to_string()),
        }
    }
}

impl From<AttemptRepositoryError> for AuthError {
    fn from(err: AttemptRepositoryError) -> Self {
        match err {
            AttemptRepositoryError::DatabaseError(e) => AuthError::Database(e.to_string()),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Malformed | TokenError::SignatureInvalid => AuthError::TokenInvalid,
            TokenError::Encoding(e) => AuthError::Internal(e),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    attempts: LoginAttemptRepository,
    tokens: TokenService,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(
        users: UserRepository,
        attempts: LoginAttemptRepository,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            attempts,
            tokens,
        }
    }

    /// Validate email shape for registration
    fn validate_email(email: &str) -> Result<(), AuthError> {
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() != 2 {
            return Err(AuthError::InvalidEmail);
        }

        let (local, domain) = (parts[0], parts[1]);
        if local.is_empty() || domain.is_empty() {
            return Err(AuthError::InvalidEmail);
        }

        if !domain.contains('.') || domain.split('.').any(|p| p.is_empty()) {
            return Err(AuthError::InvalidEmail);
        }

        Ok(())
    }

    /// Register a new user.
    ///
    /// A duplicate email fails with [`AuthError::DuplicateIdentity`] whether
    /// it is caught by the lookup or by the storage unique constraint when
    /// two registrations race.
    pub async fn register(&self, email: &str, plain_password: &str) -> Result<User, AuthError> {
        Self::validate_email(email)?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::DuplicateIdentity);
        }

        let password_hash = password::hash(plain_password)?;
        let user = self.users.create(email, &password_hash).await?;

        Ok(user)
    }

    /// Verify credentials and issue a session token.
    ///
    /// Every attempt appends exactly one audit record with the email as
    /// submitted and the caller's source IP. An unknown email and a wrong
    /// password produce the identical failure.
    pub async fn login(
        &self,
        email: &str,
        plain_password: &str,
        source_ip: &str,
    ) -> Result<String, AuthError> {
        let user = self.users.find_by_email(email).await?;

        let verified = match &user {
            Some(u) => password::verify(plain_password, &u.password_hash),
            None => false,
        };

        if !verified {
            self.attempts
                .append(email, source_ip, AttemptOutcome::Fail)
                .await?;
            return Err(AuthError::AuthenticationFailure);
        }

        self.attempts
            .append(email, source_ip, AttemptOutcome::Success)
            .await?;

        let token = self.tokens.issue(email)?;
        Ok(token)
    }

    /// Cross-reference a verified token subject against the credential
    /// store. Token verification is stateless, so a subject may no longer
    /// resolve to a user.
    pub async fn resolve_subject(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self.users.find_by_email(email).await?)
    }

    /// Handle a password reset request.
    ///
    /// Fails with [`AuthError::NotFound`] for an unknown email; the actual
    /// reset is mocked.
    pub async fn reset_requested(&self, email: &str) -> Result<(), AuthError> {
        if self.users.find_by_email(email).await?.is_none() {
            return Err(AuthError::NotFound);
        }
        Ok(())
    }

    /// Most recent login attempts recorded for an email, newest first.
    pub async fn recent_attempts(
        &self,
        email: &str,
        limit: i64,
    ) -> Result<Vec<LoginAttempt>, AuthError> {
        Ok(self.attempts.recent_for_email(email, limit).await?)
    }
}
