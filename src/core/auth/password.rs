//! Password hashing
//!
//! One-way salted hashing with bcrypt. The produced hash string is
//! self-contained: algorithm tag, cost factor, and salt are embedded, so
//! verification needs nothing but the stored string.

/// Cost factor for bcrypt hashing (12 is recommended for production)
const BCRYPT_COST: u32 = 12;

/// Password hashing error types
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingError(String),
}

/// Hash a plaintext password with a freshly generated random salt.
pub fn hash(plaintext: &str) -> Result<String, PasswordError> {
    bcrypt::hash(plaintext, BCRYPT_COST).map_err(|e| PasswordError::HashingError(e.to_string()))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash is a verification failure, not an error: login
/// must degrade to "bad credentials" rather than crash on corrupt rows.
pub fn verify(plaintext: &str, stored_hash: &str) -> bool {
    bcrypt::verify(plaintext, stored_hash).unwrap_or(false)
}
