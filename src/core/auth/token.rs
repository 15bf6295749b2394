//! Session token issuance and verification
//!
//! Tokens are signed JWTs binding a subject (the user's email) to an
//! expiration instant. They are stateless: verification is purely
//! cryptographic plus a clock check and never touches storage, so whether
//! the subject still resolves to a user is the caller's concern.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Default token lifetime (60 minutes)
const DEFAULT_TTL_MINUTES: i64 = 60;

/// Fallback signing key for local demo runs.
const DEFAULT_SIGNING_KEY: &str = "bankstack-secret-key";

/// Token signing configuration
#[derive(Clone)]
pub struct TokenConfig {
    /// Symmetric key for signing tokens
    pub secret: String,
    /// Signing algorithm (HS256 unless overridden)
    pub algorithm: Algorithm,
    /// Token lifetime in minutes
    pub ttl_minutes: i64,
}

impl TokenConfig {
    /// Create a new token configuration with default algorithm and TTL.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            ttl_minutes: DEFAULT_TTL_MINUTES,
        }
    }

    /// Create config from environment variables.
    ///
    /// Reads `JWT_SECRET`, `JWT_ALGORITHM`, and
    /// `ACCESS_TOKEN_EXPIRE_MINUTES`, falling back to demo defaults. The
    /// key and TTL are fixed for the life of the process.
    pub fn from_env() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) => s,
            Err(_) => {
                tracing::warn!("JWT_SECRET not set, using the built-in demo key");
                DEFAULT_SIGNING_KEY.to_string()
            }
        };

        let algorithm = std::env::var("JWT_ALGORITHM")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Algorithm::HS256);

        let ttl_minutes = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TTL_MINUTES);

        Self {
            secret,
            algorithm,
            ttl_minutes,
        }
    }

    /// Set the token lifetime
    pub fn ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl_minutes = minutes;
        self
    }

    /// Set the signing algorithm
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// Token verification errors
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token expired")]
    Expired,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::SignatureInvalid
            }
            _ => TokenError::Malformed,
        }
    }
}

/// JWT claims carried by a session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the email the token asserts
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token service for issuing and verifying session tokens
#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a new token service
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a signed token for the given subject.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.config.ttl_minutes);

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(
            &Header::new(self.config.algorithm),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify a token and return its subject unchanged.
    ///
    /// The signature is checked before expiry, so a tampered token fails
    /// with [`TokenError::SignatureInvalid`] even when it is also expired,
    /// and an intact expired token fails with [`TokenError::Expired`].
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        Ok(self.decode_claims(token)?.sub)
    }

    /// Verify a token and return the full claim set.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.config.algorithm);
        // No leeway: current time >= exp is expired.
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> TokenService {
        TokenService::new(TokenConfig::new("test_secret_key_for_testing_only_32b!"))
    }

    // ========================================================================
    // TokenConfig Tests
    // ========================================================================

    #[test]
    fn test_token_config_new() {
        let config = TokenConfig::new("my_secret");

        assert_eq!(config.secret, "my_secret");
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.ttl_minutes, DEFAULT_TTL_MINUTES);
    }

    #[test]
    fn test_token_config_builder() {
        let config = TokenConfig::new("secret")
            .ttl_minutes(5)
            .algorithm(Algorithm::HS384);

        assert_eq!(config.ttl_minutes, 5);
        assert_eq!(config.algorithm, Algorithm::HS384);
    }

    #[test]
    fn test_token_config_from_env_falls_back_to_demo_key() {
        let original = std::env::var("JWT_SECRET").ok();
        // SAFETY: test environment
        unsafe { std::env::remove_var("JWT_SECRET") };

        let config = TokenConfig::from_env();
        assert_eq!(config.secret, DEFAULT_SIGNING_KEY);

        if let Some(val) = original {
            // SAFETY: test environment
            unsafe { std::env::set_var("JWT_SECRET", val) };
        }
    }

    // ========================================================================
    // Issue / Verify Tests
    // ========================================================================

    #[test]
    fn test_issue_then_verify_returns_subject() {
        let service = create_test_service();

        let token = service.issue("a@b.com").unwrap();
        let subject = service.verify(&token).unwrap();

        assert_eq!(subject, "a@b.com");
    }

    #[test]
    fn test_subject_returned_unchanged() {
        let service = create_test_service();

        for subject in ["x@y.com", "UPPER@CASE.COM", "weird+tag@host.co.uk", ""] {
            let token = service.issue(subject).unwrap();
            assert_eq!(service.verify(&token).unwrap(), subject);
        }
    }

    #[test]
    fn test_claims_expiration_matches_ttl() {
        let service = TokenService::new(TokenConfig::new("secret").ttl_minutes(60));

        let token = service.issue("a@b.com").unwrap();
        let claims = service.decode_claims(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_expired_token_fails_with_expired() {
        // Negative TTL ensures the token is already past expiration.
        let service = TokenService::new(TokenConfig::new("secret").ttl_minutes(-1));

        let token = service.issue("a@b.com").unwrap();
        let result = service.verify(&token);

        assert!(
            matches!(result, Err(TokenError::Expired)),
            "expected Expired, got: {:?}",
            result
        );
    }

    #[test]
    fn test_tampered_signature_fails_with_signature_invalid() {
        let service = create_test_service();
        let token = service.issue("a@b.com").unwrap();

        // Flip one character in the middle of the signature segment.
        let sig_start = token.rfind('.').unwrap() + 1;
        let pos = sig_start + 5;
        let original = token.as_bytes()[pos];
        let replacement = if original == b'A' { b'B' } else { b'A' };
        let mut bytes = token.into_bytes();
        bytes[pos] = replacement;
        let tampered = String::from_utf8(bytes).unwrap();

        let result = service.verify(&tampered);
        assert!(
            matches!(result, Err(TokenError::SignatureInvalid)),
            "expected SignatureInvalid, got: {:?}",
            result
        );
    }

    #[test]
    fn test_tampered_expired_token_is_signature_invalid_not_expired() {
        let service = TokenService::new(TokenConfig::new("secret").ttl_minutes(-1));
        let token = service.issue("a@b.com").unwrap();

        let sig_start = token.rfind('.').unwrap() + 1;
        let pos = sig_start + 5;
        let original = token.as_bytes()[pos];
        let replacement = if original == b'A' { b'B' } else { b'A' };
        let mut bytes = token.into_bytes();
        bytes[pos] = replacement;
        let tampered = String::from_utf8(bytes).unwrap();

        let result = service.verify(&tampered);
        assert!(matches!(result, Err(TokenError::SignatureInvalid)));
    }

    #[test]
    fn test_wrong_secret_fails_with_signature_invalid() {
        let service1 = TokenService::new(TokenConfig::new("secret_one"));
        let service2 = TokenService::new(TokenConfig::new("secret_two"));

        let token = service1.issue("a@b.com").unwrap();
        let result = service2.verify(&token);

        assert!(matches!(result, Err(TokenError::SignatureInvalid)));
    }

    #[test]
    fn test_garbage_token_fails_with_malformed() {
        let service = create_test_service();

        for garbage in ["", "garbage", "not.a.jwt", "a.b", "!!!.###.$$$"] {
            let result = service.verify(garbage);
            assert!(
                matches!(result, Err(TokenError::Malformed)),
                "expected Malformed for {:?}, got: {:?}",
                garbage,
                result
            );
        }
    }

    // ========================================================================
    // Error Tests
    // ========================================================================

    #[test]
    fn test_token_error_display() {
        assert_eq!(format!("{}", TokenError::Malformed), "Token is malformed");
        assert_eq!(
            format!("{}", TokenError::SignatureInvalid),
            "Token signature is invalid"
        );
        assert_eq!(format!("{}", TokenError::Expired), "Token expired");
    }
}
