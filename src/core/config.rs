//! Application configuration from environment variables.
//!
//! Load configuration using `AppConfig::from_env()` after calling
//! `dotenvy::dotenv()`. Everything here is read once at startup and never
//! mutated; database and token settings have their own config structs
//! (`DbConfig`, `TokenConfig`).

/// Default bind address of the login service
const DEFAULT_LOGIN_BIND: &str = "0.0.0.0:8000";

/// Default bind address of the account service
const DEFAULT_ACCOUNT_BIND: &str = "0.0.0.0:8001";

/// Default directory served under /static
const DEFAULT_STATIC_DIR: &str = "static";

/// Process-wide service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address for the login service (`LOGIN_BIND`)
    pub login_bind: String,
    /// Listen address for the account service (`ACCOUNT_BIND`)
    pub account_bind: String,
    /// Directory of static assets (`STATIC_DIR`)
    pub static_dir: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from a `.env` file.
    pub fn from_env() -> Self {
        Self {
            login_bind: std::env::var("LOGIN_BIND")
                .unwrap_or_else(|_| DEFAULT_LOGIN_BIND.to_string()),
            account_bind: std::env::var("ACCOUNT_BIND")
                .unwrap_or_else(|_| DEFAULT_ACCOUNT_BIND.to_string()),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
