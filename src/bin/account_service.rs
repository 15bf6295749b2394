//! Account service entry point.
//!
//! Serves the per-identity balance record behind the session gate. Shares
//! the signing key configuration with the login service so tokens issued
//! there verify here.

use std::net::SocketAddr;

use bankstack::core::account::{AccountApiState, account_allow_list, account_router};
use bankstack::core::auth::{SessionGate, TokenConfig, TokenService};
use bankstack::core::config::AppConfig;
use bankstack::core::db::pool::{DbConfig, create_pool_with_migrations};
use bankstack::core::db::repositories::AccountRepository;

#[tokio::main]
async fn main() {
    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    let db_config = DbConfig::from_env().expect("DATABASE_URL must be set");
    let pool = create_pool_with_migrations(&db_config)
        .await
        .expect("failed to connect to database");

    let tokens = TokenService::new(TokenConfig::from_env());
    let gate = SessionGate::new(tokens, account_allow_list());

    let app = account_router(
        AccountApiState {
            accounts: AccountRepository::new(pool),
        },
        gate,
        &config.static_dir,
    );

    tracing::info!(
        "account service listening on http://{}",
        config.account_bind
    );

    let listener = tokio::net::TcpListener::bind(&config.account_bind)
        .await
        .expect("failed to bind listen address");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server error");
}
