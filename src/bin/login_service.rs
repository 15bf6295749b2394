//! Login service entry point.
//!
//! Issues session tokens: registration, credential verification, the gated
//! dashboard, logout, and the mocked password reset.

use std::net::SocketAddr;

use bankstack::core::auth::{
    AuthApiState, AuthService, SessionGate, TokenConfig, TokenService, auth_router,
    login_allow_list,
};
use bankstack::core::config::AppConfig;
use bankstack::core::db::pool::{DbConfig, create_pool_with_migrations};
use bankstack::core::db::repositories::{LoginAttemptRepository, UserRepository};

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
    let auth = AuthService::new(
        UserRepository::new(pool.clone()),
        LoginAttemptRepository::new(pool),
        tokens.clone(),
    );
    let gate = SessionGate::new(tokens, login_allow_list());

    let app = auth_router(AuthApiState { auth }, gate, &config.static_dir);

    tracing::info!("login service listening on http://{}", config.login_bind);

    let listener = tokio::net::TcpListener::bind(&config.login_bind)
        .await
        .expect("failed to bind listen address");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server error");
}
