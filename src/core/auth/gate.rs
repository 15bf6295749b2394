//! Session gate middleware
//!
//! Every inbound request passes through the gate before any handler runs.
//! Paths on the allow-list (login, registration, password reset, static
//! assets, health root) go straight through; every other request must carry
//! a verifiable session token in the `access_token` cookie. Failures
//! degrade to a redirect to the login page, never an error response.
//!
//! The gate attaches the verified [`Subject`] to the request extensions and
//! deliberately does not load the user record; resolving the subject
//! against the credential store is the downstream handler's job.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::core::auth::token::{TokenError, TokenService};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "access_token";

/// Where unauthenticated requests are sent
pub const LOGIN_PATH: &str = "/login";

/// Query marker appended when the session token has expired, so the login
/// page can show a message.
pub const SESSION_EXPIRED_PARAM: &str = "session_expired";

/// Verified token subject (the email the session asserts), attached to the
/// request extensions by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(pub String);

/// Explicit list of paths that bypass authentication.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    exact: Vec<String>,
    prefixes: Vec<String>,
}

impl AllowList {
    /// Build an allow-list from exact paths and path prefixes.
    ///
    /// A prefix such as `/static` permits `/static/style.css` but not
    /// `/staticky`.
    pub fn new<'a>(
        exact: impl IntoIterator<Item = &'a str>,
        prefixes: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            exact: exact.into_iter().map(str::to_string).collect(),
            prefixes: prefixes.into_iter().map(str::to_string).collect(),
        }
    }

    /// Whether the path may be served without a session.
    pub fn permits(&self, path: &str) -> bool {
        if self.exact.iter().any(|p| p == path) {
            return true;
        }

        self.prefixes
            .iter()
            .any(|p| path == p || path.strip_prefix(p.as_str()).is_some_and(|r| r.starts_with('/')))
    }
}

/// State for the session gate middleware.
#[derive(Clone)]
pub struct SessionGate {
    tokens: TokenService,
    allow: AllowList,
}

impl SessionGate {
    /// Create a gate around a token service and an allow-list.
    pub fn new(tokens: TokenService, allow: AllowList) -> Self {
        Self { tokens, allow }
    }

    fn redirect_to_login(expired: bool) -> Response {
        if expired {
            Redirect::to(&format!("{LOGIN_PATH}?{SESSION_EXPIRED_PARAM}=1")).into_response()
        } else {
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

/// Middleware enforcing authentication ahead of handler dispatch.
///
/// Layered over the whole router, so the check precedes every handler; the
/// allow-list is the only escape.
pub async fn require_session(
    State(gate): State<SessionGate>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if gate.allow.permits(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return SessionGate::redirect_to_login(false);
    };

    match gate.tokens.verify(cookie.value()) {
        Ok(subject) => {
            request.extensions_mut().insert(Subject(subject));
            next.run(request).await
        }
        Err(TokenError::Expired) => {
            tracing::debug!("session token expired");
            SessionGate::redirect_to_login(true)
        }
        Err(err) => {
            tracing::debug!("session token rejected: {err}");
            SessionGate::redirect_to_login(false)
        }
    }
}
