//! bankstack - Mock banking demo services
//!
//! Two small web services built on axum and PostgreSQL: a login service
//! issuing signed session tokens, and an account service managing one
//! balance record per verified identity. See the `login-service` and
//! `account-service` binaries for the entry points.

pub mod core;
