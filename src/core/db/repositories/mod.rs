//! Database repositories for bankstack
//!
//! Repositories encapsulate the persistence interface the services depend
//! on: user lookup/insert, the append-only login attempt log, and account
//! records.

pub mod account;
pub mod attempt;
pub mod user;

pub use account::{AccountRepository, AccountRepositoryError};
pub use attempt::{AttemptRepositoryError, LoginAttemptRepository};
pub use user::{UserRepository, UserRepositoryError};
