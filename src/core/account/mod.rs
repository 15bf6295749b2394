//! Account service module
//!
//! Gated view/create surface over the per-identity balance records.

pub mod api;

pub use api::{AccountApiState, account_allow_list, account_router};
