//! `centralstore-auth` — pure RBAC decision engine.
//!
//! This crate is intentionally decoupled from transport and storage: the
//! session layer feeds it two signals (authenticated? which role?) and it
//! answers allow/deny for every (module, action) pair.

pub mod matrix;
pub mod module;
pub mod role;

pub use matrix::Permissions;
pub use module::{Action, Module};
pub use role::Role;
