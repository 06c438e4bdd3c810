//! `centralstore-core` — shared client primitives.
//!
//! This crate contains **pure types** only (no transport, no storage concerns).

pub mod error;
pub mod id;

pub use error::{ApiError, AuthError};
pub use id::UserId;
