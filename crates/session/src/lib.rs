//! `centralstore-session` — credential lifecycle and session state machine.
//!
//! The session store is the single source of truth for "who is logged in"
//! and the only writer of the credential record. Every other component
//! (navigation guard, views, transport) reads derived signals through an
//! explicit handle; there is no ambient global session.

pub mod authority;
pub mod credential;
pub mod storage;
pub mod store;
pub mod token;

pub use authority::{Authority, LoginCredentials, LoginOutcome, PasswordChange};
pub use credential::{Credential, Identity, ProfileUpdate};
pub use storage::{CredentialStorage, FileStorage, MemoryStorage, TOKEN_KEY, USER_KEY};
pub use store::SessionStore;
pub use token::TokenSlot;
