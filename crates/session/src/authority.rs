//! Remote authority boundary.
//!
//! The session store drives this narrow slice of the API; the rest of the
//! REST surface stays with the transport crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use centralstore_core::ApiError;

use crate::credential::{Identity, ProfileUpdate};

/// Credentials presented at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Payload of a successful login exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub token: String,
    pub user: Identity,
}

/// Password-change payload. Fire-and-forget with respect to the credential:
/// success does not touch the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

/// The subset of the remote API the session store calls.
///
/// One round trip per call; retry policy belongs to the caller.
#[async_trait]
pub trait Authority: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, ApiError>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError>;

    async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError>;
}
