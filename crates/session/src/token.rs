//! Explicit bearer-credential provider shared with the transport.

use std::sync::{Arc, RwLock};

/// Cheap-clone slot the transport reads on every outbound request.
///
/// The session store is the only writer: arming and disarming happen inside
/// login/logout/hydrate. Passing the slot to the transport at construction
/// replaces mutating default headers on a shared client object.
#[derive(Debug, Clone, Default)]
pub struct TokenSlot {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach this token to subsequent requests.
    pub fn arm(&self, token: impl Into<String>) {
        *self.write() = Some(token.into());
    }

    /// Stop attaching a token.
    pub fn disarm(&self) {
        *self.write() = None;
    }

    /// The token to attach, if armed.
    pub fn bearer(&self) -> Option<String> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.bearer().is_some()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<String>> {
        match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
