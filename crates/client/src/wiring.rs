//! Wires transport faults into the session lifecycle.

use std::sync::Arc;

use centralstore_routing::LOGIN_PATH;
use centralstore_session::SessionStore;

use crate::hooks::FaultHooks;

/// Host callback that surfaces a transient, non-fatal notice.
pub type NoticeSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Host callback that navigates to a route path.
pub type Navigator = Arc<dyn Fn(&str) + Send + Sync>;

/// Standard wiring: an expired authorization forces a logout and a redirect
/// to the login screen; privilege and availability faults surface as
/// notices without touching the session.
pub struct SessionWiring {
    session: SessionStore,
    navigate: Navigator,
    notify: NoticeSink,
}

impl SessionWiring {
    pub fn new(session: SessionStore, navigate: Navigator, notify: NoticeSink) -> Self {
        Self {
            session,
            navigate,
            notify,
        }
    }
}

impl FaultHooks for SessionWiring {
    fn on_authorization_expired(&self) {
        self.session.force_logout();
        (self.navigate)(LOGIN_PATH);
    }

    fn on_insufficient_privilege(&self) {
        (self.notify)("You do not have permission for this operation");
    }

    fn on_service_unavailable(&self, message: &str) {
        tracing::error!("service unavailable: {message}");
        (self.notify)("Server error, please retry later");
    }
}
