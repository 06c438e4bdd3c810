//! Central reaction points for transport-level faults.
//!
//! Fired once per classified fault at the interceptor boundary, so
//! individual call sites carry no repeated error handling.

/// Reactions to authorization and availability faults.
pub trait FaultHooks: Send + Sync {
    /// The remote authority rejected the session token (401-equivalent).
    fn on_authorization_expired(&self) {
        tracing::warn!("authorization expired");
    }

    /// The request was rejected for role reasons (403-equivalent). The
    /// session stays intact.
    fn on_insufficient_privilege(&self) {
        tracing::warn!("insufficient privilege");
    }

    /// The remote authority is failing (5xx-equivalent).
    fn on_service_unavailable(&self, message: &str) {
        tracing::error!("service unavailable: {message}");
    }
}

/// Hooks that only log. Useful before the session wiring exists (e.g. on
/// the login screen itself).
#[derive(Debug, Default)]
pub struct LogOnlyHooks;

impl FaultHooks for LogOnlyHooks {}
