//! Navigation guard: synchronous allow/redirect decision per transition.

use centralstore_session::SessionStore;

use crate::route::{Route, HOME_PATH, LOGIN_PATH};

/// Terminal outcome of a route-transition check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allowed,
    RedirectToLogin,
    RedirectToHome,
}

impl GuardDecision {
    /// Redirect target, when the transition was not allowed.
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Allowed => None,
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::RedirectToHome => Some(HOME_PATH),
        }
    }
}

/// Pure decision over the session signals. Total: it cannot fail.
///
/// Priority order is fixed: authentication before role, and guest
/// exclusivity independent of admin exclusivity, so an authenticated
/// non-admin hitting an admin route goes home, not to login.
pub fn decide(route: &Route, authenticated: bool, admin: bool) -> GuardDecision {
    if route.requires_auth && !authenticated {
        return GuardDecision::RedirectToLogin;
    }
    if route.guest && authenticated {
        return GuardDecision::RedirectToHome;
    }
    if route.requires_admin && !admin {
        return GuardDecision::RedirectToHome;
    }
    GuardDecision::Allowed
}

/// Guard bound to a session handle.
pub struct NavigationGuard {
    session: SessionStore,
}

impl NavigationGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Decide a transition from the current in-memory signals. No network,
    /// no suspension: the decision lands before the target view renders.
    pub fn evaluate(&self, route: &Route) -> GuardDecision {
        let decision = decide(
            route,
            self.session.is_authenticated(),
            self.session.is_admin(),
        );
        if let Some(target) = decision.redirect_target() {
            tracing::debug!(path = route.path, target, "transition redirected");
        }
        decision
    }

    /// Decide a transition by path. Unknown paths are treated as public;
    /// the host's router is responsible for its own not-found handling.
    pub fn evaluate_path(&self, path: &str) -> GuardDecision {
        match crate::route::find_route(path) {
            Some(route) => self.evaluate(route),
            None => GuardDecision::Allowed,
        }
    }
}
