//! `centralstore-routing` — route descriptors and the navigation guard.
//!
//! The guard is the enforcement point of the RBAC engine at route-transition
//! time: it reads the session store's in-memory signals and decides
//! allow/redirect before the target view renders.

pub mod guard;
pub mod route;

pub use guard::{decide, GuardDecision, NavigationGuard};
pub use route::{find_route, Route, HOME_PATH, LOGIN_PATH, ROUTES};
