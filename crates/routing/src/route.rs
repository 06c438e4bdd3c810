//! Static route configuration.

use serde::Serialize;

/// Path of the login screen; redirect target for unauthenticated access.
pub const LOGIN_PATH: &str = "/login";
/// Path of the landing screen; redirect target for denied access.
pub const HOME_PATH: &str = "/";

/// A named screen and its declared access requirement.
///
/// The flags default to false: a route with none set is public. The table
/// is static configuration, never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub requires_auth: bool,
    /// Guest-only screens (the login page) bounce authenticated sessions
    /// back home.
    pub guest: bool,
    pub requires_admin: bool,
}

impl Route {
    pub const fn public(path: &'static str, name: &'static str, title: &'static str) -> Self {
        Self {
            path,
            name,
            title,
            requires_auth: false,
            guest: false,
            requires_admin: false,
        }
    }

    pub const fn guest_only(path: &'static str, name: &'static str, title: &'static str) -> Self {
        Self {
            path,
            name,
            title,
            requires_auth: false,
            guest: true,
            requires_admin: false,
        }
    }

    pub const fn authenticated(
        path: &'static str,
        name: &'static str,
        title: &'static str,
    ) -> Self {
        Self {
            path,
            name,
            title,
            requires_auth: true,
            guest: false,
            requires_admin: false,
        }
    }

    pub const fn admin(path: &'static str, name: &'static str, title: &'static str) -> Self {
        Self {
            path,
            name,
            title,
            requires_auth: true,
            guest: false,
            requires_admin: true,
        }
    }
}

/// The application's screens, flattened from the layout hierarchy.
///
/// `/storages` and `/partitions` are legacy alias paths kept so old
/// bookmarks keep working.
pub const ROUTES: &[Route] = &[
    Route::guest_only(LOGIN_PATH, "Login", "Sign in"),
    Route::authenticated(HOME_PATH, "Dashboard", "Overview"),
    Route::authenticated("/laboratories", "Laboratories", "Laboratory management"),
    Route::authenticated("/storage-devices", "StorageDevices", "Storage device management"),
    Route::authenticated("/storages", "Storages", "Storage device management"),
    Route::authenticated("/sections", "Sections", "Section management"),
    Route::authenticated("/partitions", "Partitions", "Section management"),
    Route::authenticated("/items", "Items", "Item management"),
    Route::authenticated("/movements", "MovementHistory", "Movement history"),
    Route::authenticated("/profile", "Profile", "My profile"),
    Route::admin("/users", "Users", "User management"),
];

/// Look up a route by exact path.
pub fn find_route(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.path == path)
}
