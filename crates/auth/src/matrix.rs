//! Permission matrix: a pure projection of the session signals.
//!
//! The matrix is never stored or cached; it is recomputed from
//! `(is_authenticated, role)` on every read, so there is no window where a
//! decision reflects a stale role.

use crate::{Action, Module, Role};

/// Snapshot of the access-control inputs at the moment of a read.
///
/// Cheap to build; consumers should recompute it per read rather than hold
/// one across session mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    is_authenticated: bool,
    role: Option<Role>,
}

impl Permissions {
    /// Derive the matrix inputs. `role` is ignored unless `is_authenticated`
    /// is true: a role without a session grants nothing.
    pub fn compute(is_authenticated: bool, role: Option<Role>) -> Self {
        Self {
            is_authenticated,
            role,
        }
    }

    /// The matrix of a visitor with no session: denies everything.
    pub fn anonymous() -> Self {
        Self::compute(false, None)
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated && self.role.is_some_and(|r| r.is_admin())
    }

    /// Core decision. Total over the closed enumerations; (module, action)
    /// pairs the matrix does not define deny.
    pub fn allows(&self, module: Module, action: Action) -> bool {
        let authenticated = self.is_authenticated();
        let admin = self.is_admin();

        match (module, action) {
            // User management is admin-only throughout, including view.
            (Module::Users, Action::View | Action::Create | Action::Update | Action::Delete) => {
                admin
            }

            (
                Module::Laboratories | Module::StorageDevices | Module::Sections,
                Action::View,
            ) => authenticated,
            (
                Module::Laboratories | Module::StorageDevices | Module::Sections,
                Action::Create | Action::Update | Action::Delete,
            ) => admin,

            (
                Module::Items,
                Action::View
                | Action::Create
                | Action::Update
                | Action::Delete
                | Action::AdjustQuantity,
            ) => authenticated,

            (Module::Movements, Action::View | Action::Export) => authenticated,
            (Module::Movements, Action::Create | Action::Update | Action::Delete) => admin,

            (Module::Stats, Action::View) => authenticated,

            _ => false,
        }
    }

    /// String-keyed decision for views that address the matrix dynamically.
    /// Unknown module or action keys deny.
    pub fn can(&self, module: &str, action: &str) -> bool {
        match (Module::parse(module), Action::parse(action)) {
            (Some(module), Some(action)) => self.allows(module, action),
            _ => false,
        }
    }

    pub fn can_view(&self, module: Module) -> bool {
        self.allows(module, Action::View)
    }

    pub fn can_create(&self, module: Module) -> bool {
        self.allows(module, Action::Create)
    }

    pub fn can_update(&self, module: Module) -> bool {
        self.allows(module, Action::Update)
    }

    pub fn can_delete(&self, module: Module) -> bool {
        self.allows(module, Action::Delete)
    }
}
