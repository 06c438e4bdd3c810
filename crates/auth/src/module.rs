//! Fixed enumeration of modules and actions the matrix covers.
//!
//! Views address modules/actions by string key; parsing returns `Option` so
//! the predicates can map an unknown key to an explicit deny instead of
//! relying on an absent-key lookup quirk.

/// Application module guarded by the permission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Users,
    Laboratories,
    StorageDevices,
    Sections,
    Items,
    Movements,
    Stats,
}

impl Module {
    pub const ALL: [Module; 7] = [
        Module::Users,
        Module::Laboratories,
        Module::StorageDevices,
        Module::Sections,
        Module::Items,
        Module::Movements,
        Module::Stats,
    ];

    /// Parse a view-supplied module key. `"storages"` is the legacy alias
    /// for the storage-device module kept for older screens.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "users" => Some(Module::Users),
            "laboratories" => Some(Module::Laboratories),
            "storageDevices" | "storages" => Some(Module::StorageDevices),
            "sections" => Some(Module::Sections),
            "items" => Some(Module::Items),
            "movements" => Some(Module::Movements),
            "stats" => Some(Module::Stats),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Users => "users",
            Module::Laboratories => "laboratories",
            Module::StorageDevices => "storageDevices",
            Module::Sections => "sections",
            Module::Items => "items",
            Module::Movements => "movements",
            Module::Stats => "stats",
        }
    }
}

impl core::fmt::Display for Module {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action on a module. Not every module defines every action; undefined
/// pairs deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
    AdjustQuantity,
    Export,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::View,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::AdjustQuantity,
        Action::Export,
    ];

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "view" => Some(Action::View),
            "create" => Some(Action::Create),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            "adjustQuantity" => Some(Action::AdjustQuantity),
            "export" => Some(Action::Export),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::AdjustQuantity => "adjustQuantity",
            Action::Export => "export",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
