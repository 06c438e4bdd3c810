//! The credential record and the identity it carries.

use serde::{Deserialize, Serialize};

use centralstore_auth::Role;
use centralstore_core::UserId;

/// Authenticated user identity as the remote authority reports it.
///
/// `id` and `role` are fixed for the lifetime of the account; profile
/// updates can only touch the remaining fields (see [`ProfileUpdate`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub real_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub bio: String,
}

/// The session credential.
///
/// Invariant: an identity exists iff a token exists. Enforced by
/// construction — the only states are `Anonymous` and `Active`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credential {
    #[default]
    Anonymous,
    Active { token: String, identity: Identity },
}

impl Credential {
    pub fn is_active(&self) -> bool {
        matches!(self, Credential::Active { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Credential::Anonymous => None,
            Credential::Active { token, .. } => Some(token),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Credential::Anonymous => None,
            Credential::Active { identity, .. } => Some(identity),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().map(|identity| identity.role)
    }
}

/// Partial profile mutation.
///
/// Deliberately has no `id` or `role` field, so a merge can never change
/// them. Absent fields are preserved on merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl ProfileUpdate {
    /// Shallow merge of the accepted fields into an identity.
    pub fn apply_to(&self, identity: &mut Identity) {
        if let Some(email) = &self.email {
            identity.email = email.clone();
        }
        if let Some(real_name) = &self.real_name {
            identity.real_name = real_name.clone();
        }
        if let Some(phone) = &self.phone {
            identity.phone = phone.clone();
        }
        if let Some(department) = &self.department {
            identity.department = department.clone();
        }
        if let Some(bio) = &self.bio {
            identity.bio = bio.clone();
        }
    }
}
