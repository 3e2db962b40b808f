//! Role markers attached to an authenticated user.
//!
//! The backend grants roles as strings (`ROLE_ADMIN`, `ROLE_USER`). The two
//! known markers drive the client's only derived capabilities: whether the
//! admin surfaces are shown and whether the user counts as a member.
//! Unknown markers are carried through untouched so a newer backend does
//! not break deserialization.

use serde::{Deserialize, Serialize};

/// A single role marker granted by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Administrator: sales dashboard, product create/delete, account delete.
    Admin,
    /// Ordinary member account.
    User,
    /// A marker this client does not recognize.
    Other(String),
}

impl Role {
    const ADMIN: &'static str = "ROLE_ADMIN";
    const USER: &'static str = "ROLE_USER";

    /// The backend's string form of this role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => Self::ADMIN,
            Self::User => Self::USER,
            Self::Other(other) => other,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::ADMIN => Self::Admin,
            Self::USER => Self::User,
            _ => Self::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

/// The set of roles on a user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    /// An empty role set (the state after a session probe, which reports
    /// only the username).
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Whether the set contains a given role.
    #[must_use]
    pub fn contains(&self, role: &Role) -> bool {
        self.0.contains(role)
    }

    /// Whether the admin marker is present.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.contains(&Role::Admin)
    }

    /// Whether the member marker is present.
    #[must_use]
    pub fn is_member(&self) -> bool {
        self.contains(&Role::User)
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
