//! User identity read models.

use chrono::NaiveDate;
use maple_market_core::{RoleSet, UserId};
use serde::{Deserialize, Serialize};

/// The backend's user profile DTO.
///
/// Every field except `username` may be absent: the session probe reports
/// only the username, so a bootstrapped session holds a `User` with no id
/// and an empty role set until a login replaces it with the full profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<UserId>,
    pub username: String,
    #[serde(default)]
    pub roles: RoleSet,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

impl User {
    /// A user known only by username, as reported by the session probe.
    #[must_use]
    pub fn from_probe(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            roles: RoleSet::empty(),
            name: None,
            phone: None,
            birthday: None,
        }
    }
}

/// Payload of `GET /auth/isLoggedIn`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginProbe {
    pub is_logged_in: bool,
    #[serde(default)]
    pub username: Option<String>,
}
