use bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Role stored on a user document. Anything other than `"admin"` (including a
/// missing field) reads as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum UserRole {
    #[default]
    None,
    Admin,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, UserRole::None)
    }
}

impl From<Option<String>> for UserRole {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref() {
            Some("admin") => UserRole::Admin,
            _ => UserRole::None,
        }
    }
}

impl From<UserRole> for Option<String> {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Some("admin".to_string()),
            UserRole::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "UserRole::is_none")]
    pub role: UserRole,
    #[serde(flatten)]
    pub extra: Document,
}
