use bson::Document;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::ack_dto::InsertAck;
use crate::model::user::User;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    /// Other profile fields sent by the client.
    #[serde(flatten)]
    pub extra: Document,
}

/// Keys a client may not set on its own user document.
const SERVER_OWNED_KEYS: [&str; 2] = ["_id", "role"];

impl From<CreateUserRequest> for User {
    fn from(mut req: CreateUserRequest) -> Self {
        for key in SERVER_OWNED_KEYS {
            req.extra.remove(key);
        }
        User {
            id: None,
            email: req.email,
            name: req.name,
            photo_url: req.photo_url,
            role: Default::default(),
            extra: req.extra,
        }
    }
}


/// Body returned when the email is already registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserExistsResponse {
    pub message: String,
    pub inserted_id: Option<String>,
}

impl UserExistsResponse {
    pub fn new() -> Self {
        UserExistsResponse {
            message: "User already Exists".to_string(),
            inserted_id: None,
        }
    }
}

impl Default for UserExistsResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreateUserResponse {
    Created(InsertAck),
    AlreadyExists(UserExistsResponse),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCheckResponse {
    pub admin: bool,
}
