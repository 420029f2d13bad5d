use bson::Bson;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Named fields replaced by `PATCH /assignment/{id}`. Fields missing from the
/// body are written as null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub difficulty_level: Option<String>,
    pub assignment_number: Option<Bson>,
    pub description: Option<String>,
    pub assignment_last_date: Option<Bson>,
    pub image: Option<String>,
}

/// `?email=` filter shared by the list endpoints.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EmailQuery {
    #[validate(email)]
    pub email: Option<String>,
}
