use bson::Bson;
use serde::{Deserialize, Serialize};

use crate::dto::ack_dto::UpdateAck;
use crate::model::submission::SubmissionStatus;

/// Body of `PUT /mark/user/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkSubmissionRequest {
    pub feedback: Option<String>,
    pub obtain_marks: Option<Bson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusToggleResponse {
    #[serde(flatten)]
    pub ack: UpdateAck,
    pub status: SubmissionStatus,
}
