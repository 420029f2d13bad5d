//! Mutation acknowledgments echoed back to callers.
//!
//! These mirror the shape MongoDB drivers report for single-document writes so
//! existing front-ends keep working against this service.

use bson::Bson;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl InsertAck {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        InsertAck { acknowledged: true, inserted_id: inserted_id.into() }
    }
}

impl UpdateAck {
    pub fn new(matched_count: u64, modified_count: u64, upserted_id: Option<String>) -> Self {
        UpdateAck { acknowledged: true, matched_count, modified_count, upserted_id }
    }
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self {
        DeleteAck { acknowledged: true, deleted_count }
    }
}

impl From<InsertOneResult> for InsertAck {
    fn from(result: InsertOneResult) -> Self {
        InsertAck::new(id_to_string(&result.inserted_id))
    }
}

impl From<UpdateResult> for UpdateAck {
    fn from(result: UpdateResult) -> Self {
        UpdateAck::new(
            result.matched_count,
            result.modified_count,
            result.upserted_id.as_ref().map(id_to_string),
        )
    }
}

impl From<DeleteResult> for DeleteAck {
    fn from(result: DeleteResult) -> Self {
        DeleteAck::new(result.deleted_count)
    }
}
