use bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};

/// An assignment published by an instructor.
///
/// Every field besides the id is optional: the collection is loosely typed and
/// older documents may miss any of them. Fields this service does not know
/// about are kept in `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: Option<String>,
    pub difficulty_level: Option<String>,
    /// Number or numeric string, stored as sent.
    pub assignment_number: Option<Bson>,
    pub description: Option<String>,
    /// Due date; an ISO-8601 string from the web client, a BSON date in some
    /// older documents.
    pub assignment_last_date: Option<Bson>,
    pub image: Option<String>,
    pub owner_email: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}
