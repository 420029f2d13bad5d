use bson::oid::ObjectId;
use serde::Serialize;

use crate::model::assignment::Assignment;
use crate::model::submission::Submission;
use crate::model::user::User;

/// A stored model that carries its own `_id`.
pub trait StoredDocument {
    fn take_id(&mut self) -> Option<ObjectId>;
}

impl StoredDocument for Assignment {
    fn take_id(&mut self) -> Option<ObjectId> {
        self.id.take()
    }
}

impl StoredDocument for Submission {
    fn take_id(&mut self) -> Option<ObjectId> {
        self.id.take()
    }
}

impl StoredDocument for User {
    fn take_id(&mut self) -> Option<ObjectId> {
        self.id.take()
    }
}

/// A document as returned over HTTP: the stored fields with `_id` as the
/// plain hex string the by-id routes accept.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse<T> {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub document: T,
}

impl<T: StoredDocument> DocumentResponse<T> {
    pub fn from_document(mut document: T) -> Self {
        let id = document.take_id().map(|id| id.to_hex());
        DocumentResponse { id, document }
    }

    pub fn from_documents(documents: Vec<T>) -> Vec<Self> {
        documents.into_iter().map(Self::from_document).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_plain_hex() {
        let id = ObjectId::new();
        let assignment = Assignment {
            id: Some(id),
            title: Some("Graphs".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(DocumentResponse::from_document(assignment)).unwrap();
        assert_eq!(value["_id"], id.to_hex());
        assert_eq!(value["title"], "Graphs");
    }

    #[test]
    fn test_nested_object_ids_keep_extended_form() {
        let mut submission = Submission { id: Some(ObjectId::new()), ..Default::default() };
        let linked = ObjectId::new();
        submission.extra.insert("linkedId", linked);

        let value = serde_json::to_value(DocumentResponse::from_document(submission)).unwrap();
        assert!(value["_id"].is_string());
        assert_eq!(value["linkedId"]["$oid"], linked.to_hex());
    }
}
