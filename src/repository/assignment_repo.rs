use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

use crate::dto::ack_dto::{DeleteAck, InsertAck, UpdateAck};
use crate::dto::assignment_dto::UpdateAssignmentRequest;
use crate::model::assignment::Assignment;
use crate::repository::mongo_store::MongoStore;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Filter and ordering for assignment listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentQuery {
    /// Equality match on `ownerEmail`.
    pub owner_email: Option<String>,
    /// Newest due date first.
    pub sort_by_due_date: bool,
}

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn create(&self, assignment: Assignment) -> RepositoryResult<InsertAck>;
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Assignment>>;
    async fn list(&self, query: AssignmentQuery) -> RepositoryResult<Vec<Assignment>>;
    async fn update_fields(&self, id: ObjectId, fields: UpdateAssignmentRequest) -> RepositoryResult<UpdateAck>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<DeleteAck>;
}

pub struct MongoAssignmentRepository {
    collection: mongodb::Collection<Assignment>,
}

impl MongoAssignmentRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoAssignmentRepository { collection: store.assignments() }
    }
}

fn update_document(fields: UpdateAssignmentRequest) -> Document {
    doc! {
        "$set": {
            "title": fields.title,
            "difficultyLevel": fields.difficulty_level,
            "assignmentNumber": fields.assignment_number,
            "description": fields.description,
            "assignmentLastDate": fields.assignment_last_date,
            "image": fields.image,
        }
    }
}

#[async_trait]
impl AssignmentRepository for MongoAssignmentRepository {
    #[tracing::instrument(skip(self, assignment))]
    async fn create(&self, mut assignment: Assignment) -> RepositoryResult<InsertAck> {
        assignment.id = Some(ObjectId::new());
        match self.collection.insert_one(&assignment, None).await {
            Ok(result) => {
                info!("Assignment created successfully");
                Ok(InsertAck::from(result))
            }
            Err(e) => {
                error!("Failed to create assignment: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Assignment>> {
        self.collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                error!("Failed to fetch assignment by ID: {}", e);
                RepositoryError::from(e)
            })
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, query: AssignmentQuery) -> RepositoryResult<Vec<Assignment>> {
        let filter = match &query.owner_email {
            Some(email) => doc! { "ownerEmail": email },
            None => doc! {},
        };
        let options = query
            .sort_by_due_date
            .then(|| FindOptions::builder().sort(doc! { "assignmentLastDate": -1 }).build());

        let cursor = self.collection.find(filter, options).await.map_err(|e| {
            error!("Failed to list assignments: {}", e);
            RepositoryError::from(e)
        })?;
        let assignments: Vec<Assignment> = cursor.try_collect().await.map_err(|e| {
            error!("Failed to read assignment cursor: {}", e);
            RepositoryError::from(e)
        })?;
        info!("Fetched {} assignments", assignments.len());
        Ok(assignments)
    }

    #[tracing::instrument(skip(self, fields), fields(id = %id))]
    async fn update_fields(&self, id: ObjectId, fields: UpdateAssignmentRequest) -> RepositoryResult<UpdateAck> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, update_document(fields), None)
            .await
            .map_err(|e| {
                error!("Failed to update assignment: {}", e);
                RepositoryError::from(e)
            })?;
        info!(matched = result.matched_count, modified = result.modified_count, "Assignment update applied");
        Ok(UpdateAck::from(result))
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<DeleteAck> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await.map_err(|e| {
            error!("Failed to delete assignment: {}", e);
            RepositoryError::from(e)
        })?;
        info!(deleted = result.deleted_count, "Assignment delete applied");
        Ok(DeleteAck::from(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_document_sets_every_named_field() {
        let update = update_document(UpdateAssignmentRequest {
            title: Some("Linked lists".to_string()),
            ..Default::default()
        });
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.len(), 6);
        assert_eq!(set.get_str("title").unwrap(), "Linked lists");
        assert!(matches!(set.get("image"), Some(bson::Bson::Null)));
    }
}
