use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument};

use crate::dto::ack_dto::{DeleteAck, InsertAck, UpdateAck};
use crate::dto::assignment_dto::UpdateAssignmentRequest;
use crate::model::assignment::Assignment;
use crate::repository::assignment_repo::{AssignmentQuery, AssignmentRepository};
use crate::util::error::ServiceError;

#[async_trait]
pub trait AssignmentService: Send + Sync {
    async fn create_assignment(&self, assignment: Assignment) -> Result<InsertAck, ServiceError>;
    async fn get_assignment(&self, id: ObjectId) -> Result<Assignment, ServiceError>;
    async fn list_assignments(&self, query: AssignmentQuery) -> Result<Vec<Assignment>, ServiceError>;
    async fn update_assignment(&self, id: ObjectId, fields: UpdateAssignmentRequest) -> Result<UpdateAck, ServiceError>;
    async fn delete_assignment(&self, id: ObjectId) -> Result<DeleteAck, ServiceError>;
}

pub struct AssignmentServiceImpl {
    pub assignment_repo: Arc<dyn AssignmentRepository>,
}

impl AssignmentServiceImpl {
    pub fn new(assignment_repo: Arc<dyn AssignmentRepository>) -> Self {
        Self { assignment_repo }
    }
}

#[async_trait]
impl AssignmentService for AssignmentServiceImpl {
    #[instrument(skip(self, assignment), fields(title = ?assignment.title))]
    async fn create_assignment(&self, assignment: Assignment) -> Result<InsertAck, ServiceError> {
        info!("Creating assignment");
        let ack = self.assignment_repo.create(assignment).await.map_err(|e| {
            error!("Failed to create assignment: {e}");
            e
        })?;
        info!(inserted_id = %ack.inserted_id, "Assignment created");
        Ok(ack)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_assignment(&self, id: ObjectId) -> Result<Assignment, ServiceError> {
        self.assignment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Assignment {} not found", id)))
    }

    #[instrument(skip(self))]
    async fn list_assignments(&self, query: AssignmentQuery) -> Result<Vec<Assignment>, ServiceError> {
        let assignments = self.assignment_repo.list(query).await?;
        info!("Listed {} assignments", assignments.len());
        Ok(assignments)
    }

    #[instrument(skip(self, fields), fields(id = %id))]
    async fn update_assignment(&self, id: ObjectId, fields: UpdateAssignmentRequest) -> Result<UpdateAck, ServiceError> {
        info!("Updating assignment");
        Ok(self.assignment_repo.update_fields(id, fields).await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_assignment(&self, id: ObjectId) -> Result<DeleteAck, ServiceError> {
        let ack = self.assignment_repo.delete(id).await?;
        info!(deleted = ack.deleted_count, "Assignment delete processed");
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory_repo::MemoryAssignmentRepository;

    fn service() -> AssignmentServiceImpl {
        AssignmentServiceImpl::new(Arc::new(MemoryAssignmentRepository::new()))
    }

    #[tokio::test]
    async fn test_get_missing_assignment_is_not_found() {
        let err = service().get_assignment(ObjectId::new()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let ack = service
            .create_assignment(Assignment {
                title: Some("Linked lists".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = ObjectId::parse_str(&ack.inserted_id).unwrap();
        let fetched = service.get_assignment(id).await.unwrap();
        assert_eq!(fetched.title.as_deref(), Some("Linked lists"));
    }

    #[tokio::test]
    async fn test_delete_missing_assignment_reports_zero() {
        let ack = service().delete_assignment(ObjectId::new()).await.unwrap();
        assert_eq!(ack.deleted_count, 0);
    }
}
