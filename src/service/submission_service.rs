use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument, warn};

use crate::dto::ack_dto::{DeleteAck, InsertAck, UpdateAck};
use crate::dto::submission_dto::{MarkSubmissionRequest, StatusToggleResponse};
use crate::model::submission::{Submission, SubmissionStatus};
use crate::repository::submission_repo::{SubmissionParty, SubmissionRepository};
use crate::util::error::ServiceError;

/// Guarded writes lost to concurrent toggles before giving up with a conflict.
pub const MAX_TOGGLE_ATTEMPTS: usize = 3;

#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn create_submission(&self, submission: Submission) -> Result<InsertAck, ServiceError>;
    async fn get_submission(&self, id: ObjectId) -> Result<Submission, ServiceError>;
    async fn list_submissions(&self, party: SubmissionParty, email: &str) -> Result<Vec<Submission>, ServiceError>;
    async fn toggle_status(&self, id: ObjectId) -> Result<StatusToggleResponse, ServiceError>;
    async fn mark_submission(&self, id: ObjectId, mark: MarkSubmissionRequest) -> Result<UpdateAck, ServiceError>;
    async fn delete_submission(&self, id: ObjectId) -> Result<DeleteAck, ServiceError>;
}

pub struct SubmissionServiceImpl {
    pub submission_repo: Arc<dyn SubmissionRepository>,
}

impl SubmissionServiceImpl {
    pub fn new(submission_repo: Arc<dyn SubmissionRepository>) -> Self {
        Self { submission_repo }
    }
}

#[async_trait]
impl SubmissionService for SubmissionServiceImpl {
    #[instrument(skip(self, submission), fields(user_email = ?submission.user_email))]
    async fn create_submission(&self, mut submission: Submission) -> Result<InsertAck, ServiceError> {
        if let Some(status) = submission.status.as_ref().filter(|s| **s != SubmissionStatus::Pending) {
            warn!("Ignoring client-supplied status '{}' on new submission", status);
        }
        submission.status = Some(SubmissionStatus::Pending);

        let ack = self.submission_repo.create(submission).await.map_err(|e| {
            error!("Failed to create submission: {e}");
            e
        })?;
        info!(inserted_id = %ack.inserted_id, "Submission created");
        Ok(ack)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_submission(&self, id: ObjectId) -> Result<Submission, ServiceError> {
        self.submission_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Submission {} not found", id)))
    }

    #[instrument(skip(self))]
    async fn list_submissions(&self, party: SubmissionParty, email: &str) -> Result<Vec<Submission>, ServiceError> {
        Ok(self.submission_repo.list_by_party(party, email).await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn toggle_status(&self, id: ObjectId) -> Result<StatusToggleResponse, ServiceError> {
        for attempt in 1..=MAX_TOGGLE_ATTEMPTS {
            let current = self
                .submission_repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Submission {} not found", id)))?;

            let observed = current.status.as_ref();
            let next = SubmissionStatus::toggled(observed);
            let ack = self.submission_repo.replace_status(id, observed, &next).await?;

            if ack.matched_count > 0 {
                info!(from = ?observed, to = %next, "Submission status toggled");
                return Ok(StatusToggleResponse { ack, status: next });
            }
            warn!(attempt, "Submission status changed concurrently, retrying toggle");
        }

        error!("Giving up on status toggle after {} attempts", MAX_TOGGLE_ATTEMPTS);
        Err(ServiceError::Conflict(format!(
            "Status of submission {} kept changing, try again",
            id
        )))
    }

    #[instrument(skip(self, mark), fields(id = %id))]
    async fn mark_submission(&self, id: ObjectId, mark: MarkSubmissionRequest) -> Result<UpdateAck, ServiceError> {
        info!("Recording feedback and mark");
        Ok(self.submission_repo.upsert_mark(id, mark).await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_submission(&self, id: ObjectId) -> Result<DeleteAck, ServiceError> {
        let ack = self.submission_repo.delete(id).await?;
        info!(deleted = ack.deleted_count, "Submission delete processed");
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory_repo::MemorySubmissionRepository;
    use crate::repository::repository_error::RepositoryResult;

    async fn seeded(status: Option<SubmissionStatus>) -> (Arc<MemorySubmissionRepository>, ObjectId) {
        let repo = Arc::new(MemorySubmissionRepository::new());
        let ack = repo
            .create(Submission {
                user_email: Some("s@x.com".to_string()),
                status,
                ..Default::default()
            })
            .await
            .unwrap();
        (repo, ObjectId::parse_str(&ack.inserted_id).unwrap())
    }

    #[tokio::test]
    async fn test_create_forces_pending() {
        let service = SubmissionServiceImpl::new(Arc::new(MemorySubmissionRepository::new()));
        let ack = service
            .create_submission(Submission {
                status: Some(SubmissionStatus::Complete),
                ..Default::default()
            })
            .await
            .unwrap();
        let stored = service
            .get_submission(ObjectId::parse_str(&ack.inserted_id).unwrap())
            .await
            .unwrap();
        assert_eq!(stored.status, Some(SubmissionStatus::Pending));
    }

    #[tokio::test]
    async fn test_toggle_round_trip() {
        let (repo, id) = seeded(Some(SubmissionStatus::Pending)).await;
        let service = SubmissionServiceImpl::new(repo);

        let first = service.toggle_status(id).await.unwrap();
        assert_eq!(first.status, SubmissionStatus::Complete);
        assert_eq!(first.ack.modified_count, 1);

        let second = service.toggle_status(id).await.unwrap();
        assert_eq!(second.status, SubmissionStatus::Pending);
    }

    #[tokio::test]
    async fn test_toggle_normalizes_missing_and_unknown_status() {
        let (repo, id) = seeded(None).await;
        let service = SubmissionServiceImpl::new(repo);
        assert_eq!(service.toggle_status(id).await.unwrap().status, SubmissionStatus::Pending);

        let (repo, id) = seeded(Some(SubmissionStatus::Other("graded".to_string()))).await;
        let service = SubmissionServiceImpl::new(repo);
        assert_eq!(service.toggle_status(id).await.unwrap().status, SubmissionStatus::Pending);
    }

    #[tokio::test]
    async fn test_toggle_missing_submission_is_not_found() {
        let service = SubmissionServiceImpl::new(Arc::new(MemorySubmissionRepository::new()));
        let err = service.toggle_status(ObjectId::new()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    /// Every guarded write loses, as if another toggle always got there first.
    struct AlwaysRacing(MemorySubmissionRepository);

    #[async_trait]
    impl SubmissionRepository for AlwaysRacing {
        async fn create(&self, submission: Submission) -> RepositoryResult<InsertAck> {
            self.0.create(submission).await
        }
        async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Submission>> {
            self.0.find_by_id(id).await
        }
        async fn list_by_party(&self, party: SubmissionParty, email: &str) -> RepositoryResult<Vec<Submission>> {
            self.0.list_by_party(party, email).await
        }
        async fn replace_status(
            &self,
            _id: ObjectId,
            _expected: Option<&SubmissionStatus>,
            _next: &SubmissionStatus,
        ) -> RepositoryResult<UpdateAck> {
            Ok(UpdateAck::new(0, 0, None))
        }
        async fn upsert_mark(&self, id: ObjectId, mark: MarkSubmissionRequest) -> RepositoryResult<UpdateAck> {
            self.0.upsert_mark(id, mark).await
        }
        async fn delete(&self, id: ObjectId) -> RepositoryResult<DeleteAck> {
            self.0.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_toggle_gives_up_with_conflict() {
        let repo = AlwaysRacing(MemorySubmissionRepository::new());
        let ack = repo.create(Submission::default()).await.unwrap();
        let service = SubmissionServiceImpl::new(Arc::new(repo));

        let err = service
            .toggle_status(ObjectId::parse_str(&ack.inserted_id).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }
}
