use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::options::UpdateOptions;
use tracing::{error, info};

use crate::dto::ack_dto::{DeleteAck, InsertAck, UpdateAck};
use crate::dto::submission_dto::MarkSubmissionRequest;
use crate::model::submission::{Submission, SubmissionStatus};
use crate::repository::mongo_store::MongoStore;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Which email field a submission listing filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionParty {
    /// The student who submitted (`userEmail`).
    Submitter,
    /// The instructor who grades (`ownerEmail`).
    Grader,
}

impl SubmissionParty {
    pub fn field_name(&self) -> &'static str {
        match self {
            SubmissionParty::Submitter => "userEmail",
            SubmissionParty::Grader => "ownerEmail",
        }
    }
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: Submission) -> RepositoryResult<InsertAck>;
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Submission>>;
    async fn list_by_party(&self, party: SubmissionParty, email: &str) -> RepositoryResult<Vec<Submission>>;
    /// Writes `next` only while the stored status still equals `expected`
    /// (`None` meaning null or absent). A lost race reports `matchedCount: 0`.
    async fn replace_status(
        &self,
        id: ObjectId,
        expected: Option<&SubmissionStatus>,
        next: &SubmissionStatus,
    ) -> RepositoryResult<UpdateAck>;
    /// Sets feedback and mark, creating the document when it does not exist.
    async fn upsert_mark(&self, id: ObjectId, mark: MarkSubmissionRequest) -> RepositoryResult<UpdateAck>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<DeleteAck>;
}

pub struct MongoSubmissionRepository {
    collection: mongodb::Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoSubmissionRepository { collection: store.submissions() }
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    #[tracing::instrument(skip(self, submission))]
    async fn create(&self, mut submission: Submission) -> RepositoryResult<InsertAck> {
        submission.id = Some(ObjectId::new());
        let result = self.collection.insert_one(&submission, None).await.map_err(|e| {
            error!("Failed to create submission: {}", e);
            RepositoryError::from(e)
        })?;
        info!("Submission created successfully");
        Ok(InsertAck::from(result))
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Submission>> {
        self.collection.find_one(doc! { "_id": id }, None).await.map_err(|e| {
            error!("Failed to fetch submission by ID: {}", e);
            RepositoryError::from(e)
        })
    }

    #[tracing::instrument(skip(self))]
    async fn list_by_party(&self, party: SubmissionParty, email: &str) -> RepositoryResult<Vec<Submission>> {
        let mut filter = Document::new();
        filter.insert(party.field_name(), email);
        let cursor = self
            .collection
            .find(filter, None)
            .await
            .map_err(|e| {
                error!("Failed to list submissions: {}", e);
                RepositoryError::from(e)
            })?;
        let submissions: Vec<Submission> = cursor.try_collect().await?;
        info!("Fetched {} submissions", submissions.len());
        Ok(submissions)
    }

    #[tracing::instrument(skip(self), fields(id = %id, next = %next))]
    async fn replace_status(
        &self,
        id: ObjectId,
        expected: Option<&SubmissionStatus>,
        next: &SubmissionStatus,
    ) -> RepositoryResult<UpdateAck> {
        // A null match also covers documents where the field is missing.
        let expected = expected.map(Bson::from).unwrap_or(Bson::Null);
        let filter = doc! { "_id": id, "status": expected };
        let update = doc! { "$set": { "status": Bson::from(next) } };
        let result = self.collection.update_one(filter, update, None).await.map_err(|e| {
            error!("Failed to update submission status: {}", e);
            RepositoryError::from(e)
        })?;
        Ok(UpdateAck::from(result))
    }

    #[tracing::instrument(skip(self, mark), fields(id = %id))]
    async fn upsert_mark(&self, id: ObjectId, mark: MarkSubmissionRequest) -> RepositoryResult<UpdateAck> {
        let update = doc! {
            "$set": {
                "feedback": mark.feedback,
                "obtainMarks": mark.obtain_marks,
            }
        };
        let options = UpdateOptions::builder().upsert(true).build();
        let result = self
            .collection
            .update_one(doc! { "_id": id }, update, options)
            .await
            .map_err(|e| {
                error!("Failed to upsert submission mark: {}", e);
                RepositoryError::from(e)
            })?;
        info!(matched = result.matched_count, upserted = result.upserted_id.is_some(), "Submission mark applied");
        Ok(UpdateAck::from(result))
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<DeleteAck> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await.map_err(|e| {
            error!("Failed to delete submission: {}", e);
            RepositoryError::from(e)
        })?;
        Ok(DeleteAck::from(result))
    }
}
