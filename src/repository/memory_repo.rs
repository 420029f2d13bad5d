//! In-process document store with the same observable semantics as the Mongo
//! repositories: generated ids, owner filters, due-date ordering, upserts,
//! guarded status writes and email uniqueness.
//!
//! Selected with `STORE_BACKEND=memory`; the test suite runs against it.

use std::cmp::Ordering;

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::dto::ack_dto::{DeleteAck, InsertAck, UpdateAck};
use crate::dto::assignment_dto::UpdateAssignmentRequest;
use crate::dto::submission_dto::MarkSubmissionRequest;
use crate::model::assignment::Assignment;
use crate::model::submission::{Submission, SubmissionStatus};
use crate::model::user::User;
use crate::repository::assignment_repo::{AssignmentQuery, AssignmentRepository};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::submission_repo::{SubmissionParty, SubmissionRepository};
use crate::repository::user_repo::UserRepository;

fn delete_by_id<T>(docs: &mut Vec<T>, id: ObjectId, id_of: impl Fn(&T) -> Option<ObjectId>) -> DeleteAck {
    let before = docs.len();
    docs.retain(|doc| id_of(doc) != Some(id));
    DeleteAck::new((before - docs.len()) as u64)
}

/// Position of a value's type in Mongo's cross-type sort order.
fn type_rank(value: Option<&Bson>) -> u8 {
    match value {
        None | Some(Bson::Null) | Some(Bson::Undefined) => 0,
        Some(Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_)) => 1,
        Some(Bson::String(_) | Bson::Symbol(_)) => 2,
        Some(Bson::Document(_)) => 3,
        Some(Bson::Array(_)) => 4,
        Some(Bson::Binary(_)) => 5,
        Some(Bson::ObjectId(_)) => 6,
        Some(Bson::Boolean(_)) => 7,
        Some(Bson::DateTime(_)) => 8,
        Some(Bson::Timestamp(_)) => 9,
        Some(_) => 10,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

/// Ascending comparison of two field values the way Mongo sorts them.
fn compare_bson(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let by_type = type_rank(a).cmp(&type_rank(b));
    if by_type != Ordering::Equal {
        return by_type;
    }
    match (a, b) {
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(Bson::DateTime(x)), Some(Bson::DateTime(y))) => x.cmp(y),
        (Some(Bson::Boolean(x)), Some(Bson::Boolean(y))) => x.cmp(y),
        (Some(Bson::ObjectId(x)), Some(Bson::ObjectId(y))) => x.bytes().cmp(&y.bytes()),
        (Some(x), Some(y)) => match (as_number(x), as_number(y)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}

#[derive(Default)]
pub struct MemoryAssignmentRepository {
    docs: RwLock<Vec<Assignment>>,
}

impl MemoryAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssignmentRepository for MemoryAssignmentRepository {
    async fn create(&self, mut assignment: Assignment) -> RepositoryResult<InsertAck> {
        let id = ObjectId::new();
        assignment.id = Some(id);
        self.docs.write().await.push(assignment);
        debug!(id = %id, "Stored assignment in memory");
        Ok(InsertAck::new(id.to_hex()))
    }

    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Assignment>> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|a| a.id == Some(id)).cloned())
    }

    async fn list(&self, query: AssignmentQuery) -> RepositoryResult<Vec<Assignment>> {
        let docs = self.docs.read().await;
        let mut found: Vec<Assignment> = docs
            .iter()
            .filter(|a| match &query.owner_email {
                Some(email) => a.owner_email.as_deref() == Some(email.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        if query.sort_by_due_date {
            // Descending; documents without a due date sort last.
            found.sort_by(|a, b| compare_bson(b.assignment_last_date.as_ref(), a.assignment_last_date.as_ref()));
        }
        Ok(found)
    }

    async fn update_fields(&self, id: ObjectId, fields: UpdateAssignmentRequest) -> RepositoryResult<UpdateAck> {
        let mut docs = self.docs.write().await;
        let Some(doc) = docs.iter_mut().find(|a| a.id == Some(id)) else {
            return Ok(UpdateAck::new(0, 0, None));
        };
        let updated = Assignment {
            id: doc.id,
            title: fields.title,
            difficulty_level: fields.difficulty_level,
            assignment_number: fields.assignment_number,
            description: fields.description,
            assignment_last_date: fields.assignment_last_date,
            image: fields.image,
            owner_email: doc.owner_email.clone(),
            extra: doc.extra.clone(),
        };
        let modified = u64::from(*doc != updated);
        *doc = updated;
        Ok(UpdateAck::new(1, modified, None))
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<DeleteAck> {
        let mut docs = self.docs.write().await;
        Ok(delete_by_id(&mut docs, id, |a| a.id))
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    docs: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<InsertAck> {
        // Check and insert under one write lock, like a unique index.
        let mut docs = self.docs.write().await;
        if docs.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::already_exists(format!("Duplicate key: email {}", user.email)));
        }
        let id = ObjectId::new();
        user.id = Some(id);
        docs.push(user);
        info!(id = %id, "Stored user in memory");
        Ok(InsertAck::new(id.to_hex()))
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.docs.read().await.clone())
    }
}

#[derive(Default)]
pub struct MemorySubmissionRepository {
    docs: RwLock<Vec<Submission>>,
}

impl MemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionRepository for MemorySubmissionRepository {
    async fn create(&self, mut submission: Submission) -> RepositoryResult<InsertAck> {
        let id = ObjectId::new();
        submission.id = Some(id);
        self.docs.write().await.push(submission);
        Ok(InsertAck::new(id.to_hex()))
    }

    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Submission>> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn list_by_party(&self, party: SubmissionParty, email: &str) -> RepositoryResult<Vec<Submission>> {
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .filter(|s| {
                let field = match party {
                    SubmissionParty::Submitter => &s.user_email,
                    SubmissionParty::Grader => &s.owner_email,
                };
                field.as_deref() == Some(email)
            })
            .cloned()
            .collect())
    }

    async fn replace_status(
        &self,
        id: ObjectId,
        expected: Option<&SubmissionStatus>,
        next: &SubmissionStatus,
    ) -> RepositoryResult<UpdateAck> {
        let mut docs = self.docs.write().await;
        let Some(doc) = docs
            .iter_mut()
            .find(|s| s.id == Some(id) && s.status.as_ref() == expected)
        else {
            return Ok(UpdateAck::new(0, 0, None));
        };
        let modified = u64::from(doc.status.as_ref() != Some(next));
        doc.status = Some(next.clone());
        Ok(UpdateAck::new(1, modified, None))
    }

    async fn upsert_mark(&self, id: ObjectId, mark: MarkSubmissionRequest) -> RepositoryResult<UpdateAck> {
        let mut docs = self.docs.write().await;
        match docs.iter_mut().find(|s| s.id == Some(id)) {
            Some(doc) => {
                let modified = u64::from(doc.feedback != mark.feedback || doc.obtain_marks != mark.obtain_marks);
                doc.feedback = mark.feedback;
                doc.obtain_marks = mark.obtain_marks;
                Ok(UpdateAck::new(1, modified, None))
            }
            None => {
                docs.push(Submission {
                    id: Some(id),
                    feedback: mark.feedback,
                    obtain_marks: mark.obtain_marks,
                    ..Default::default()
                });
                Ok(UpdateAck::new(0, 0, Some(id.to_hex())))
            }
        }
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<DeleteAck> {
        let mut docs = self.docs.write().await;
        Ok(delete_by_id(&mut docs, id, |s| s.id))
    }
}
