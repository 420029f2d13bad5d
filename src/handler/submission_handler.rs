use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};

use crate::dto::assignment_dto::EmailQuery;
use crate::dto::document_dto::DocumentResponse;
use crate::dto::submission_dto::MarkSubmissionRequest;
use crate::handler::{parse_object_id, required_email};
use crate::model::submission::Submission;
use crate::repository::submission_repo::SubmissionParty;
use crate::service::ensure_same_owner;
use crate::service::submission_service::{SubmissionService, SubmissionServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

async fn list_for_party(
    service: &SubmissionServiceImpl,
    claims: &Claims,
    query: Result<Query<EmailQuery>, QueryRejection>,
    party: SubmissionParty,
) -> Result<Vec<Submission>, HandlerError> {
    let Query(query) = query?;
    let email = required_email(query)?;
    ensure_same_owner(claims.email.as_deref(), &email)?;
    Ok(service.list_submissions(party, &email).await?)
}

// POST /submitAssignment
pub async fn create_submission_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    payload: Result<Json<Submission>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(submission) = payload?;
    let ack = service.create_submission(submission).await?;
    Ok(Json(ack))
}

// GET /submitAssignment?email=
pub async fn list_submitted_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    Extension(claims): Extension<Claims>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let submissions = list_for_party(&service, &claims, query, SubmissionParty::Submitter).await?;
    Ok(Json(DocumentResponse::from_documents(submissions)))
}

// GET /markAssignment?email=
pub async fn list_to_mark_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    Extension(claims): Extension<Claims>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let submissions = list_for_party(&service, &claims, query, SubmissionParty::Grader).await?;
    Ok(Json(DocumentResponse::from_documents(submissions)))
}

// GET /submitAssignment/{id}
pub async fn get_submission_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    let submission = service.get_submission(id).await?;
    Ok(Json(DocumentResponse::from_document(submission)))
}

// DELETE /submitAssignment/{id}
pub async fn delete_submission_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    let ack = service.delete_submission(id).await?;
    Ok(Json(ack))
}

// PATCH /mark/user/{id}
pub async fn toggle_status_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    let toggled = service.toggle_status(id).await?;
    Ok(Json(toggled))
}

// PUT /mark/user/{id}
pub async fn mark_submission_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    Path(id): Path<String>,
    payload: Result<Json<MarkSubmissionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    let Json(mark) = payload?;
    let ack = service.mark_submission(id, mark).await?;
    Ok(Json(ack))
}
