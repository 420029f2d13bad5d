use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};

use crate::dto::assignment_dto::{EmailQuery, UpdateAssignmentRequest};
use crate::dto::document_dto::DocumentResponse;
use crate::handler::{parse_object_id, required_email};
use crate::model::assignment::Assignment;
use crate::repository::assignment_repo::AssignmentQuery;
use crate::service::assignment_service::{AssignmentService, AssignmentServiceImpl};
use crate::service::ensure_same_owner;
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

// POST /assignment
pub async fn create_assignment_handler(
    State(service): State<Arc<AssignmentServiceImpl>>,
    payload: Result<Json<Assignment>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(assignment) = payload?;
    let ack = service.create_assignment(assignment).await?;
    Ok(Json(ack))
}

// GET /assignment?email=  (newest due date first)
pub async fn list_assignments_handler(
    State(service): State<Arc<AssignmentServiceImpl>>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Query(query) = query?;
    let email = required_email(query)?;
    let assignments = service
        .list_assignments(AssignmentQuery {
            owner_email: Some(email),
            sort_by_due_date: true,
        })
        .await?;
    Ok(Json(DocumentResponse::from_documents(assignments)))
}

// GET /allAssignment
pub async fn list_all_assignments_handler(
    State(service): State<Arc<AssignmentServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let assignments = service.list_assignments(AssignmentQuery::default()).await?;
    Ok(Json(DocumentResponse::from_documents(assignments)))
}

// GET /assignmentAl?email=
pub async fn list_owned_assignments_handler(
    State(service): State<Arc<AssignmentServiceImpl>>,
    Extension(claims): Extension<Claims>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Query(query) = query?;
    let email = required_email(query)?;
    ensure_same_owner(claims.email.as_deref(), &email)?;
    let assignments = service
        .list_assignments(AssignmentQuery {
            owner_email: Some(email),
            sort_by_due_date: false,
        })
        .await?;
    Ok(Json(DocumentResponse::from_documents(assignments)))
}

// GET /assignment/{id}
pub async fn get_assignment_handler(
    State(service): State<Arc<AssignmentServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    let assignment = service.get_assignment(id).await?;
    Ok(Json(DocumentResponse::from_document(assignment)))
}

// PATCH /assignment/{id}
pub async fn update_assignment_handler(
    State(service): State<Arc<AssignmentServiceImpl>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAssignmentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    let Json(fields) = payload?;
    let ack = service.update_assignment(id, fields).await?;
    Ok(Json(ack))
}

// DELETE /assignment/{id}
pub async fn delete_assignment_handler(
    State(service): State<Arc<AssignmentServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    let ack = service.delete_assignment(id).await?;
    Ok(Json(ack))
}
