use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use tracing::warn;

use crate::dto::document_dto::DocumentResponse;
use crate::dto::user_dto::{AdminCheckResponse, CreateUserRequest};
use crate::handler::validate_request;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

// POST /users
pub async fn create_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    validate_request(&payload)?;
    let res = service.create_user(payload.into()).await?;
    Ok(Json(res))
}

// GET /users (admin only)
pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let users = service.list_users().await?;
    Ok(Json(DocumentResponse::from_documents(users)))
}

// GET /users/admin/{email}
pub async fn check_admin_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Extension(claims): Extension<Claims>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    if claims.email.as_deref() != Some(email.as_str()) {
        warn!(requested = %email, "Admin check for another identity denied");
        return Err(HandlerError::forbidden());
    }
    let admin = service.is_admin(&email).await?;
    Ok(Json(AdminCheckResponse { admin }))
}
