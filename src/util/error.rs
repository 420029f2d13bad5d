use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::repository::repository_error::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    NotFound,
    Internal,
    Unauthorized,
    Forbidden,
    Conflict,
    BadRequest,
}

impl HandlerErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerErrorKind::Forbidden => StatusCode::FORBIDDEN,
            HandlerErrorKind::Conflict => StatusCode::CONFLICT,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Internal => "Internal",
            HandlerErrorKind::Unauthorized => "Unauthorized",
            HandlerErrorKind::Forbidden => "Forbidden",
            HandlerErrorKind::Conflict => "Conflict",
            HandlerErrorKind::BadRequest => "BadRequest",
        };
        write!(f, "{}", s)
    }
}

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub details: Option<String>,
}

impl HandlerError {
    pub fn new(error: HandlerErrorKind, message: impl Into<String>) -> Self {
        HandlerError { error, message: message.into(), details: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(HandlerErrorKind::BadRequest, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(HandlerErrorKind::Unauthorized, "Forbidden Access")
    }

    pub fn forbidden() -> Self {
        Self::new(HandlerErrorKind::Forbidden, "forbidden access")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(HandlerErrorKind::NotFound, message)
    }

    pub fn internal() -> Self {
        Self::new(HandlerErrorKind::Internal, "Internal Server Error")
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        (status, axum::Json(self)).into_response()
    }
}

impl From<JsonRejection> for HandlerError {
    fn from(rejection: JsonRejection) -> Self {
        HandlerError::bad_request("Invalid request body").with_details(rejection.body_text())
    }
}

impl From<QueryRejection> for HandlerError {
    fn from(rejection: QueryRejection) -> Self {
        HandlerError::bad_request("Invalid query string").with_details(rejection.body_text())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists(msg) => ServiceError::Conflict(msg),
            RepositoryError::Database(msg)
            | RepositoryError::Connection(msg)
            | RepositoryError::Serialization(msg) => ServiceError::InternalError(msg),
        }
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => HandlerError::not_found(msg),
            ServiceError::Forbidden(_) => HandlerError::forbidden(),
            ServiceError::Conflict(msg) => HandlerError::new(HandlerErrorKind::Conflict, msg),
            ServiceError::InternalError(msg) => {
                // Logged here, never sent to the caller.
                error!("Internal error: {}", msg);
                HandlerError::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(HandlerErrorKind::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(HandlerErrorKind::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(HandlerErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(HandlerErrorKind::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(HandlerErrorKind::Internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_errors_do_not_leak() {
        let err = HandlerError::from(ServiceError::InternalError("connection refused 10.0.0.3:27017".to_string()));
        assert_eq!(err.error, HandlerErrorKind::Internal);
        assert_eq!(err.message, "Internal Server Error");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_repository_errors_map_to_service_errors() {
        assert!(matches!(ServiceError::from(RepositoryError::already_exists("x")), ServiceError::Conflict(_)));
        assert!(matches!(ServiceError::from(RepositoryError::connection("x")), ServiceError::InternalError(_)));
    }
}
