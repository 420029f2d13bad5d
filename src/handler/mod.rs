pub mod assignment_handler;
pub mod auth_handler;
pub mod submission_handler;
pub mod user_handler;

use bson::oid::ObjectId;
use validator::Validate;

use crate::dto::assignment_dto::EmailQuery;
use crate::util::error::HandlerError;

/// Path ids must be 24-character hex object ids.
pub(crate) fn parse_object_id(raw: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(raw).map_err(|e| HandlerError::bad_request(format!("Invalid id: {}", raw)).with_details(e.to_string()))
}

pub(crate) fn validate_request<T: Validate>(payload: &T) -> Result<(), HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::bad_request(format!("Validation error: {}", e)))
}

/// Owner-scoped listings need a well-formed `email` query parameter.
pub(crate) fn required_email(query: EmailQuery) -> Result<String, HandlerError> {
    validate_request(&query)?;
    query
        .email
        .ok_or_else(|| HandlerError::bad_request("Missing required query parameter: email"))
}
