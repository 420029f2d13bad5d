use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, response::IntoResponse, Json};
use serde_json::Value;
use tracing::{error, info};

use crate::dto::auth_dto::TokenResponse;
use crate::util::error::HandlerError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

/// Signs whatever JSON object the caller sends.
pub async fn issue_token_handler(
    State(jwt_utils): State<Arc<JwtTokenUtilsImpl>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    let Value::Object(claims) = payload else {
        return Err(HandlerError::bad_request("Token payload must be a JSON object"));
    };

    let token = jwt_utils.issue_token(claims).map_err(|e| {
        error!("Failed to issue token: {e}");
        HandlerError::internal()
    })?;
    info!("Token issued");
    Ok(Json(TokenResponse { token }))
}
