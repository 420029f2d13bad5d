use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::service::user_service::UserServiceImpl;
use crate::util::error::HandlerError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

/// Shared by the bearer and admin guards.
pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub user_service: Arc<UserServiceImpl>,
}

/// Rejects requests without a valid bearer token. On success the decoded
/// [`Claims`](crate::util::jwt::Claims) are available as a request extension.
pub async fn verify_token(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let Some(auth_header) = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        debug!("Missing authorization header");
        return Err(HandlerError::unauthorized());
    };

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| HandlerError::unauthorized())?;

    let claims = state.jwt_utils.validate_token(&token).map_err(|e| {
        warn!("Rejected bearer token: {e}");
        HandlerError::unauthorized()
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
