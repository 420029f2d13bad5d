use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use tracing::{error, warn};

use crate::middlewares::auth_middleware::AuthState;
use crate::service::user_service::UserService;
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

/// Admits only callers whose stored user has the admin role. Must run after
/// [`verify_token`](crate::middlewares::auth_middleware::verify_token).
pub async fn verify_admin(
    State(state): State<Arc<AuthState>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let Some(claims) = req.extensions().get::<Claims>() else {
        error!("Admin guard reached without decoded claims");
        return Err(HandlerError::internal());
    };

    let Some(email) = claims.email.clone() else {
        warn!("Token carries no email, denying admin access");
        return Err(HandlerError::forbidden());
    };

    if !state.user_service.is_admin(&email).await? {
        warn!(email = %email, "Admin access denied");
        return Err(HandlerError::forbidden());
    }

    Ok(next.run(req).await)
}
