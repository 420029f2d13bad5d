use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handler::auth_handler::issue_token_handler;
use crate::util::jwt::JwtTokenUtilsImpl;

pub fn auth_router(jwt_utils: Arc<JwtTokenUtilsImpl>) -> Router {
    Router::new()
        .route("/jwt", post(issue_token_handler))
        .with_state(jwt_utils)
}
