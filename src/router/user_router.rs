use axum::{middleware, routing::{get, post}, Router};
use std::sync::Arc;

use crate::handler::user_handler::{check_admin_handler, create_user_handler, list_users_handler};
use crate::middlewares::admin_middleware::verify_admin;
use crate::middlewares::auth_middleware::{verify_token, AuthState};
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/users", post(create_user_handler));

    let bearer = Router::new()
        .route("/users/admin/{email}", get(check_admin_handler))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), verify_token));

    // Layers run outermost-last: verify_token wraps verify_admin.
    let admin = Router::new()
        .route("/users", get(list_users_handler))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), verify_admin))
        .route_layer(middleware::from_fn_with_state(auth_state, verify_token));

    public
        .merge(bearer)
        .merge(admin)
        .with_state(service)
}
