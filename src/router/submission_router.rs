use axum::{middleware, routing::{get, patch, post, put}, Router};
use std::sync::Arc;

use crate::handler::submission_handler::{
    create_submission_handler,
    delete_submission_handler,
    get_submission_handler,
    list_submitted_handler,
    list_to_mark_handler,
    mark_submission_handler,
    toggle_status_handler,
};
use crate::middlewares::auth_middleware::{verify_token, AuthState};
use crate::service::submission_service::SubmissionServiceImpl;

pub fn submission_router(service: Arc<SubmissionServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/submitAssignment", post(create_submission_handler))
        .route(
            "/submitAssignment/{id}",
            get(get_submission_handler).delete(delete_submission_handler),
        )
        .route("/mark/user/{id}", put(mark_submission_handler));

    // Bearer-protected
    let protected = Router::new()
        .route("/submitAssignment", get(list_submitted_handler))
        .route("/markAssignment", get(list_to_mark_handler))
        .route("/mark/user/{id}", patch(toggle_status_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, verify_token));

    public.merge(protected).with_state(service)
}
