use axum::{middleware, routing::{get, patch, post}, Router};
use std::sync::Arc;

use crate::handler::assignment_handler::{
    create_assignment_handler,
    delete_assignment_handler,
    get_assignment_handler,
    list_all_assignments_handler,
    list_assignments_handler,
    list_owned_assignments_handler,
    update_assignment_handler,
};
use crate::middlewares::auth_middleware::{verify_token, AuthState};
use crate::service::assignment_service::AssignmentServiceImpl;

pub fn assignment_router(service: Arc<AssignmentServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/assignment", post(create_assignment_handler).get(list_assignments_handler))
        .route("/assignment/{id}", get(get_assignment_handler))
        .route("/allAssignment", get(list_all_assignments_handler));

    // Bearer-protected
    let protected = Router::new()
        .route(
            "/assignment/{id}",
            patch(update_assignment_handler).delete(delete_assignment_handler),
        )
        .route("/assignmentAl", get(list_owned_assignments_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, verify_token));

    public.merge(protected).with_state(service)
}
