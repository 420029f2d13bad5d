pub mod assignment_router;
pub mod auth_router;
pub mod submission_router;
pub mod user_router;
