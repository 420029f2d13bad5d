pub mod assignment_repo;
pub mod memory_repo;
pub mod mongo_store;
pub mod repository_error;
pub mod submission_repo;
pub mod user_repo;
