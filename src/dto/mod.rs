pub mod ack_dto;
pub mod assignment_dto;
pub mod auth_dto;
pub mod document_dto;
pub mod submission_dto;
pub mod user_dto;
