pub mod assignment_service;
pub mod submission_service;
pub mod user_service;

use crate::util::error::ServiceError;

/// Owner-scoped listings: a token that names an email may only read that
/// email's records. Tokens without an email are not restricted.
pub fn ensure_same_owner(caller_email: Option<&str>, requested_email: &str) -> Result<(), ServiceError> {
    match caller_email {
        Some(caller) if caller != requested_email => Err(ServiceError::Forbidden(format!(
            "{} may not read records of {}",
            caller, requested_email
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_same_owner() {
        assert!(ensure_same_owner(Some("a@x.com"), "a@x.com").is_ok());
        assert!(ensure_same_owner(None, "a@x.com").is_ok());
        assert!(matches!(
            ensure_same_owner(Some("b@x.com"), "a@x.com"),
            Err(ServiceError::Forbidden(_))
        ));
    }
}
