use mongodb::error::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Unique index violation (E11000) or the in-memory equivalent.
    #[error("Already Exists: {0}")]
    AlreadyExists(String),
    #[error("Database Error: {0}")]
    Database(String),
    #[error("Connection Error: {0}")]
    Connection(String),
    /// A stored document could not be read into its model.
    #[error("Serialization Error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    pub fn already_exists<T: Into<String>>(msg: T) -> Self {
        RepositoryError::AlreadyExists(msg.into())
    }

    pub fn database<T: Into<String>>(msg: T) -> Self {
        RepositoryError::Database(msg.into())
    }

    pub fn connection<T: Into<String>>(msg: T) -> Self {
        RepositoryError::Connection(msg.into())
    }
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(_) if err.to_string().contains("E11000") => {
                RepositoryError::AlreadyExists(format!("Duplicate key: {}", err))
            }
            ErrorKind::Authentication { .. } => {
                RepositoryError::Connection(format!("Authentication failed: {}", err))
            }
            ErrorKind::Io(_) | ErrorKind::ServerSelection { .. } => {
                RepositoryError::Connection(err.to_string())
            }
            ErrorKind::BsonDeserialization(_) => {
                RepositoryError::Serialization(format!("BSON deserialization error: {}", err))
            }
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(RepositoryError::already_exists("a@x.com").to_string(), "Already Exists: a@x.com");
        assert_eq!(RepositoryError::database("boom").to_string(), "Database Error: boom");
        assert_eq!(RepositoryError::connection("refused").to_string(), "Connection Error: refused");
    }
}
