use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// MongoDB configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database holding assignments and submissions
    pub database: String,
    /// Database holding user documents
    pub user_database: String,
    /// Username for authentication (optional)
    pub username: Option<String>,
    /// Password for authentication (optional)
    pub password: Option<String>,
    pub assignment_collection: String,
    pub user_collection: String,
    pub submission_collection: String,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        debug!("{} not set, using default: {}", key, default);
        default.to_string()
    })
}

impl MongoConfig {
    /// Load MongoDB configuration from environment variables
    ///
    /// Expected environment variables:
    /// - MONGO_URI: MongoDB connection URI (required)
    /// - MONGO_DATABASE: Database name (defaults to assignmentedDB)
    /// - MONGO_USER_DATABASE: Database for the users collection (defaults to usersDB)
    /// - MONGO_USERNAME / MONGO_PASSWORD: credentials (optional)
    /// - MONGO_ASSIGNMENT_COLLECTION: defaults to assignmented
    /// - MONGO_USER_COLLECTION: defaults to users
    /// - MONGO_SUBMISSION_COLLECTION: defaults to submitted
    /// - MONGO_POOL_SIZE: Connection pool size (defaults to 10)
    /// - MONGO_CONNECTION_TIMEOUT: Connection timeout in seconds (defaults to 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");

        let uri = env::var("MONGO_URI").map_err(|_| {
            error!("MONGO_URI environment variable not found");
            ConfigError::EnvVarNotFound("MONGO_URI".to_string())
        })?;

        let database = env_or_default("MONGO_DATABASE", "assignmentedDB");
        debug!("MongoDB database: {}", database);
        let user_database = env_or_default("MONGO_USER_DATABASE", "usersDB");
        debug!("MongoDB user database: {}", user_database);

        let username = env::var("MONGO_USERNAME").ok();
        let password = env::var("MONGO_PASSWORD").ok();
        if password.is_some() {
            debug!("MongoDB password provided");
        }

        let assignment_collection = env_or_default("MONGO_ASSIGNMENT_COLLECTION", "assignmented");
        let user_collection = env_or_default("MONGO_USER_COLLECTION", "users");
        let submission_collection = env_or_default("MONGO_SUBMISSION_COLLECTION", "submitted");

        let pool_size = env::var("MONGO_POOL_SIZE")
            .unwrap_or_else(|_| {
                warn!("MONGO_POOL_SIZE not set, using default: 10");
                "10".to_string()
            })
            .parse::<u32>()
            .map_err(|_| {
                error!("Invalid MONGO_POOL_SIZE value");
                ConfigError::InvalidValue("Invalid MONGO_POOL_SIZE value".to_string())
            })?;

        let connection_timeout_secs = env::var("MONGO_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| {
                warn!("MONGO_CONNECTION_TIMEOUT not set, using default: 5 seconds");
                "5".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid MONGO_CONNECTION_TIMEOUT value");
                ConfigError::InvalidValue("Invalid MONGO_CONNECTION_TIMEOUT value".to_string())
            })?;

        let config = MongoConfig {
            uri,
            database,
            user_database,
            username,
            password,
            assignment_collection,
            user_collection,
            submission_collection,
            pool_size,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("MongoDB configuration loaded successfully");
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uri.is_empty() {
            error!("MongoDB URI is empty");
            return Err(ConfigError::ValidationError("MongoDB URI cannot be empty".to_string()));
        }

        if self.database.is_empty() || self.user_database.is_empty() {
            error!("MongoDB database name is empty");
            return Err(ConfigError::ValidationError("MongoDB database cannot be empty".to_string()));
        }

        for (name, value) in [
            ("assignment", &self.assignment_collection),
            ("user", &self.user_collection),
            ("submission", &self.submission_collection),
        ] {
            if value.is_empty() {
                error!("MongoDB {} collection name is empty", name);
                return Err(ConfigError::ValidationError(format!("MongoDB {} collection cannot be empty", name)));
            }
        }

        if self.pool_size == 0 {
            return Err(ConfigError::ValidationError("MongoDB pool size must be greater than 0".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::ValidationError("MongoDB connection timeout must be greater than 0".to_string()));
        }

        match (&self.username, &self.password) {
            (Some(user), _) if user.is_empty() => {
                Err(ConfigError::ValidationError("MongoDB username cannot be empty if set".to_string()))
            }
            (_, Some(pass)) if pass.is_empty() => {
                Err(ConfigError::ValidationError("MongoDB password cannot be empty if set".to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Create MongoConfig for testing
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "assignment_test_db".to_string(),
            user_database: "assignment_test_db".to_string(),
            username: None,
            password: None,
            assignment_collection: "test_assignments".to_string(),
            user_collection: "test_users".to_string(),
            submission_collection: "test_submissions".to_string(),
            pool_size: 2,
            connection_timeout_secs: 2,
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "assignmentedDB".to_string(),
            user_database: "usersDB".to_string(),
            username: None,
            password: None,
            assignment_collection: "assignmented".to_string(),
            user_collection: "users".to_string(),
            submission_collection: "submitted".to_string(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}
