use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

const MIN_SECRET_LEN: usize = 32;
const DEFAULT_EXPIRY_MINUTES: i64 = 60;

/// JWT configuration structure
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub jwt_secret: String,
    /// Token lifetime in minutes
    pub token_expiration: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    ///
    /// Expected environment variables:
    /// - ACCESS_TOKEN_SECRET: Secret key for signing JWT tokens (required)
    /// - JWT_EXPIRY_MINUTES: Token expiration in minutes (defaults to 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment variables");

        let jwt_secret = env::var("ACCESS_TOKEN_SECRET").map_err(|_| {
            error!("ACCESS_TOKEN_SECRET environment variable not found");
            ConfigError::EnvVarNotFound("ACCESS_TOKEN_SECRET".to_string())
        })?;
        debug!("JWT secret loaded (length: {} chars)", jwt_secret.len());

        let token_expiration = env::var("JWT_EXPIRY_MINUTES")
            .unwrap_or_else(|_| {
                warn!("JWT_EXPIRY_MINUTES not set, using default: {} minutes", DEFAULT_EXPIRY_MINUTES);
                DEFAULT_EXPIRY_MINUTES.to_string()
            })
            .parse::<i64>()
            .map_err(|e| {
                error!("Invalid JWT_EXPIRY_MINUTES value: {}", e);
                ConfigError::InvalidValue(format!("JWT_EXPIRY_MINUTES: {}", e))
            })?;
        debug!("JWT token expiration: {} minutes", token_expiration);

        let config = JwtConfig { jwt_secret, token_expiration };
        config.validate()?;

        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    /// Validate the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            error!("JWT secret is too short (minimum {} characters required)", MIN_SECRET_LEN);
            return Err(ConfigError::ValidationError(format!(
                "ACCESS_TOKEN_SECRET must be at least {} characters long",
                MIN_SECRET_LEN
            )));
        }

        if self.token_expiration <= 0 {
            error!("Token expiration must be greater than 0");
            return Err(ConfigError::ValidationError("Token expiration must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Configuration used by tests and local runs without a `.env`
impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_should_be_long_enough_for_security_purposes".to_string(),
            token_expiration: DEFAULT_EXPIRY_MINUTES,
        }
    }
}
