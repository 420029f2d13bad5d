use std::env;
use tracing::{debug, info, warn};

use crate::config::ConfigError;

const DEFAULT_ORIGIN: &str = "http://localhost:5173";

/// Origins allowed to call the API from a browser. Credentials are always allowed.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Load CORS configuration.
    ///
    /// - CORS_ALLOWED_ORIGINS: comma-separated origin list (defaults to http://localhost:5173)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading CORS configuration from environment variables");

        let allowed_origins = match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => Self::parse_origins(&raw),
            Err(_) => {
                warn!("CORS_ALLOWED_ORIGINS not set, using default: {}", DEFAULT_ORIGIN);
                vec![DEFAULT_ORIGIN.to_string()]
            }
        };
        debug!("CORS allowed origins: {:?}", allowed_origins);

        let config = CorsConfig { allowed_origins };
        config.validate()?;
        Ok(config)
    }

    fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|origin| origin.trim().trim_end_matches('/'))
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_origins.is_empty() {
            return Err(ConfigError::ValidationError("At least one CORS origin is required".to_string()));
        }
        // A wildcard cannot be combined with credentialed requests.
        if self.allowed_origins.iter().any(|o| o == "*") {
            return Err(ConfigError::ValidationError("Wildcard origin is not allowed with credentials".to_string()));
        }
        Ok(())
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig {
            allowed_origins: vec![DEFAULT_ORIGIN.to_string()],
        }
    }
}
