use std::env;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::config::ConfigError;

/// Which document store implementation backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::InvalidValue(format!("Unknown STORE_BACKEND: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
}

impl AppConfig {
    /// Load the server configuration.
    ///
    /// - APP_HOST: bind address (defaults to 0.0.0.0)
    /// - PORT or APP_PORT: listen port (defaults to 5000)
    /// - STORE_BACKEND: `mongo` (default) or `memory`
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading application configuration from environment variables");

        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("PORT").or_else(|_| env::var("APP_PORT")) {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue(format!("Invalid port: {}", raw)))?,
            Err(_) => {
                warn!("PORT not set, using default: 5000");
                5000
            }
        };

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => StoreBackend::Mongo,
        };
        debug!(host = %host, port, ?store_backend, "Application configuration");

        Ok(AppConfig { host, port, store_backend })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 5000,
            store_backend: StoreBackend::Mongo,
        }
    }
}
