use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::JwtConfig;

/// Registered claims reserved by the issuer; callers cannot override them.
const RESERVED_CLAIMS: [&str; 3] = ["iat", "exp", "jti"];

/// JWT token claims structure.
///
/// The payload supplied to `POST /jwt` is signed as-is; `email` is lifted into
/// its own field because the guards key on it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// JWT ID (unique identifier for the token)
    #[serde(default)]
    pub jti: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Error types for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Failed to decode JWT token: {0}")]
    DecodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token format")]
    InvalidToken,
}

pub trait JwtTokenUtils {
    fn issue_token(&self, payload: Map<String, Value>) -> Result<String, JwtError>;
    fn validate_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
}

#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl {
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {
    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl { jwt_config }
    }

    /// Sign `payload` as if issued at `issued_at`.
    pub fn issue_token_at(&self, mut payload: Map<String, Value>, issued_at: DateTime<Utc>) -> Result<String, JwtError> {
        let expiration = issued_at + Duration::minutes(self.jwt_config.token_expiration);

        for reserved in RESERVED_CLAIMS {
            if payload.remove(reserved).is_some() {
                warn!("Ignoring caller-supplied '{}' claim", reserved);
            }
        }
        let email = match payload.remove("email") {
            Some(Value::String(email)) => Some(email),
            Some(other) => {
                warn!("Ignoring non-string email claim: {}", other);
                None
            }
            None => None,
        };
        debug!("Issuing token for {:?}", email);

        let claims = Claims {
            email,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
            payload,
        };

        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());

        match encode(&header, &claims, &encoding_key) {
            Ok(token) => {
                info!("Issued token expiring at {}", expiration.to_rfc3339());
                Ok(token)
            }
            Err(err) => {
                error!("Failed to encode JWT token: {}", err);
                Err(JwtError::EncodingFailed(err.to_string()))
            }
        }
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {
    fn issue_token(&self, payload: Map<String, Value>) -> Result<String, JwtError> {
        self.issue_token_at(payload, Utc::now())
    }

    fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        debug!("Validating JWT token");

        let decoding_key = DecodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Payloads are caller-defined; an `aud` claim is carried, not checked.
        validation.validate_aud = false;

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(token_data) => {
                let claims = token_data.claims;
                if claims.exp < Utc::now().timestamp() {
                    warn!("Token has expired for {:?}", claims.email);
                    return Err(JwtError::TokenExpired);
                }
                debug!("Token validation successful for {:?}", claims.email);
                Ok(claims)
            }
            Err(err) => match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    warn!("Token has expired");
                    Err(JwtError::TokenExpired)
                }
                _ => {
                    warn!("Failed to decode JWT token: {}", err);
                    Err(JwtError::DecodingFailed(err.to_string()))
                }
            },
        }
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            debug!("Authorization header is not a Bearer token");
            return Err(JwtError::InvalidToken);
        };

        let token = token.trim();
        if token.is_empty() {
            debug!("Empty token in authorization header");
            return Err(JwtError::InvalidToken);
        }

        Ok(token.to_string())
    }
}
