use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::{routing::get, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{AppConfig, ConfigError, CorsConfig, JwtConfig, MongoConfig, StoreBackend};
use crate::middlewares::auth_middleware::AuthState;
use crate::repository::assignment_repo::{AssignmentRepository, MongoAssignmentRepository};
use crate::repository::memory_repo::{
    MemoryAssignmentRepository, MemorySubmissionRepository, MemoryUserRepository,
};
use crate::repository::mongo_store::MongoStore;
use crate::repository::repository_error::RepositoryError;
use crate::repository::submission_repo::{MongoSubmissionRepository, SubmissionRepository};
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::router::assignment_router::assignment_router;
use crate::router::auth_router::auth_router;
use crate::router::submission_router::submission_router;
use crate::router::user_router::user_router;
use crate::service::assignment_service::AssignmentServiceImpl;
use crate::service::submission_service::SubmissionServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::util::jwt::JwtTokenUtilsImpl;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),
    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// The three collections behind the API.
#[derive(Clone)]
pub struct Repositories {
    pub assignments: Arc<dyn AssignmentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
}

impl Repositories {
    pub fn mongo(store: &MongoStore) -> Self {
        Repositories {
            assignments: Arc::new(MongoAssignmentRepository::new(store)),
            users: Arc::new(MongoUserRepository::new(store)),
            submissions: Arc::new(MongoSubmissionRepository::new(store)),
        }
    }

    pub fn in_memory() -> Self {
        Repositories {
            assignments: Arc::new(MemoryAssignmentRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
            submissions: Arc::new(MemorySubmissionRepository::new()),
        }
    }
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, StartupError> {
        let config = AppConfig::from_env()?;
        let jwt_config = JwtConfig::from_env()?;
        let cors_config = CorsConfig::from_env()?;

        let repositories = match config.store_backend {
            StoreBackend::Mongo => {
                let mongo_config = MongoConfig::from_env()?;
                let store = MongoStore::connect(&mongo_config).await?;
                store.ping().await?;
                store.ensure_indexes().await?;
                info!(database = %mongo_config.database, "Connected to MongoDB");
                Repositories::mongo(&store)
            }
            StoreBackend::Memory => {
                warn!("Using in-memory store, data is lost on shutdown");
                Repositories::in_memory()
            }
        };

        let router = build_router(repositories, jwt_config, &cors_config);
        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), StartupError> {
        let host: IpAddr = self
            .config
            .host
            .parse()
            .map_err(|_| StartupError::InvalidAddress(self.config.host.clone()))?;
        let addr = SocketAddr::new(host, self.config.port);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// Services, guards and routes over the given repositories.
pub fn build_router(repositories: Repositories, jwt_config: JwtConfig, cors_config: &CorsConfig) -> Router {
    let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
    let user_service = Arc::new(UserServiceImpl::new(repositories.users));
    let assignment_service = Arc::new(AssignmentServiceImpl::new(repositories.assignments));
    let submission_service = Arc::new(SubmissionServiceImpl::new(repositories.submissions));

    let auth_state = Arc::new(AuthState {
        jwt_utils: jwt_utils.clone(),
        user_service: user_service.clone(),
    });

    Router::new()
        .route("/", get(|| async { "Server is Running...." }))
        .route("/health", get(|| async { "OK" }))
        .merge(auth_router(jwt_utils))
        .merge(assignment_router(assignment_service, auth_state.clone()))
        .merge(submission_router(submission_service, auth_state.clone()))
        .merge(user_router(user_service, auth_state))
        .layer(cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(cors_config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Skipping invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}
