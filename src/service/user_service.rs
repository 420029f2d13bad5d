use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

use crate::dto::user_dto::{CreateUserResponse, UserExistsResponse};
use crate::model::user::User;
use crate::repository::repository_error::RepositoryError;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait UserService: Send + Sync {
    /// Inserts `user` unless one with the same email already exists.
    async fn create_user(&self, user: User) -> Result<CreateUserResponse, ServiceError>;
    async fn is_admin(&self, email: &str) -> Result<bool, ServiceError>;
    async fn list_users(&self) -> Result<Vec<User>, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: User) -> Result<CreateUserResponse, ServiceError> {
        if self.user_repo.find_by_email(&user.email).await?.is_some() {
            info!("User already exists, skipping insert");
            return Ok(CreateUserResponse::AlreadyExists(UserExistsResponse::new()));
        }

        match self.user_repo.insert(user).await {
            Ok(ack) => {
                info!(inserted_id = %ack.inserted_id, "User created");
                Ok(CreateUserResponse::Created(ack))
            }
            // Lost the race against a concurrent insert of the same email.
            Err(RepositoryError::AlreadyExists(_)) => {
                warn!("User inserted concurrently, reporting as existing");
                Ok(CreateUserResponse::AlreadyExists(UserExistsResponse::new()))
            }
            Err(e) => {
                error!("Failed to insert user: {e}");
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    async fn is_admin(&self, email: &str) -> Result<bool, ServiceError> {
        let user = self.user_repo.find_by_email(email).await?;
        Ok(user.map(|u| u.role.is_admin()).unwrap_or(false))
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        let users = self.user_repo.list().await?;
        info!("Listed {} users", users.len());
        Ok(users)
    }
}
