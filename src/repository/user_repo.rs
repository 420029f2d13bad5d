use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use tracing::{error, info, warn};

use crate::dto::ack_dto::InsertAck;
use crate::model::user::User;
use crate::repository::mongo_store::MongoStore;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `AlreadyExists` when a user with the same email is stored.
    async fn insert(&self, user: User) -> RepositoryResult<InsertAck>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn list(&self) -> RepositoryResult<Vec<User>>;
}

pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoUserRepository { collection: store.users() }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, mut user: User) -> RepositoryResult<InsertAck> {
        user.id = Some(ObjectId::new());
        match self.collection.insert_one(&user, None).await {
            Ok(result) => {
                info!("User inserted successfully");
                Ok(InsertAck::from(result))
            }
            Err(e) => match RepositoryError::from(e) {
                RepositoryError::AlreadyExists(msg) => {
                    warn!("User insert rejected by unique index");
                    Err(RepositoryError::AlreadyExists(msg))
                }
                other => {
                    error!("Failed to insert user: {}", other);
                    Err(other)
                }
            },
        }
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        self.collection
            .find_one(doc! { "email": email }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by email: {}", e)))
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<User>> {
        let cursor = self
            .collection
            .find(None, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list users: {}", e)))?;
        let users: Vec<User> = cursor.try_collect().await?;
        info!("Fetched {} users", users.len());
        Ok(users)
    }
}
