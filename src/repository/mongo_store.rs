use bson::doc;
use mongodb::{
    options::{ClientOptions, Credential, IndexOptions},
    Client, Collection, Database, IndexModel,
};
use tracing::{error, info};

use crate::config::mongo_conf::MongoConfig;
use crate::model::assignment::Assignment;
use crate::model::submission::Submission;
use crate::model::user::User;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Process-wide handle to the document store.
///
/// Built once at startup and shared by every Mongo repository; the driver's
/// connection pool lives inside the wrapped client. Users live in their own
/// database on the same deployment.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
    users_database: Database,
    config: MongoConfig,
}

impl MongoStore {
    pub async fn connect(config: &MongoConfig) -> RepositoryResult<Self> {
        info!(database = %config.database, user_database = %config.user_database, "Connecting to MongoDB");

        let mut client_options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            error!("Failed to parse MongoDB URI: {}", e);
            RepositoryError::connection(format!("Invalid MongoDB URI: {}", e))
        })?;
        client_options.app_name = Some("AssignmentBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(client_options)?;
        let database = client.database(&config.database);
        let users_database = client.database(&config.user_database);
        Ok(MongoStore { database, users_database, config: config.clone() })
    }

    /// Round-trip to the server so a bad URI fails at startup, not on the first request.
    pub async fn ping(&self) -> RepositoryResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        info!("Pinged MongoDB deployment successfully");
        Ok(())
    }

    /// One user document per email.
    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users().create_index(index, None).await?;
        info!(
            database = %self.config.user_database,
            collection = %self.config.user_collection,
            "Ensured unique email index"
        );
        Ok(())
    }

    pub fn assignments(&self) -> Collection<Assignment> {
        self.database.collection(&self.config.assignment_collection)
    }

    pub fn users(&self) -> Collection<User> {
        self.users_database.collection(&self.config.user_collection)
    }

    pub fn submissions(&self) -> Collection<Submission> {
        self.database.collection(&self.config.submission_collection)
    }
}
