//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostRepository, UserRepository};
use quill_core::service::{LifecycleConfig, PostService};
use quill_infra::database::{PostgresPostRepository, PostgresUserRepository};
use quill_infra::{InMemoryPostRepository, InMemoryUserRepository, connect};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub post_service: PostService,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Without a configured database the server runs entirely on in-memory
    /// repositories; data does not survive a restart.
    pub async fn new(config: &AppConfig) -> Self {
        let (users, posts): (Arc<dyn UserRepository>, Arc<dyn PostRepository>) =
            match &config.database {
                Some(db_config) => match connect(db_config).await {
                    Ok(conn) => (
                        Arc::new(PostgresUserRepository::new(conn.clone())),
                        Arc::new(PostgresPostRepository::new(conn)),
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory repositories.",
                            e
                        );
                        Self::memory_repos()
                    }
                },
                None => {
                    tracing::warn!(
                        "DATABASE_URL not set. Running without database (in-memory mode)."
                    );
                    Self::memory_repos()
                }
            };

        let post_service = PostService::new(
            posts,
            users.clone(),
            LifecycleConfig {
                allow_archived: config.allow_archived,
            },
        );

        tracing::info!("Application state initialized");

        Self {
            users,
            post_service,
        }
    }

    fn memory_repos() -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>) {
        let users = Arc::new(InMemoryUserRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
        (users, posts)
    }
}
