//! Application state - shared across all handlers.

use std::sync::Arc;

use inkwell_core::ports::{CommentRepository, PostRepository, UserRepository};
use inkwell_infra::{
    DatabaseConfig, MemoryTables, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        if let Some(config) = db_config {
            match config.connect().await {
                Ok(conn) => {
                    return Self {
                        users: Arc::new(PostgresUserRepository::new(conn.clone())),
                        posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                        comments: Arc::new(PostgresCommentRepository::new(conn)),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        Self::in_memory()
    }

    /// Fully in-memory state - the database-less mode, also used by tests.
    pub fn in_memory() -> Self {
        let tables = MemoryTables::new();
        Self {
            users: Arc::new(tables.users()),
            posts: Arc::new(tables.posts()),
            comments: Arc::new(tables.comments()),
        }
    }
}
