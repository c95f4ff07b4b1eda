use async_trait::async_trait;

use crate::domain::{Comment, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: i32) -> Result<Option<T>, RepoError>;

    /// Save an entity (insert when the id is unassigned, update otherwise).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User> {
    /// Find a user by their exact email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Number of registered users. The first registration becomes the admin.
    async fn count(&self) -> Result<u64, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post> {
    /// All posts, oldest first.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment> {
    /// Comments attached to one post, oldest first.
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError>;
}
