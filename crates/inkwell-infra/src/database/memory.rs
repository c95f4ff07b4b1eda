//! In-memory repositories - used when no database is configured, and by
//! handler-level tests. Data is lost on process restart.
//!
//! All three repositories share one `MemoryTables` so that referential rules
//! (comment references, delete cascade) behave like the real schema.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use inkwell_core::domain::{Comment, Post, User};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: HashMap<i32, User>,
    posts: HashMap<i32, Post>,
    comments: HashMap<i32, Comment>,
    next_user_id: i32,
    next_post_id: i32,
    next_comment_id: i32,
}

/// The shared backing store. Clone it to hand the same tables to each
/// repository.
#[derive(Clone, Default)]
pub struct MemoryTables {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            tables: self.clone(),
        }
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            tables: self.clone(),
        }
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryCommentRepository {
            tables: self.clone(),
        }
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    tables: MemoryTables,
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    tables: MemoryTables,
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    tables: MemoryTables,
}

#[async_trait]
impl BaseRepository<User> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let tables = self.tables.inner.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn save(&self, mut user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.inner.write().await;

        // Same uniqueness rule the users.email index enforces.
        let collision = tables
            .users
            .values()
            .any(|u| u.email == user.email && u.id != user.id);
        if collision {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        if user.id == 0 {
            tables.next_user_id += 1;
            user.id = tables.next_user_id;
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.inner.write().await;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.inner.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let tables = self.tables.inner.read().await;
        Ok(tables.users.len() as u64)
    }
}

#[async_trait]
impl BaseRepository<Post> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.inner.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.inner.write().await;

        // Titles are unique across all posts.
        let collision = tables
            .posts
            .values()
            .any(|p| p.title == post.title && p.id != post.id);
        if collision {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        if post.id == 0 {
            tables.next_post_id += 1;
            post.id = tables.next_post_id;
        }
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.inner.write().await;
        tables.posts.remove(&id).ok_or(RepoError::NotFound)?;
        // ON DELETE CASCADE equivalent.
        tables.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.inner.read().await;
        let mut posts: Vec<Post> = tables.posts.values().cloned().collect();
        posts.sort_by_key(|p| p.id);
        Ok(posts)
    }
}

#[async_trait]
impl BaseRepository<Comment> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.inner.read().await;
        Ok(tables.comments.get(&id).cloned())
    }

    async fn save(&self, mut comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.inner.write().await;

        // Both foreign keys must resolve, as in the real schema.
        if !tables.users.contains_key(&comment.author_id)
            || !tables.posts.contains_key(&comment.post_id)
        {
            return Err(RepoError::Constraint(
                "Comment references a missing entity".to_string(),
            ));
        }

        if comment.id == 0 {
            tables.next_comment_id += 1;
            comment.id = tables.next_comment_id;
        }
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.inner.write().await;
        tables.comments.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.inner.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.id);
        Ok(comments)
    }
}
