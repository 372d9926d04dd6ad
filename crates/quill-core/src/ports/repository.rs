use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostStatus, User};
use crate::error::RepoError;

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_all(&self) -> Result<Vec<User>, RepoError>;

    /// Insert a new user. Fails with [`RepoError::Constraint`] on a duplicate email.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    /// Delete a user by ID. Fails with [`RepoError::NotFound`] if no row was affected.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Sanitized listing filter handed to the store. Clamping of page and limit
/// happens in the service layer before this is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    /// Non-blank free-text needle matched against title, content and slug.
    pub q: Option<String>,
    pub status: Option<PostStatus>,
    pub offset: u64,
    pub limit: u64,
}

/// Post repository. Reads populate the author summary where one exists.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Whether a slug is already taken, optionally ignoring one post
    /// (so a post can keep its own slug during update).
    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, RepoError>;

    /// Insert a new post. Fails with [`RepoError::Constraint`] on a slug collision.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Update an existing post. Fails with [`RepoError::Constraint`] on a slug collision.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete a post by ID. Fails with [`RepoError::NotFound`] if no row was affected.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Filtered page of posts ordered by creation time descending,
    /// together with the total match count.
    async fn list(&self, filter: PostFilter) -> Result<(Vec<Post>, u64), RepoError>;
}
