//! In-memory repositories - used when no database is configured.
//! Data is lost on process restart; constraints mirror the relational schema.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostAuthor, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostFilter, PostRepository, UserRepository};

/// In-memory user repository backed by a HashMap with an async RwLock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let mut users: Vec<User> = self.rows.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut rows = self.rows.write().await;
        // Mirror the unique index on users.email.
        if rows.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("duplicate email".to_string()));
        }
        rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

/// In-memory post repository. Holds a handle to the user store so reads can
/// populate the author summary the way the SQL join does.
pub struct InMemoryPostRepository {
    rows: RwLock<HashMap<Uuid, Post>>,
    users: Arc<InMemoryUserRepository>,
}

impl InMemoryPostRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            users,
        }
    }

    async fn with_author(&self, mut post: Post) -> Post {
        if let Some(author_id) = post.author_id {
            post.author = self
                .users
                .rows
                .read()
                .await
                .get(&author_id)
                .map(|u| PostAuthor {
                    id: u.id,
                    full_name: u.full_name.clone(),
                });
        }
        post
    }

    fn matches(post: &Post, filter: &PostFilter) -> bool {
        let matches_q = filter.q.as_deref().is_none_or(|q| {
            let needle = q.to_lowercase();
            post.title.to_lowercase().contains(&needle)
                || post.content_html.to_lowercase().contains(&needle)
                || post.slug.to_lowercase().contains(&needle)
        });
        matches_q && filter.status.is_none_or(|s| post.status == s)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let post = self.rows.read().await.get(&id).cloned();
        match post {
            Some(post) => Ok(Some(self.with_author(post).await)),
            None => Ok(None),
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let post = self
            .rows
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned();
        match post {
            Some(post) => Ok(Some(self.with_author(post).await)),
            None => Ok(None),
        }
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .any(|p| p.slug == slug && Some(p.id) != exclude_id))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        // Mirror the unique index on posts.slug.
        if rows.values().any(|p| p.slug == post.slug) {
            return Err(RepoError::Constraint("duplicate slug".to_string()));
        }
        rows.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        if rows
            .values()
            .any(|p| p.slug == post.slug && p.id != post.id)
        {
            return Err(RepoError::Constraint("duplicate slug".to_string()));
        }
        if !rows.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        rows.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    async fn list(&self, filter: PostFilter) -> Result<(Vec<Post>, u64), RepoError> {
        let mut matched: Vec<Post> = {
            let rows = self.rows.read().await;
            rows.values()
                .filter(|p| Self::matches(p, &filter))
                .cloned()
                .collect()
        };
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matched.len() as u64;
        let page: Vec<Post> = matched
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect();

        let mut items = Vec::with_capacity(page.len());
        for post in page {
            items.push(self.with_author(post).await);
        }

        Ok((items, total))
    }
}
