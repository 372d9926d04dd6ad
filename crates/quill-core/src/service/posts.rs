//! Post lifecycle management: create/update/publish/reset/remove plus the
//! paginated listing facade.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Post, PostStatus};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostFilter, PostRepository, UserRepository};
use crate::slug::slugify;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// How many times a create/update is retried when the storage-level unique
/// index on the slug rejects a candidate that passed the probe.
const SLUG_RETRIES: usize = 3;

/// Toggles for the available lifecycle transitions.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleConfig {
    /// Whether posts may be moved into the archived state.
    pub allow_archived: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            allow_archived: true,
        }
    }
}

/// Input for creating a post. `title` and `slug` are both optional, but at
/// least one of them must be non-blank.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content_html: String,
    pub excerpt: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub featured_image_path: Option<String>,
    pub status: Option<PostStatus>,
}

/// Partial update. `None` means "leave the field alone"; for nullable fields
/// an inner `None` is an explicit clear.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content_html: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub featured_image_path: Option<Option<String>>,
    pub status: Option<PostStatus>,
}

/// Listing parameters as they arrive from the query string.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub q: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<PostStatus>,
}

/// One page of listing results.
#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<Post>,
    pub total: u64,
    pub page: u64,
    pub page_count: u64,
}

/// Owns post state transitions and slug allocation.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    config: LifecycleConfig,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            posts,
            users,
            config,
        }
    }

    /// Generate a unique slug from a base string, optionally letting an
    /// existing post keep its own slug. Collisions get `-2`, `-3`, ... suffixes.
    pub async fn unique_slug(
        &self,
        base: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<String, DomainError> {
        let base_slug = slugify(base);
        if base_slug.is_empty() {
            return Err(DomainError::Validation("title or slug is required".into()));
        }

        let mut candidate = base_slug.clone();
        let mut n = 2u32;
        while self.posts.slug_exists(&candidate, exclude_id).await? {
            candidate = format!("{base_slug}-{n}");
            n += 1;
        }
        Ok(candidate)
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("Post"))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Post, DomainError> {
        self.posts
            .find_by_slug(slug)
            .await?
            .ok_or(DomainError::NotFound("Post"))
    }

    pub async fn list(&self, params: ListParams) -> Result<Page, DomainError> {
        let page = params.page.unwrap_or(1).max(1);
        let limit = params
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let filter = PostFilter {
            q: params
                .q
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            status: params.status,
            offset: (page - 1) * limit,
            limit,
        };

        let (items, total) = self.posts.list(filter).await?;
        Ok(Page {
            items,
            total,
            page,
            page_count: total.div_ceil(limit).max(1),
        })
    }

    pub async fn create(&self, input: NewPost, author_id: Uuid) -> Result<Post, DomainError> {
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(DomainError::NotFound("Author"))?;

        let base = input
            .slug
            .clone()
            .or_else(|| input.title.clone())
            .unwrap_or_default();
        if base.trim().is_empty() {
            return Err(DomainError::Validation("title or slug is required".into()));
        }

        if input.content_html.trim().is_empty() {
            return Err(DomainError::Validation("content is required".into()));
        }

        let status = input.status.unwrap_or(PostStatus::Draft);
        self.check_status(status)?;

        let slug = self.unique_slug(&base, None).await?;
        // Fall back to the slug when no title was given.
        let title = input.title.unwrap_or_else(|| slug.clone());

        let mut post = Post::new(title, slug, input.content_html, Some(author.id));
        post.excerpt = input.excerpt;
        post.categories = input.categories;
        post.tags = input.tags;
        post.featured_image_path = input.featured_image_path;
        post.status = status;
        if status == PostStatus::Published {
            post.published_at = Some(Utc::now());
        }

        let saved = self.insert_with_slug_retry(post, &base).await?;
        self.find_one(saved.id).await
    }

    /// Create with the status forced to draft regardless of the payload.
    pub async fn save_draft(&self, mut input: NewPost, author_id: Uuid) -> Result<Post, DomainError> {
        input.status = Some(PostStatus::Draft);
        self.create(input, author_id).await
    }

    pub async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("Post"))?;

        // Title / slug changes keep the slug unique, excluding this post itself.
        let mut slug_base: Option<String> = None;
        if let Some(title) = patch
            .title
            .as_ref()
            .filter(|t| !t.is_empty() && **t != post.title)
        {
            post.title = title.clone();
            let base = patch.slug.clone().unwrap_or_else(|| title.clone());
            post.slug = self.unique_slug(&base, Some(id)).await?;
            slug_base = Some(base);
        } else if let Some(slug) = patch
            .slug
            .as_ref()
            .filter(|s| !s.is_empty() && **s != post.slug)
        {
            post.slug = self.unique_slug(slug, Some(id)).await?;
            slug_base = Some(slug.clone());
        }

        if let Some(content) = patch.content_html {
            post.content_html = content;
        }
        if let Some(excerpt) = patch.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(categories) = patch.categories {
            post.categories = categories;
        }
        if let Some(tags) = patch.tags {
            post.tags = tags;
        }
        if let Some(path) = patch.featured_image_path {
            post.featured_image_path = path;
        }

        if let Some(status) = patch.status.filter(|s| *s != post.status) {
            self.check_status(status)?;
            post.status = status;
            if status == PostStatus::Published {
                if post.published_at.is_none() {
                    post.published_at = Some(Utc::now());
                }
            } else {
                post.published_at = None;
            }
        }

        post.updated_at = Utc::now();
        self.update_with_slug_retry(post, slug_base.as_deref())
            .await?;
        self.find_one(id).await
    }

    /// Direct transition to published. Re-publishing keeps the original
    /// `published_at` timestamp.
    pub async fn publish(&self, id: Uuid) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("Post"))?;

        post.status = PostStatus::Published;
        post.published_at = post.published_at.or_else(|| Some(Utc::now()));
        post.updated_at = Utc::now();

        self.posts.update(post).await?;
        self.find_one(id).await
    }

    /// Wipe the content fields and force the post back to draft.
    /// The slug is kept so the row stays addressable and unique.
    pub async fn reset(&self, id: Uuid) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("Post"))?;

        post.title.clear();
        post.categories.clear();
        post.tags.clear();
        post.featured_image_path = None;
        post.excerpt = None;
        post.content_html.clear();
        post.status = PostStatus::Draft;
        post.published_at = None;
        post.updated_at = Utc::now();

        self.posts.update(post).await?;
        self.find_one(id).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), DomainError> {
        self.posts.delete(id).await.map_err(|err| match err {
            RepoError::NotFound => DomainError::NotFound("Post"),
            other => other.into(),
        })
    }

    fn check_status(&self, status: PostStatus) -> Result<(), DomainError> {
        if status == PostStatus::Archived && !self.config.allow_archived {
            return Err(DomainError::Validation("archived status is disabled".into()));
        }
        Ok(())
    }

    /// The slug probe and the insert are separate round trips, so two
    /// concurrent creates can both pass the probe. The unique index on the
    /// slug column turns the loser into a constraint failure; regenerate and
    /// try again a bounded number of times.
    async fn insert_with_slug_retry(&self, mut post: Post, base: &str) -> Result<Post, DomainError> {
        for _ in 0..SLUG_RETRIES {
            match self.posts.insert(post.clone()).await {
                Ok(saved) => return Ok(saved),
                Err(RepoError::Constraint(_)) => {
                    post.slug = self.unique_slug(base, None).await?;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(DomainError::Conflict("could not allocate a unique slug".into()))
    }

    async fn update_with_slug_retry(
        &self,
        mut post: Post,
        base: Option<&str>,
    ) -> Result<Post, DomainError> {
        let id = post.id;
        for _ in 0..SLUG_RETRIES {
            match self.posts.update(post.clone()).await {
                Ok(saved) => return Ok(saved),
                Err(RepoError::Constraint(msg)) => match base {
                    Some(base) => post.slug = self.unique_slug(base, Some(id)).await?,
                    None => return Err(DomainError::Conflict(msg)),
                },
                Err(err) => return Err(err.into()),
            }
        }
        Err(DomainError::Conflict("could not allocate a unique slug".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PostAuthor, User};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemUsers {
        rows: Mutex<HashMap<Uuid, User>>,
    }

    #[async_trait]
    impl UserRepository for MemUsers {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn find_all(&self) -> Result<Vec<User>, RepoError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn insert(&self, user: User) -> Result<User, RepoError> {
            self.rows.lock().unwrap().insert(user.id, user.clone());
            Ok(user)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.rows
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        }
    }

    #[derive(Default)]
    struct MemPosts {
        rows: Mutex<HashMap<Uuid, Post>>,
        last_filter: Mutex<Option<PostFilter>>,
    }

    #[async_trait]
    impl PostRepository for MemPosts {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).map(|p| {
                let mut p = p.clone();
                p.author = p.author_id.map(|id| PostAuthor {
                    id,
                    full_name: "Test Author".into(),
                });
                p
            }))
        }

        async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|p| p.slug == slug)
                .cloned())
        }

        async fn slug_exists(
            &self,
            slug: &str,
            exclude_id: Option<Uuid>,
        ) -> Result<bool, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .any(|p| p.slug == slug && Some(p.id) != exclude_id))
        }

        async fn insert(&self, post: Post) -> Result<Post, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.values().any(|p| p.slug == post.slug) {
                return Err(RepoError::Constraint("duplicate slug".into()));
            }
            rows.insert(post.id, post.clone());
            Ok(post)
        }

        async fn update(&self, post: Post) -> Result<Post, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            if rows
                .values()
                .any(|p| p.slug == post.slug && p.id != post.id)
            {
                return Err(RepoError::Constraint("duplicate slug".into()));
            }
            if !rows.contains_key(&post.id) {
                return Err(RepoError::NotFound);
            }
            rows.insert(post.id, post.clone());
            Ok(post)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.rows
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        }

        async fn list(&self, filter: PostFilter) -> Result<(Vec<Post>, u64), RepoError> {
            *self.last_filter.lock().unwrap() = Some(filter.clone());
            let rows = self.rows.lock().unwrap();
            let mut matched: Vec<Post> = rows
                .values()
                .filter(|p| {
                    filter.q.as_deref().is_none_or(|q| {
                        let needle = q.to_lowercase();
                        p.title.to_lowercase().contains(&needle)
                            || p.content_html.to_lowercase().contains(&needle)
                            || p.slug.contains(&needle)
                    })
                })
                .filter(|p| filter.status.is_none_or(|s| p.status == s))
                .cloned()
                .collect();
            matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let total = matched.len() as u64;
            let items = matched
                .into_iter()
                .skip(filter.offset as usize)
                .take(filter.limit as usize)
                .collect();
            Ok((items, total))
        }
    }

    struct Fixture {
        service: PostService,
        posts: Arc<MemPosts>,
        author_id: Uuid,
    }

    async fn fixture() -> Fixture {
        fixture_with(LifecycleConfig::default()).await
    }

    async fn fixture_with(config: LifecycleConfig) -> Fixture {
        let users = Arc::new(MemUsers::default());
        let posts = Arc::new(MemPosts::default());
        let author = User::new(
            "Test Author".into(),
            "555-0100".into(),
            "author@example.com".into(),
            "hash".into(),
        );
        let author_id = author.id;
        users.insert(author).await.unwrap();

        Fixture {
            service: PostService::new(posts.clone(), users, config),
            posts,
            author_id,
        }
    }

    fn draft(title: &str) -> NewPost {
        NewPost {
            title: Some(title.into()),
            content_html: "<p>body</p>".into(),
            ..NewPost::default()
        }
    }

    #[tokio::test]
    async fn create_defaults_to_draft() {
        let fx = fixture().await;
        let post = fx.service.create(draft("My Post"), fx.author_id).await.unwrap();

        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.slug, "my-post");
        assert!(post.published_at.is_none());
        assert_eq!(post.author.as_ref().unwrap().id, fx.author_id);
    }

    #[tokio::test]
    async fn create_as_published_stamps_published_at() {
        let fx = fixture().await;
        let input = NewPost {
            status: Some(PostStatus::Published),
            ..draft("Launch")
        };
        let post = fx.service.create(input, fx.author_id).await.unwrap();

        assert_eq!(post.status, PostStatus::Published);
        assert!(post.published_at.is_some());
    }

    #[tokio::test]
    async fn create_without_content_is_rejected() {
        let fx = fixture().await;
        let input = NewPost {
            content_html: "   ".into(),
            ..draft("My Post")
        };
        let err = fx.service.create(input, fx.author_id).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_without_title_or_slug_is_rejected() {
        let fx = fixture().await;
        let input = NewPost {
            content_html: "<p>body</p>".into(),
            ..NewPost::default()
        };
        let err = fx.service.create(input, fx.author_id).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_with_slug_only_falls_back_title_to_slug() {
        let fx = fixture().await;
        let input = NewPost {
            slug: Some("Weekly Digest".into()),
            content_html: "<p>body</p>".into(),
            ..NewPost::default()
        };
        let post = fx.service.create(input, fx.author_id).await.unwrap();

        assert_eq!(post.slug, "weekly-digest");
        assert_eq!(post.title, "weekly-digest");
    }

    #[tokio::test]
    async fn create_with_unknown_author_is_not_found() {
        let fx = fixture().await;
        let err = fx
            .service
            .create(draft("My Post"), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Author")));
    }

    #[tokio::test]
    async fn colliding_base_slugs_get_numeric_suffixes() {
        let fx = fixture().await;
        let first = fx.service.create(draft("My Post"), fx.author_id).await.unwrap();
        let second = fx.service.create(draft("my post!!"), fx.author_id).await.unwrap();
        let third = fx.service.create(draft("My-Post"), fx.author_id).await.unwrap();

        assert_eq!(first.slug, "my-post");
        assert_eq!(second.slug, "my-post-2");
        assert_eq!(third.slug, "my-post-3");
    }

    #[tokio::test]
    async fn publish_is_idempotent_on_published_at() {
        let fx = fixture().await;
        let post = fx.service.create(draft("My Post"), fx.author_id).await.unwrap();

        let published = fx.service.publish(post.id).await.unwrap();
        let stamp = published.published_at.unwrap();

        let republished = fx.service.publish(post.id).await.unwrap();
        assert_eq!(republished.published_at.unwrap(), stamp);
    }

    #[tokio::test]
    async fn leaving_published_clears_the_timestamp() {
        let fx = fixture().await;
        let post = fx.service.create(draft("My Post"), fx.author_id).await.unwrap();
        fx.service.publish(post.id).await.unwrap();

        let patch = PostPatch {
            status: Some(PostStatus::Draft),
            ..PostPatch::default()
        };
        let drafted = fx.service.update(post.id, patch).await.unwrap();
        assert!(drafted.published_at.is_none());

        // Publishing again gets a fresh timestamp since none survived.
        let patch = PostPatch {
            status: Some(PostStatus::Published),
            ..PostPatch::default()
        };
        let republished = fx.service.update(post.id, patch).await.unwrap();
        assert!(republished.published_at.is_some());
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let fx = fixture().await;
        let input = NewPost {
            excerpt: Some("summary".into()),
            tags: vec!["rust".into()],
            ..draft("My Post")
        };
        let post = fx.service.create(input, fx.author_id).await.unwrap();

        let patch = PostPatch {
            content_html: Some("<p>edited</p>".into()),
            ..PostPatch::default()
        };
        let updated = fx.service.update(post.id, patch).await.unwrap();

        assert_eq!(updated.content_html, "<p>edited</p>");
        assert_eq!(updated.excerpt.as_deref(), Some("summary"));
        assert_eq!(updated.tags, vec!["rust".to_string()]);
        assert_eq!(updated.title, "My Post");
        assert_eq!(updated.slug, "my-post");
    }

    #[tokio::test]
    async fn update_with_explicit_null_clears_nullable_fields() {
        let fx = fixture().await;
        let input = NewPost {
            excerpt: Some("summary".into()),
            featured_image_path: Some("/uploads/a.png".into()),
            ..draft("My Post")
        };
        let post = fx.service.create(input, fx.author_id).await.unwrap();

        let patch = PostPatch {
            excerpt: Some(None),
            featured_image_path: Some(None),
            ..PostPatch::default()
        };
        let updated = fx.service.update(post.id, patch).await.unwrap();

        assert!(updated.excerpt.is_none());
        assert!(updated.featured_image_path.is_none());
    }

    #[tokio::test]
    async fn update_title_rederives_a_unique_slug() {
        let fx = fixture().await;
        fx.service.create(draft("Taken Title"), fx.author_id).await.unwrap();
        let post = fx.service.create(draft("My Post"), fx.author_id).await.unwrap();

        let patch = PostPatch {
            title: Some("Taken Title".into()),
            ..PostPatch::default()
        };
        let updated = fx.service.update(post.id, patch).await.unwrap();

        assert_eq!(updated.title, "Taken Title");
        assert_eq!(updated.slug, "taken-title-2");
    }

    #[tokio::test]
    async fn update_keeps_own_slug_when_title_unchanged_in_meaning() {
        let fx = fixture().await;
        let post = fx.service.create(draft("My Post"), fx.author_id).await.unwrap();

        // Re-sending the same title must not bump the slug to my-post-2.
        let patch = PostPatch {
            title: Some("My Post".into()),
            ..PostPatch::default()
        };
        let updated = fx.service.update(post.id, patch).await.unwrap();
        assert_eq!(updated.slug, "my-post");
    }

    #[tokio::test]
    async fn update_slug_only_rederives_from_given_slug() {
        let fx = fixture().await;
        let post = fx.service.create(draft("My Post"), fx.author_id).await.unwrap();

        let patch = PostPatch {
            slug: Some("Fancy Slug!".into()),
            ..PostPatch::default()
        };
        let updated = fx.service.update(post.id, patch).await.unwrap();

        assert_eq!(updated.slug, "fancy-slug");
        assert_eq!(updated.title, "My Post");
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let fx = fixture().await;
        let err = fx
            .service
            .update(Uuid::new_v4(), PostPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Post")));
    }

    #[tokio::test]
    async fn reset_wipes_content_and_forces_draft() {
        let fx = fixture().await;
        let input = NewPost {
            excerpt: Some("summary".into()),
            categories: vec!["news".into()],
            tags: vec!["rust".into()],
            featured_image_path: Some("/uploads/a.png".into()),
            status: Some(PostStatus::Published),
            ..draft("My Post")
        };
        let post = fx.service.create(input, fx.author_id).await.unwrap();

        let reset = fx.service.reset(post.id).await.unwrap();

        assert!(reset.title.is_empty());
        assert!(reset.content_html.is_empty());
        assert!(reset.excerpt.is_none());
        assert!(reset.categories.is_empty());
        assert!(reset.tags.is_empty());
        assert!(reset.featured_image_path.is_none());
        assert_eq!(reset.status, PostStatus::Draft);
        assert!(reset.published_at.is_none());
        assert_eq!(reset.slug, "my-post");
    }

    #[tokio::test]
    async fn save_draft_overrides_requested_status() {
        let fx = fixture().await;
        let input = NewPost {
            status: Some(PostStatus::Published),
            ..draft("My Post")
        };
        let post = fx.service.save_draft(input, fx.author_id).await.unwrap();

        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.published_at.is_none());
    }

    #[tokio::test]
    async fn remove_missing_post_is_not_found() {
        let fx = fixture().await;
        let err = fx.service.remove(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Post")));

        let post = fx.service.create(draft("My Post"), fx.author_id).await.unwrap();
        fx.service.remove(post.id).await.unwrap();
        let err = fx.service.find_one(post.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Post")));
    }

    #[tokio::test]
    async fn archived_can_be_disabled_by_configuration() {
        let fx = fixture_with(LifecycleConfig {
            allow_archived: false,
        })
        .await;
        let post = fx.service.create(draft("My Post"), fx.author_id).await.unwrap();

        let patch = PostPatch {
            status: Some(PostStatus::Archived),
            ..PostPatch::default()
        };
        let err = fx.service.update(post.id, patch).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn archiving_clears_published_at() {
        let fx = fixture().await;
        let post = fx.service.create(draft("My Post"), fx.author_id).await.unwrap();
        fx.service.publish(post.id).await.unwrap();

        let patch = PostPatch {
            status: Some(PostStatus::Archived),
            ..PostPatch::default()
        };
        let archived = fx.service.update(post.id, patch).await.unwrap();

        assert_eq!(archived.status, PostStatus::Archived);
        assert!(archived.published_at.is_none());
    }

    #[tokio::test]
    async fn list_clamps_page_and_limit() {
        let fx = fixture().await;
        fx.service.create(draft("One"), fx.author_id).await.unwrap();

        let page = fx
            .service
            .list(ListParams {
                page: Some(0),
                limit: Some(1000),
                ..ListParams::default()
            })
            .await
            .unwrap();

        assert_eq!(page.page, 1);
        let filter = fx.posts.last_filter.lock().unwrap().clone().unwrap();
        assert_eq!(filter.limit, MAX_PAGE_SIZE);
        assert_eq!(filter.offset, 0);
    }

    #[tokio::test]
    async fn list_page_count_is_at_least_one() {
        let fx = fixture().await;
        let page = fx.service.list(ListParams::default()).await.unwrap();

        assert_eq!(page.total, 0);
        assert_eq!(page.page_count, 1);
    }

    #[tokio::test]
    async fn list_filters_by_status_and_query() {
        let fx = fixture().await;
        let kept = fx
            .service
            .create(
                NewPost {
                    status: Some(PostStatus::Published),
                    ..draft("Rust Tips")
                },
                fx.author_id,
            )
            .await
            .unwrap();
        fx.service.create(draft("Rust Drafts"), fx.author_id).await.unwrap();
        fx.service
            .create(
                NewPost {
                    status: Some(PostStatus::Published),
                    ..draft("Cooking")
                },
                fx.author_id,
            )
            .await
            .unwrap();

        let page = fx
            .service
            .list(ListParams {
                q: Some("rust".into()),
                status: Some(PostStatus::Published),
                ..ListParams::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, kept.id);
    }

    #[tokio::test]
    async fn blank_query_is_ignored() {
        let fx = fixture().await;
        fx.service.create(draft("One"), fx.author_id).await.unwrap();

        let page = fx
            .service
            .list(ListParams {
                q: Some("   ".into()),
                ..ListParams::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        let filter = fx.posts.last_filter.lock().unwrap().clone().unwrap();
        assert!(filter.q.is_none());
    }
}
