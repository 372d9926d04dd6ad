//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus, User};
use quill_core::service::{NewPost, Page, PostPatch};

/// Deserialize helper distinguishing an absent field from an explicit `null`:
/// absent stays `None`, `null` becomes `Some(None)`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to exchange a refresh token for a fresh pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            phone: user.phone,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Response containing authentication tokens and the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// Request to create a post. `content` is accepted as an alias for
/// `content_html`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(alias = "content")]
    pub content_html: Option<String>,
    pub excerpt: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub featured_image_path: Option<String>,
    pub status: Option<PostStatus>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        NewPost {
            title: req.title,
            slug: req.slug,
            content_html: req.content_html.unwrap_or_default(),
            excerpt: req.excerpt,
            categories: req.categories.unwrap_or_default(),
            tags: req.tags.unwrap_or_default(),
            featured_image_path: req.featured_image_path,
            status: req.status,
        }
    }
}

/// Partial update of a post. An absent field is left untouched; an explicit
/// `null` clears nullable fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(alias = "content")]
    pub content_html: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub excerpt: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub categories: Option<Option<Vec<String>>>,
    #[serde(deserialize_with = "double_option")]
    pub tags: Option<Option<Vec<String>>>,
    #[serde(deserialize_with = "double_option")]
    pub featured_image_path: Option<Option<String>>,
    pub status: Option<PostStatus>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        PostPatch {
            title: req.title,
            slug: req.slug,
            content_html: req.content_html,
            excerpt: req.excerpt,
            // A null sequence clears to empty, mirroring `?? []`.
            categories: req.categories.map(Option::unwrap_or_default),
            tags: req.tags.map(Option::unwrap_or_default),
            featured_image_path: req.featured_image_path,
            status: req.status,
        }
    }
}

/// Author summary rendered inside a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostAuthorResponse {
    pub id: Uuid,
    pub full_name: String,
}

/// Full post representation returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content_html: String,
    pub excerpt: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub featured_image_path: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub author: Option<PostAuthorResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content_html: post.content_html,
            excerpt: post.excerpt,
            categories: post.categories,
            tags: post.tags,
            featured_image_path: post.featured_image_path,
            status: post.status,
            published_at: post.published_at,
            author: post.author.map(|a| PostAuthorResponse {
                id: a.id,
                full_name: a.full_name,
            }),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Listing query string: `?q=&page=1&limit=10&status=draft|published|archived`.
/// An unknown status value is ignored rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPostsQuery {
    pub q: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
}

/// One page of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub items: Vec<PostResponse>,
    pub total: u64,
    pub page: u64,
    pub page_count: u64,
}

impl From<Page> for PostListResponse {
    fn from(page: Page) -> Self {
        Self {
            items: page.items.into_iter().map(PostResponse::from).collect(),
            total: page.total,
            page: page.page,
            page_count: page.page_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_null_are_distinguished() {
        let absent: UpdatePostRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(absent.excerpt.is_none());

        let cleared: UpdatePostRequest =
            serde_json::from_str(r#"{"excerpt": null, "featured_image_path": null}"#).unwrap();
        assert_eq!(cleared.excerpt, Some(None));
        assert_eq!(cleared.featured_image_path, Some(None));

        let set: UpdatePostRequest = serde_json::from_str(r#"{"excerpt": "short"}"#).unwrap();
        assert_eq!(set.excerpt, Some(Some("short".to_string())));
    }

    #[test]
    fn null_sequences_clear_to_empty() {
        let req: UpdatePostRequest = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        let patch = PostPatch::from(req);
        assert_eq!(patch.tags, Some(Vec::new()));

        let req: UpdatePostRequest = serde_json::from_str(r#"{}"#).unwrap();
        let patch = PostPatch::from(req);
        assert!(patch.tags.is_none());
    }

    #[test]
    fn content_is_an_alias_for_content_html() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"content": "<p>hi</p>"}"#).unwrap();
        assert_eq!(req.content_html.as_deref(), Some("<p>hi</p>"));

        let req: UpdatePostRequest =
            serde_json::from_str(r#"{"content": "<p>edited</p>"}"#).unwrap();
        assert_eq!(req.content_html.as_deref(), Some("<p>edited</p>"));
    }

    #[test]
    fn status_uses_lowercase_names() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"status": "published"}"#).unwrap();
        assert_eq!(req.status, Some(PostStatus::Published));

        assert!(serde_json::from_str::<CreatePostRequest>(r#"{"status": "bogus"}"#).is_err());
    }
}
