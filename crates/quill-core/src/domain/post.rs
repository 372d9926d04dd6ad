use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a post, controlling its visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PostStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            _ => Err(()),
        }
    }
}

/// Author summary embedded into a post on reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostAuthor {
    pub id: Uuid,
    pub full_name: String,
}

/// Post entity - a blog article with a draft/published/archived lifecycle.
///
/// `published_at` is non-null exactly when `status` is [`PostStatus::Published`].
/// The slug is unique across all posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
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
    pub author_id: Option<Uuid>,
    /// Populated by the repository on reads; never persisted directly.
    pub author: Option<PostAuthor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post with generated ID and fresh timestamps.
    pub fn new(title: String, slug: String, content_html: String, author_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            content_html,
            excerpt: None,
            categories: Vec::new(),
            tags: Vec::new(),
            featured_image_path: None,
            status: PostStatus::Draft,
            published_at: None,
            author_id,
            author: None,
            created_at: now,
            updated_at: now,
        }
    }
}
