//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::PostStatus;

/// Lifecycle state as stored in the `status` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Status {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

impl From<PostStatus> for Status {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Draft => Status::Draft,
            PostStatus::Published => Status::Published,
            PostStatus::Archived => Status::Archived,
        }
    }
}

impl From<Status> for PostStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Draft => PostStatus::Draft,
            Status::Published => PostStatus::Published,
            Status::Archived => PostStatus::Archived,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub title: String,
    #[sea_orm(column_type = "String(StringLen::N(220))", unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub content_html: String,
    #[sea_orm(column_type = "String(StringLen::N(500))", nullable)]
    pub excerpt: Option<String>,
    pub featured_image_path: Option<String>,
    /// Ordered string sequences kept as JSON arrays (single-table design).
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub categories: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub tags: Option<Json>,
    pub status: Status,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub author_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn string_seq(value: Option<Json>) -> Vec<String> {
    value
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .unwrap_or_default()
}

fn json_seq(items: &[String]) -> Option<Json> {
    Some(serde_json::to_value(items).unwrap_or(Json::Null))
}

/// Conversion from SeaORM Model to domain Post. The author summary is
/// attached separately by the repository from the joined row.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            content_html: model.content_html,
            excerpt: model.excerpt,
            categories: string_seq(model.categories),
            tags: string_seq(model.tags),
            featured_image_path: model.featured_image_path,
            status: model.status.into(),
            published_at: model.published_at.map(Into::into),
            author_id: model.author_id,
            author: None,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from domain Post to SeaORM ActiveModel.
impl From<quill_core::domain::Post> for ActiveModel {
    fn from(post: quill_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            slug: Set(post.slug),
            content_html: Set(post.content_html),
            excerpt: Set(post.excerpt),
            featured_image_path: Set(post.featured_image_path),
            categories: Set(json_seq(&post.categories)),
            tags: Set(json_seq(&post.tags)),
            status: Set(post.status.into()),
            published_at: Set(post.published_at.map(Into::into)),
            author_id: Set(post.author_id),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
