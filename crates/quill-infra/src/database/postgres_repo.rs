//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use quill_core::domain::{Post, PostAuthor, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostFilter, PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

fn map_db_err(err: sea_orm::DbErr) -> RepoError {
    let msg = err.to_string();
    if msg.contains("duplicate") || msg.contains("unique") {
        RepoError::Constraint(msg)
    } else {
        RepoError::Query(msg)
    }
}

/// Mask an email for logging to keep PII out of the logs.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at) => {
            let (local, domain) = email.split_at(at);
            if local.len() > 1 {
                format!("{}***{}", &local[..1], domain)
            } else {
                format!("***{domain}")
            }
        }
        None => "***".to_string(),
    }
}

fn attach_author(model: post::Model, author: Option<user::Model>) -> Post {
    let mut domain: Post = model.into();
    domain.author = author.map(|u| PostAuthor {
        id: u.id,
        full_name: u.full_name,
    });
    domain
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// PostgreSQL post repository. Reads join in the author for the summary.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(|(model, author)| attach_author(model, author)))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(|(model, author)| attach_author(model, author)))
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, RepoError> {
        let mut query = PostEntity::find().filter(post::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(post::Column::Id.ne(id));
        }

        let count = query.count(&self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let active: post::ActiveModel = post.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let active: post::ActiveModel = post.into();
        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn list(&self, filter: PostFilter) -> Result<(Vec<Post>, u64), RepoError> {
        let mut query = PostEntity::find();

        if let Some(q) = &filter.q {
            query = query.filter(
                Condition::any()
                    .add(post::Column::Title.contains(q))
                    .add(post::Column::ContentHtml.contains(q))
                    .add(post::Column::Slug.contains(q)),
            );
        }
        if let Some(status) = filter.status {
            query = query.filter(post::Column::Status.eq(post::Status::from(status)));
        }

        let total = query.clone().count(&self.db).await.map_err(map_db_err)?;

        let rows = query
            .find_also_related(UserEntity)
            .order_by_desc(post::Column::CreatedAt)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok((
            rows.into_iter()
                .map(|(model, author)| attach_author(model, author))
                .collect(),
            total,
        ))
    }
}
