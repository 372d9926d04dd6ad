//! Post lifecycle handlers.

use std::str::FromStr;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::PostStatus;
use quill_core::service::ListParams;
use quill_shared::dto::{
    CreatePostRequest, ListPostsQuery, PostListResponse, PostResponse, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts?q=&page=1&limit=10&status=draft|published|archived
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    // An unknown status value is ignored rather than rejected.
    let status = query
        .status
        .as_deref()
        .and_then(|s| PostStatus::from_str(s).ok());

    let page = state
        .post_service
        .list(ListParams {
            q: query.q,
            page: query.page,
            limit: query.limit,
            status,
        })
        .await?;

    Ok(HttpResponse::Ok().json(PostListResponse::from(page)))
}

/// GET /api/posts/slug/{slug}
pub async fn get_by_slug(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.post_service.find_by_slug(&slug).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// GET /api/posts/{id}
pub async fn get_one(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.post_service.find_one(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// POST /api/posts - Protected route
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .post_service
        .create(body.into_inner().into(), identity.user_id)
        .await?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// POST /api/posts/draft - Protected route
///
/// Saves the payload as a draft regardless of any status it carries.
pub async fn save_draft(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .post_service
        .save_draft(body.into_inner().into(), identity.user_id)
        .await?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// PUT/PATCH /api/posts/{id} - Protected route
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    id: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .post_service
        .update(id.into_inner(), body.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// POST /api/posts/{id}/publish - Protected route
pub async fn publish(
    state: web::Data<AppState>,
    _identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.post_service.publish(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// POST /api/posts/{id}/reset - Protected route
pub async fn reset(
    state: web::Data<AppState>,
    _identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.post_service.reset(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// DELETE /api/posts/{id} - Protected route
pub async fn remove(
    state: web::Data<AppState>,
    _identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.post_service.remove(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
