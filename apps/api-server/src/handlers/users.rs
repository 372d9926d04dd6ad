//! User administration handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::error::RepoError;
use quill_shared::dto::UserResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/users - Protected route
pub async fn list(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let users = state.users.find_all().await?;
    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/users/{id} - Protected route
pub async fn get_one(
    state: web::Data<AppState>,
    _identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// DELETE /api/users/{id} - Protected route
pub async fn remove(
    state: web::Data<AppState>,
    _identity: Identity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .users
        .delete(id.into_inner())
        .await
        .map_err(|err| match err {
            RepoError::NotFound => AppError::NotFound("User not found".to_string()),
            other => other.into(),
        })?;

    Ok(HttpResponse::NoContent().finish())
}
