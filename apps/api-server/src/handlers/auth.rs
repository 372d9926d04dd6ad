//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::domain::User;
use quill_core::ports::{PasswordService, TokenService};
use quill_shared::dto::{
    AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, UserResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn auth_response(
    token_service: &Arc<dyn TokenService>,
    user: User,
) -> Result<AuthResponse, AppError> {
    let pair = token_service
        .sign_pair(&user)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.access_expiry_seconds() as u64,
        user: user.into(),
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("Full name is required".to_string()));
    }
    if req.phone.trim().is_empty() {
        return Err(AppError::BadRequest("Phone is required".to_string()));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    // Check if the email is already registered
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    // Hash password; the plaintext is never stored
    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(req.full_name, req.phone, req.email, password_hash);
    let saved = state.users.insert(user).await?;

    let response = auth_response(token_service.get_ref(), saved)?;
    Ok(HttpResponse::Created().json(response))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Same generic failure for an unknown email and a wrong password,
    // so the endpoint cannot be used to enumerate accounts.
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let response = auth_response(token_service.get_ref(), user)?;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/auth/refresh
pub async fn refresh(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    body: web::Json<RefreshRequest>,
) -> AppResult<HttpResponse> {
    let claims = token_service
        .validate_refresh(&body.refresh_token)
        .map_err(|_| AppError::Unauthorized)?;

    // The user may have been deleted since the token was issued.
    let user = state
        .users
        .find_by_id(claims.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let response = auth_response(token_service.get_ref(), user)?;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
