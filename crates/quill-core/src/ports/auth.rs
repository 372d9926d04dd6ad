//! Authentication ports.

use uuid::Uuid;

use crate::domain::User;

/// Claims carried by both access and refresh tokens.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub exp: i64,
}

/// A freshly signed access/refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token service trait for JWT operations.
pub trait TokenService: Send + Sync {
    /// Sign an access/refresh pair for a user.
    fn sign_pair(&self, user: &User) -> Result<TokenPair, AuthError>;

    /// Validate and decode an access token.
    fn validate_access(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Validate and decode a refresh token.
    fn validate_refresh(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of freshly issued access tokens, in seconds.
    fn access_expiry_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("missing authorization header")]
    MissingAuth,

    #[error("hashing error: {0}")]
    HashingError(String),
}
