//! JWT token service issuing access/refresh pairs.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::domain::User;
use quill_core::ports::{AuthError, TokenClaims, TokenPair, TokenService};

/// Signing context for the token issuer. Both secrets come from
/// configuration; there is deliberately no default with a baked-in secret.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

impl JwtConfig {
    pub fn new(access_secret: String, refresh_secret: String) -> Self {
        Self {
            access_secret,
            refresh_secret,
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    email: String,
    full_name: String,
    phone: String,
    iat: i64,
    exp: i64,
}

/// JWT-based token service with separate keys for access and refresh tokens.
pub struct JwtTokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: TimeDelta,
    refresh_ttl: TimeDelta,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: TimeDelta::minutes(config.access_ttl_minutes),
            refresh_ttl: TimeDelta::days(config.refresh_ttl_days),
        }
    }

    fn sign(&self, user: &User, key: &EncodingKey, ttl: TimeDelta) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            phone: user.phone.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, key).map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate(&self, token: &str, key: &DecodingKey) -> Result<TokenClaims, AuthError> {
        let token_data =
            decode::<Claims>(token, key, &Validation::default()).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            email: token_data.claims.email,
            full_name: token_data.claims.full_name,
            phone: token_data.claims.phone,
            exp: token_data.claims.exp,
        })
    }
}

impl TokenService for JwtTokenService {
    fn sign_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.sign(user, &self.access_encoding, self.access_ttl)?,
            refresh_token: self.sign(user, &self.refresh_encoding, self.refresh_ttl)?,
        })
    }

    fn validate_access(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.validate(token, &self.access_decoding)
    }

    fn validate_refresh(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.validate(token, &self.refresh_decoding)
    }

    fn access_expiry_seconds(&self) -> i64 {
        self.access_ttl.num_seconds()
    }
}
