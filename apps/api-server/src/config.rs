//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::{DatabaseConfig, JwtConfig};

/// Configuration errors surfaced at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub cors_origins: Vec<String>,
    pub allow_archived: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// The JWT secrets are required: the signing context is constructed
    /// explicitly here, with no hardcoded fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            if let Some(max) = env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
            {
                config.max_connections = max;
            }
            if let Some(min) = env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
            {
                config.min_connections = min;
            }
            config.sqlx_logging = env::var("DB_LOGGING").map(|v| v == "true").unwrap_or(false);
            config
        });

        let mut jwt = JwtConfig::new(
            required_var("JWT_ACCESS_SECRET")?,
            required_var("JWT_REFRESH_SECRET")?,
        );
        if let Some(minutes) = env::var("JWT_ACCESS_TTL_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            jwt.access_ttl_minutes = minutes;
        }
        if let Some(days) = env::var("JWT_REFRESH_TTL_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            jwt.refresh_ttl_days = days;
        }

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7000),
            database,
            jwt,
            cors_origins,
            allow_archived: env::var("ALLOW_ARCHIVED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        })
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
