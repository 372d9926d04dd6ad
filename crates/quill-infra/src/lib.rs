//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! PostgreSQL repositories via SeaORM, in-memory repositories for running
//! without a database, and the JWT/Argon2 authentication services.

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, connect};
pub use memory::{InMemoryPostRepository, InMemoryUserRepository};
