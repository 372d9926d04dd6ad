//! Database connection management and PostgreSQL repositories.

mod connections;
pub mod entity;
mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use postgres_repo::{PostgresPostRepository, PostgresUserRepository};
