//! # Chronicle Infrastructure
//!
//! Concrete implementations of the ports defined in `chronicle-core`:
//! Postgres repositories via SeaORM, Argon2 password hashing and JWT bearer
//! tokens.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, PostgresPostRepository, PostgresUserRepository};

// the api crate holds a pool handle for health checks without depending on
// sea-orm itself
pub use sea_orm::DbConn;
