//! # PostgreSQL Persistence
//!
//! sqlx-backed repositories and the helpers that open and migrate the pool.

pub mod connection;
pub mod repository;

pub use connection::{create_pool, run_migrations};
pub use repository::PostgresRepository;
