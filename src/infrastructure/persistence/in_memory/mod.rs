//! # In-Memory Repositories
//!
//! In-memory implementation for tests and database-free deployments.
//!
//! ## Available Repositories
//!
//! - [`InMemoryRepository`]: ads and users
//!
//! ## Thread Safety
//!
//! The store sits behind `Arc<tokio::sync::RwLock<..>>`.

pub mod repository;

pub use repository::InMemoryRepository;
