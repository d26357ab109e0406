//! # Persistence Layer
//!
//! Repository ports and their two implementations.
//!
//! ## Repository Traits (Ports)
//!
//! - [`AdRepository`]: ads with ownership checks and soft deletion
//! - [`UserRepository`]: users with soft deletion
//! - [`Repository`]: both, as one trait object
//!
//! ## Implementations
//!
//! - `in_memory`: process-local store, ids start at 0
//! - `postgres`: sqlx over PostgreSQL, same contract

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use in_memory::InMemoryRepository;
pub use postgres::PostgresRepository;
pub use traits::{AdRepository, Repository, RepositoryError, RepositoryResult, UserRepository};
