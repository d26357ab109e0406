//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! This module defines the repository traits (ports) used by the application
//! layer. Two backends implement them: an in-memory store and PostgreSQL.
//! Both follow the same contract, including soft deletion.
//!
//! # Available Repositories
//!
//! - [`AdRepository`]: ad CRUD with ownership checks
//! - [`UserRepository`]: user CRUD
//! - [`Repository`]: both of the above, as one object
//!
//! # Examples
//!
//! ```ignore
//! use classified_ads::domain::value_objects::AdFilter;
//! use classified_ads::infrastructure::persistence::traits::AdRepository;
//!
//! async fn published(repo: &impl AdRepository) {
//!     let filter = AdFilter::new().published_only(true);
//!     let ads = repo.list_ads(&filter).await.unwrap();
//!     println!("Found {} published ads", ads.len());
//! }
//! ```

use crate::domain::entities::{Ad, User};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{AdFilter, AdId, Caller, UserId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// A domain rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if a domain rule rejected the operation.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Returns true if the backing store itself failed.
    #[must_use]
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Query(_) | Self::Internal(_)
        )
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for ads.
///
/// Ownership-checked operations take an explicit [`Caller`]. The checks run in
/// this order: not found, not author, already deleted, content validation.
#[async_trait]
pub trait AdRepository: Send + Sync + fmt::Debug {
    /// Stores a new unpublished ad and returns it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Domain` with a validation error if the title
    /// or text is invalid.
    async fn create_ad(&self, title: &str, text: &str, author: UserId) -> RepositoryResult<Ad>;

    /// Sets the published flag of an ad owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for unknown ids and
    /// `RepositoryError::Domain` for ownership or deletion failures.
    async fn update_ad_published_status(
        &self,
        id: AdId,
        caller: Caller,
        published: bool,
    ) -> RepositoryResult<Ad>;

    /// Replaces title and text of an ad owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for unknown ids and
    /// `RepositoryError::Domain` for ownership, deletion or validation
    /// failures.
    async fn update_ad_text(
        &self,
        id: AdId,
        caller: Caller,
        title: &str,
        text: &str,
    ) -> RepositoryResult<Ad>;

    /// Lists non-deleted ads matching `filter`, in creation order.
    async fn list_ads(&self, filter: &AdFilter) -> RepositoryResult<Vec<Ad>>;

    /// Gets an ad by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for unknown ids and
    /// `DomainError::AdAlreadyDeleted` for deleted ads.
    async fn get_ad(&self, id: AdId) -> RepositoryResult<Ad>;

    /// Soft-deletes an ad owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound`, then `DomainError::NotAuthor`,
    /// then `DomainError::AdAlreadyDeleted`.
    async fn delete_ad(&self, id: AdId, caller: Caller) -> RepositoryResult<()>;
}

/// Repository for users.
#[async_trait]
pub trait UserRepository: Send + Sync + fmt::Debug {
    /// Stores a new user and returns it.
    async fn create_user(&self, name: &str) -> RepositoryResult<User>;

    /// Gets an active user by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user is unknown or deleted.
    async fn get_user(&self, id: UserId) -> RepositoryResult<User>;

    /// Soft-deletes a user. Their ads are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user is unknown or already
    /// deleted.
    async fn delete_user(&self, id: UserId) -> RepositoryResult<()>;
}

/// Combined ad and user repository.
pub trait Repository: AdRepository + UserRepository {}

impl<T: AdRepository + UserRepository> Repository for T {}

#[cfg(test)]
mod tests {
    use super::*;

    mod repository_error {
        use super::*;

        #[test]
        fn not_found_error() {
            let err = RepositoryError::not_found("Ad", AdId::new(123));
            assert!(err.is_not_found());
            assert!(!err.is_domain());
            assert!(!err.is_storage_failure());
            assert!(err.to_string().contains("not found"));
            assert!(err.to_string().contains("Ad"));
            assert!(err.to_string().contains("123"));
        }

        #[test]
        fn domain_error_is_transparent() {
            let err: RepositoryError = DomainError::AdAlreadyDeleted(AdId::new(4)).into();
            assert!(err.is_domain());
            assert_eq!(err.to_string(), "ad 4 has been already deleted");
        }

        #[test]
        fn connection_error() {
            let err = RepositoryError::connection("Connection refused");
            assert!(err.is_storage_failure());
            assert!(err.to_string().contains("Connection"));
            assert!(err.to_string().contains("refused"));
        }

        #[test]
        fn query_error() {
            let err = RepositoryError::query("Invalid SQL");
            assert!(err.is_storage_failure());
            assert!(err.to_string().contains("Query"));
            assert!(err.to_string().contains("Invalid SQL"));
        }

        #[test]
        fn internal_error() {
            let err = RepositoryError::internal("Unexpected state");
            assert!(err.to_string().contains("Internal"));
        }
    }
}
