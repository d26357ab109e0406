//! # Application Errors
//!
//! Error type returned by [`AdsService`](crate::application::services::AdsService).
//!
//! The variants form the taxonomy every transport maps to its own status
//! codes. Repository and domain errors convert 1:1, keeping their category.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Validation(String)     - title or text rejected
//! ├── NotAuthor              - caller does not own the ad
//! ├── NotFound               - unknown (or deleted) identifier
//! ├── AlreadyDeleted         - ad was soft-deleted
//! └── Storage(String)        - backing store failed
//! ```
//!
//! # Examples
//!
//! ```
//! use classified_ads::application::error::ApplicationError;
//! use classified_ads::domain::DomainError;
//!
//! let err: ApplicationError = DomainError::InvalidTitle("must not be empty".into()).into();
//! assert!(err.is_validation());
//! assert_eq!(err.to_string(), "validation error: invalid title: must not be empty");
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{AdId, UserId};
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Title or text failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller is not the ad's author.
    #[error("not author: user {user_id} does not own ad {ad_id}")]
    NotAuthor {
        /// Targeted ad.
        ad_id: AdId,
        /// Acting user.
        user_id: UserId,
    },

    /// Resource not found.
    #[error("not found: {resource_type} with id {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// Resource has already been soft-deleted.
    #[error("{resource_type} {id} has been already deleted")]
    AlreadyDeleted {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// Backing store failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Creates a storage error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an ownership error.
    #[must_use]
    pub fn is_not_author(&self) -> bool {
        matches!(self, Self::NotAuthor { .. })
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the target was already deleted.
    #[must_use]
    pub fn is_already_deleted(&self) -> bool {
        matches!(self, Self::AlreadyDeleted { .. })
    }

    /// Returns true if the backing store failed.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidTitle(reason) => Self::Validation(format!("invalid title: {reason}")),
            DomainError::InvalidText(reason) => Self::Validation(format!("invalid text: {reason}")),
            DomainError::NotAuthor { ad_id, caller } => Self::NotAuthor {
                ad_id,
                user_id: caller,
            },
            DomainError::AdAlreadyDeleted(id) => Self::AlreadyDeleted {
                resource_type: "ad".to_string(),
                id: id.to_string(),
            },
        }
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity_type, id } => Self::NotFound {
                resource_type: entity_type.to_string(),
                id,
            },
            RepositoryError::Domain(domain) => domain.into(),
            storage @ (RepositoryError::Connection(_)
            | RepositoryError::Query(_)
            | RepositoryError::Internal(_)) => Self::Storage(storage.to_string()),
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
