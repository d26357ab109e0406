//! # Domain Errors
//!
//! Business rule violations raised by the [`Ad`](crate::domain::entities::Ad)
//! entity.

use crate::domain::value_objects::{AdId, UserId};
use thiserror::Error;

/// Error raised when a domain rule rejects an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Title is empty or too long.
    #[error("validation error: invalid title: {0}")]
    InvalidTitle(String),

    /// Text is empty or too long.
    #[error("validation error: invalid text: {0}")]
    InvalidText(String),

    /// The caller is not the ad's author.
    #[error("not author: user {caller} does not own ad {ad_id}")]
    NotAuthor {
        /// Ad that was targeted.
        ad_id: AdId,
        /// User that attempted the operation.
        caller: UserId,
    },

    /// The ad has already been soft-deleted.
    #[error("ad {0} has been already deleted")]
    AdAlreadyDeleted(AdId),
}

impl DomainError {
    /// Creates a not author error.
    #[must_use]
    pub fn not_author(ad_id: AdId, caller: UserId) -> Self {
        Self::NotAuthor { ad_id, caller }
    }

    /// Returns true if this is a title or text validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidTitle(_) | Self::InvalidText(_))
    }

    /// Returns true if this is an ownership failure.
    #[must_use]
    pub fn is_not_author(&self) -> bool {
        matches!(self, Self::NotAuthor { .. })
    }

    /// Returns true if the target was already deleted.
    #[must_use]
    pub fn is_already_deleted(&self) -> bool {
        matches!(self, Self::AdAlreadyDeleted(_))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors() {
        let err = DomainError::InvalidTitle("must not be empty".to_string());
        assert!(err.is_validation());
        assert!(err.to_string().contains("validation error"));
        assert!(DomainError::InvalidText("too long".to_string()).is_validation());
    }

    #[test]
    fn not_author_error() {
        let err = DomainError::not_author(AdId::new(1), UserId::new(2));
        assert!(err.is_not_author());
        assert!(!err.is_validation());
        assert!(err.to_string().contains("not author"));
    }

    #[test]
    fn already_deleted_error() {
        let err = DomainError::AdAlreadyDeleted(AdId::new(5));
        assert!(err.is_already_deleted());
        assert!(err.to_string().contains("already deleted"));
    }
}
