//! # User Entity
//!
//! A registered user. Users own ads through the ad's `author_id`; deleting a
//! user does not touch their ads.

use crate::domain::value_objects::UserId;
use serde::{Deserialize, Serialize};

/// A user.
///
/// The display name is stored as given; it is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    deleted: bool,
}

impl User {
    /// Creates an active user.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            deleted: false,
        }
    }

    /// Rebuilds a user from stored fields.
    #[must_use]
    pub(crate) fn from_parts(id: UserId, name: String, deleted: bool) -> Self {
        Self { id, name, deleted }
    }

    /// Returns the user id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the user has been soft-deleted.
    #[inline]
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Soft-deletes the user. Returns false if it was already deleted.
    pub fn mark_deleted(&mut self) -> bool {
        !std::mem::replace(&mut self.deleted, true)
    }
}
