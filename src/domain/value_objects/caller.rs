//! # Caller
//!
//! The identity presented to ownership-checked operations.
//!
//! A [`Caller`] is whatever user id the transport layer received with the
//! request. It is not authenticated here; the only check performed against
//! it is strict equality with an ad's stored author.

use crate::domain::value_objects::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity on whose behalf a mutation runs.
///
/// # Examples
///
/// ```
/// use classified_ads::domain::value_objects::{Caller, UserId};
///
/// let caller = Caller::new(UserId::new(3));
/// assert!(caller.is(UserId::new(3)));
/// assert!(!caller.is(UserId::new(4)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Caller(UserId);

impl Caller {
    /// Wraps a user id as the acting identity.
    #[inline]
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self(user_id)
    }

    /// Returns the acting user id.
    #[inline]
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.0
    }

    /// Returns true if this caller is `user_id`.
    #[inline]
    #[must_use]
    pub fn is(&self, user_id: UserId) -> bool {
        self.0 == user_id
    }
}

impl From<UserId> for Caller {
    fn from(user_id: UserId) -> Self {
        Self(user_id)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user {}", self.0)
    }
}
