//! # Identifiers
//!
//! Integer identifiers for ads and users.
//!
//! Both are assigned by the repository in creation order, starting at 0.
//! They wrap `i64` because that is what the wire formats and the
//! `BIGINT` columns carry.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from its raw value.
            #[inline]
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw value.
            #[inline]
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Returns the value as a storage index, or `None` when negative.
            #[inline]
            #[must_use]
            pub fn as_index(self) -> Option<usize> {
                usize::try_from(self.0).ok()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

integer_id!(
    /// Identifier of an [`Ad`](crate::domain::entities::Ad).
    AdId
);

integer_id!(
    /// Identifier of a [`User`](crate::domain::entities::User).
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_round_trip() {
        let id = AdId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(AdId::from(42), id);
    }

    #[test]
    fn negative_ids_have_no_index() {
        assert_eq!(UserId::new(-1).as_index(), None);
        assert_eq!(UserId::new(0).as_index(), Some(0));
        assert_eq!(UserId::new(7).as_index(), Some(7));
    }

    #[test]
    fn display_is_raw_number() {
        assert_eq!(AdId::new(3).to_string(), "3");
        assert_eq!(UserId::new(-5).to_string(), "-5");
    }

    #[test]
    fn serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&UserId::new(9)).ok().as_deref(), Some("9"));
    }
}
