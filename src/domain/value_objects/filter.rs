//! # Ad Filter
//!
//! Query descriptor for listing ads.
//!
//! A filter combines up to three predicates with AND semantics:
//!
//! - published only
//! - author equals a given user (or [`AuthorFilter::Any`])
//! - title equals a given string exactly (an empty title means "any")
//!
//! Soft-deleted ads never match, whatever the filter says.
//!
//! # Examples
//!
//! ```
//! use classified_ads::domain::value_objects::{AdFilter, AuthorFilter, UserId};
//!
//! let filter = AdFilter::new()
//!     .published_only(true)
//!     .with_author(AuthorFilter::Only(UserId::new(7)))
//!     .with_title("Bike");
//!
//! assert!(filter.is_published_only());
//! assert_eq!(filter.title(), Some("Bike"));
//! ```

use crate::domain::entities::Ad;
use crate::domain::value_objects::UserId;
use serde::{Deserialize, Serialize};

/// Author predicate of an [`AdFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorFilter {
    /// Ads from every author.
    #[default]
    Any,
    /// Ads from one author.
    Only(UserId),
}

impl AuthorFilter {
    /// Wire value meaning "any author".
    pub const ANY_SENTINEL: i64 = -1;

    /// Interprets a raw wire value, mapping [`Self::ANY_SENTINEL`] to [`Self::Any`].
    ///
    /// # Examples
    ///
    /// ```
    /// use classified_ads::domain::value_objects::{AuthorFilter, UserId};
    ///
    /// assert_eq!(AuthorFilter::from_raw(-1), AuthorFilter::Any);
    /// assert_eq!(AuthorFilter::from_raw(4), AuthorFilter::Only(UserId::new(4)));
    /// ```
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        if raw == Self::ANY_SENTINEL {
            Self::Any
        } else {
            Self::Only(UserId::new(raw))
        }
    }

    /// Returns true if `author` satisfies this predicate.
    #[inline]
    #[must_use]
    pub fn accepts(&self, author: UserId) -> bool {
        match self {
            Self::Any => true,
            Self::Only(id) => *id == author,
        }
    }

    /// Returns the author id to filter on, if any.
    #[inline]
    #[must_use]
    pub fn author(&self) -> Option<UserId> {
        match self {
            Self::Any => None,
            Self::Only(id) => Some(*id),
        }
    }
}

/// Filter used by `ListAds`.
///
/// The default filter matches every non-deleted ad.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdFilter {
    published_only: bool,
    author: AuthorFilter,
    title: Option<String>,
}

impl AdFilter {
    /// Creates a filter matching every non-deleted ad.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the result to published ads when `enabled`.
    #[must_use]
    pub fn published_only(mut self, enabled: bool) -> Self {
        self.published_only = enabled;
        self
    }

    /// Sets the author predicate.
    #[must_use]
    pub fn with_author(mut self, author: AuthorFilter) -> Self {
        self.author = author;
        self
    }

    /// Sets the exact title predicate. An empty title clears it.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = if title.is_empty() { None } else { Some(title) };
        self
    }

    /// Returns true if only published ads match.
    #[inline]
    #[must_use]
    pub fn is_published_only(&self) -> bool {
        self.published_only
    }

    /// Returns the author predicate.
    #[inline]
    #[must_use]
    pub fn author(&self) -> AuthorFilter {
        self.author
    }

    /// Returns the exact title predicate, if set.
    #[inline]
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns true if `ad` is visible through this filter.
    #[must_use]
    pub fn matches(&self, ad: &Ad) -> bool {
        !ad.is_deleted()
            && (!self.published_only || ad.is_published())
            && self.author.accepts(ad.author_id())
            && self.title.as_deref().is_none_or(|t| t == ad.title())
    }
}
