//! # Ad Entity
//!
//! A classified listing owned by the user who created it.
//!
//! The entity carries every rule both storage backends must agree on:
//! content validation, author ownership and soft deletion. Repositories load
//! an [`Ad`], apply one of the mutating methods below and persist the result.
//!
//! # Lifecycle
//!
//! ```text
//! active ──delete──▶ deleted (terminal)
//! ```
//!
//! # Examples
//!
//! ```
//! use classified_ads::domain::entities::Ad;
//! use classified_ads::domain::value_objects::{AdId, Caller, Timestamp, UserId};
//!
//! let author = UserId::new(0);
//! let mut ad = Ad::new(AdId::new(0), "Bike", "Barely used", author, Timestamp::now()).unwrap();
//! assert!(!ad.is_published());
//!
//! ad.set_published(Caller::new(author), true, Timestamp::now()).unwrap();
//! assert!(ad.is_published());
//!
//! let stranger = Caller::new(UserId::new(1));
//! assert!(ad.mark_deleted(stranger).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{AdId, Caller, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Titles must be shorter than this many characters.
pub const TITLE_LIMIT: usize = 100;

/// Texts must be shorter than this many characters.
pub const TEXT_LIMIT: usize = 500;

/// A classified ad.
///
/// # Invariants
///
/// - `id` and `author_id` never change after creation
/// - title is non-empty and shorter than [`TITLE_LIMIT`] characters
/// - text is non-empty and shorter than [`TEXT_LIMIT`] characters
/// - only the author may change, publish or delete the ad
/// - a deleted ad stays deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ad {
    id: AdId,
    title: String,
    text: String,
    author_id: UserId,
    published: bool,
    deleted: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Ad {
    /// Creates a new unpublished ad with both timestamps set to `now`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTitle` or `DomainError::InvalidText` if
    /// the content fails [`Ad::validate_content`].
    pub fn new(
        id: AdId,
        title: impl Into<String>,
        text: impl Into<String>,
        author_id: UserId,
        now: Timestamp,
    ) -> DomainResult<Self> {
        let title = title.into();
        let text = text.into();
        Self::validate_content(&title, &text)?;

        Ok(Self {
            id,
            title,
            text,
            author_id,
            published: false,
            deleted: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds an ad from stored fields without re-validating them.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub(crate) fn from_parts(
        id: AdId,
        title: String,
        text: String,
        author_id: UserId,
        published: bool,
        deleted: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            text,
            author_id,
            published,
            deleted,
            created_at,
            updated_at,
        }
    }

    /// Checks the title and text length rules.
    ///
    /// Lengths are counted in characters, not bytes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTitle` if the title is empty or has
    /// [`TITLE_LIMIT`] or more characters, and `DomainError::InvalidText`
    /// likewise for the text and [`TEXT_LIMIT`].
    pub fn validate_content(title: &str, text: &str) -> DomainResult<()> {
        if title.is_empty() {
            return Err(DomainError::InvalidTitle("must not be empty".to_string()));
        }
        let title_len = title.chars().count();
        if title_len >= TITLE_LIMIT {
            return Err(DomainError::InvalidTitle(format!(
                "must be shorter than {TITLE_LIMIT} characters (got {title_len})"
            )));
        }
        if text.is_empty() {
            return Err(DomainError::InvalidText("must not be empty".to_string()));
        }
        let text_len = text.chars().count();
        if text_len >= TEXT_LIMIT {
            return Err(DomainError::InvalidText(format!(
                "must be shorter than {TEXT_LIMIT} characters (got {text_len})"
            )));
        }
        Ok(())
    }

    /// Returns the ad id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> AdId {
        self.id
    }

    /// Returns the title.
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the author's user id.
    #[inline]
    #[must_use]
    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns true if the ad is published.
    #[inline]
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.published
    }

    /// Returns true if the ad has been soft-deleted.
    #[inline]
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns the creation time.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the last update time.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Fails unless `caller` is the author.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotAuthor` on mismatch.
    pub fn ensure_author(&self, caller: Caller) -> DomainResult<()> {
        if caller.is(self.author_id) {
            Ok(())
        } else {
            Err(DomainError::not_author(self.id, caller.user_id()))
        }
    }

    /// Fails if the ad has been deleted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AdAlreadyDeleted` for deleted ads.
    pub fn ensure_active(&self) -> DomainResult<()> {
        if self.deleted {
            Err(DomainError::AdAlreadyDeleted(self.id))
        } else {
            Ok(())
        }
    }

    /// Sets the published flag and refreshes the update time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotAuthor` if `caller` is not the author, then
    /// `DomainError::AdAlreadyDeleted` if the ad is deleted.
    pub fn set_published(
        &mut self,
        caller: Caller,
        published: bool,
        now: Timestamp,
    ) -> DomainResult<()> {
        self.ensure_author(caller)?;
        self.ensure_active()?;
        self.published = published;
        self.updated_at = now;
        Ok(())
    }

    /// Replaces title and text and refreshes the update time.
    ///
    /// Ownership is checked before the new content is validated.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotAuthor`, `DomainError::AdAlreadyDeleted`,
    /// `DomainError::InvalidTitle` or `DomainError::InvalidText`, in that
    /// order of precedence.
    pub fn update_content(
        &mut self,
        caller: Caller,
        title: impl Into<String>,
        text: impl Into<String>,
        now: Timestamp,
    ) -> DomainResult<()> {
        self.ensure_author(caller)?;
        self.ensure_active()?;
        let title = title.into();
        let text = text.into();
        Self::validate_content(&title, &text)?;
        self.title = title;
        self.text = text;
        self.updated_at = now;
        Ok(())
    }

    /// Soft-deletes the ad.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotAuthor` if `caller` is not the author, then
    /// `DomainError::AdAlreadyDeleted` on a second delete.
    pub fn mark_deleted(&mut self, caller: Caller) -> DomainResult<()> {
        self.ensure_author(caller)?;
        self.ensure_active()?;
        self.deleted = true;
        Ok(())
    }
}
