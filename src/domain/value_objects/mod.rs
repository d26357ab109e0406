//! # Value Objects
//!
//! Immutable types with domain semantics.
//!
//! ## Identity Types
//!
//! - [`AdId`], [`UserId`]: repository-assigned integer identifiers
//! - [`Caller`]: the acting identity of an ownership-checked operation
//!
//! ## Queries
//!
//! - [`AdFilter`], [`AuthorFilter`]: predicates for listing ads
//!
//! ## Time
//!
//! - [`Timestamp`]: UTC creation and update times

pub mod caller;
pub mod filter;
pub mod ids;
pub mod timestamp;

pub use caller::Caller;
pub use filter::{AdFilter, AuthorFilter};
pub use ids::{AdId, UserId};
pub use timestamp::Timestamp;
