//! # Domain Layer
//!
//! Entities, value objects and business rules of the ads service. Nothing in
//! here knows about storage or transports.
//!
//! - [`entities`]: [`Ad`](entities::Ad) and [`User`](entities::User)
//! - [`value_objects`]: identifiers, [`Caller`](value_objects::Caller),
//!   [`AdFilter`](value_objects::AdFilter), timestamps
//! - [`errors`]: [`DomainError`](errors::DomainError)

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
