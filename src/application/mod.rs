//! # Application Layer
//!
//! Transport-neutral entry points over the repository.
//!
//! - [`services::AdsService`]: one async operation per repository operation
//! - [`context::RequestContext`]: request id used to label spans
//! - [`error::ApplicationError`]: the error taxonomy transports map from

pub mod context;
pub mod error;
pub mod services;

pub use context::RequestContext;
pub use error::{ApplicationError, ApplicationResult};
pub use services::AdsService;
