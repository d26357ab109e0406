//! # Domain Entities
//!
//! - [`Ad`]: classified listing with ownership and soft-delete rules
//! - [`User`]: registered user

pub mod ad;
pub mod user;

pub use ad::{Ad, TEXT_LIMIT, TITLE_LIMIT};
pub use user::User;
