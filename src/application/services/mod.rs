//! # Application Services
//!
//! - [`AdsService`]: ads and users, forwarded to the configured repository

pub mod ads;

pub use ads::AdsService;
