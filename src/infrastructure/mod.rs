//! # Infrastructure Layer
//!
//! Adapters for storage, configuration and logging.
//!
//! - [`config`]: environment-driven settings
//! - [`logging`]: `tracing` subscriber setup
//! - [`persistence`]: repository ports with in-memory and PostgreSQL backends

pub mod config;
pub mod logging;
pub mod persistence;
