//! # classified-ads
//!
//! A classified-ads service: users create ads, publish them, edit them and
//! delete them, and anyone can list or fetch published ads.
//!
//! # Architecture
//!
//! ```text
//! api (REST: axum, gRPC: tonic)
//!   └─▶ application (AdsService, RequestContext, ApplicationError)
//!         └─▶ infrastructure::persistence (Repository)
//!               ├─▶ in_memory
//!               └─▶ postgres (sqlx)
//! domain (Ad, User, ids, filters, DomainError) is shared by every layer.
//! ```
//!
//! # Modules
//!
//! - [`domain`]: entities, value objects and business rules
//! - [`application`]: transport-neutral use cases
//! - [`infrastructure`]: storage backends, configuration and logging
//! - [`api`]: REST and gRPC adapters
//! - [`server`]: process wiring and graceful shutdown

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod server;
