//! # gRPC Services
//!
//! gRPC service implementation using tonic.
//!
//! # Modules
//!
//! - [`proto`]: Generated protobuf types and gRPC service definitions
//! - [`conversions`]: Conversions between domain types and protobuf messages
//! - [`service`]: gRPC service implementation
//!
//! # Usage
//!
//! ```ignore
//! use classified_ads::api::grpc::{AdServiceImpl, proto::AdServiceServer};
//! use tonic::transport::Server;
//!
//! let service = AdServiceImpl::new(ads_service);
//! Server::builder()
//!     .add_service(AdServiceServer::new(service))
//!     .serve("[::1]:50051".parse()?)
//!     .await?;
//! ```

pub mod conversions;
pub mod proto;
pub mod service;

pub use proto::classified_ads_v1;
pub use service::AdServiceImpl;
