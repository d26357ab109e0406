//! # Transport Layer
//!
//! - [`rest`]: JSON over HTTP (axum)
//! - [`grpc`]: protobuf over HTTP/2 (tonic)
//!
//! Both decode requests, call [`AdsService`](crate::application::AdsService)
//! and map [`ApplicationError`](crate::application::ApplicationError) to
//! their own status codes.

pub mod grpc;
pub mod rest;
