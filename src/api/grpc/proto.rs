//! # Protobuf Types
//!
//! Code generated by `tonic-prost-build` from
//! `proto/classified_ads/v1/ads.proto`.

#[allow(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
pub mod classified_ads_v1 {
    tonic::include_proto!("classified_ads.v1");
}

pub use classified_ads_v1::ad_service_client::AdServiceClient;
pub use classified_ads_v1::ad_service_server::{AdService, AdServiceServer};
pub use classified_ads_v1::*;
