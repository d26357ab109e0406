//! # REST API
//!
//! JSON over HTTP using axum.
//!
//! # Endpoints
//!
//! ## Ads
//! - `POST /api/v1/ads` - Create ad
//! - `PUT /api/v1/ads/{id}/status` - Publish or unpublish
//! - `PUT /api/v1/ads/{id}` - Replace title and text
//! - `GET /api/v1/ads?pub=&auth=&title=` - List ads
//! - `GET /api/v1/ads/{id}` - Get ad
//! - `DELETE /api/v1/ads/{id}/del` - Delete ad (body `{"author_id": ..}`)
//!
//! ## Users
//! - `POST /api/v1/users` - Create user
//! - `GET /api/v1/users/{id}` - Get user
//! - `DELETE /api/v1/users/{id}/del` - Delete user
//!
//! ## Health
//! - `GET /api/v1/health` - Liveness probe
//!
//! # Usage
//!
//! ```ignore
//! use classified_ads::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(service));
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    AdResponse, ApiError, AppState, ChangeAdStatusRequest, CreateAdRequest, CreateUserRequest,
    DeleteAdRequest, EmptyResponse, Envelope, HealthResponse, ListAdsQuery, UpdateAdRequest,
    UserResponse,
};
pub use routes::create_router;
