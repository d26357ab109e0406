//! # REST Routes
//!
//! Route table for the REST API.

use crate::api::rest::handlers::{
    AppState, change_ad_status, create_ad, create_user, delete_ad, delete_user, get_ad, get_user,
    health_check, list_ads, route_not_found, update_ad,
};
use axum::Router;
use axum::routing::{delete, get, post, put};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Creates the versioned API routes without middleware.
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ads", post(create_ad).get(list_ads))
        .route("/ads/{id}", get(get_ad).put(update_ad))
        .route("/ads/{id}/status", put(change_ad_status))
        .route("/ads/{id}/del", delete(delete_ad))
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/del", delete(delete_user))
}

/// Creates the REST router under `/api/v1` with request tracing.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
