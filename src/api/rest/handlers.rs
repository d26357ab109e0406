//! # REST Handlers
//!
//! HTTP request handlers for the REST API.
//!
//! Every response body is an [`Envelope`]: `{"data": ..., "error": ...}` with
//! exactly one of the two set.

use crate::application::{AdsService, ApplicationError, RequestContext};
use crate::domain::entities::{Ad, User};
use crate::domain::value_objects::{AdFilter, AdId, AuthorFilter, Caller, UserId};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;

/// Header carrying a client-chosen request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for REST handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Ads and users use cases.
    pub service: AdsService,
}

impl AppState {
    /// Creates the state around `service`.
    #[must_use]
    pub fn new(service: AdsService) -> Self {
        Self { service }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok());
        Ok(RequestContext::from_header(header))
    }
}

// ============================================================================
// Envelope and Errors
// ============================================================================

/// Response body wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Payload on success.
    pub data: Option<T>,
    /// Error message on failure.
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Wraps an error message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Handler error rendered as an envelope with a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Returns the HTTP status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        let status = match &err {
            ApplicationError::NotAuthor { .. } => StatusCode::FORBIDDEN,
            ApplicationError::Validation(_)
            | ApplicationError::NotFound { .. }
            | ApplicationError::AlreadyDeleted { .. } => StatusCode::BAD_REQUEST,
            ApplicationError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Envelope::<()>::failure(self.message))).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(Envelope::success(data)))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("id should be a number"))
}

/// Parses a boolean the lenient way query strings usually spell them.
#[must_use]
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /ads`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdRequest {
    /// Ad title.
    pub title: String,
    /// Ad text.
    pub text: String,
    /// Author.
    pub user_id: i64,
}

/// Body of `PUT /ads/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeAdStatusRequest {
    /// New published flag.
    pub published: bool,
    /// Acting user.
    pub user_id: i64,
}

/// Body of `PUT /ads/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAdRequest {
    /// New title.
    pub title: String,
    /// New text.
    pub text: String,
    /// Acting user.
    pub user_id: i64,
}

/// Body of `DELETE /ads/{id}/del`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAdRequest {
    /// Acting user.
    pub author_id: i64,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
}

/// Query of `GET /ads`. Values stay raw so bad input falls back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAdsQuery {
    /// Published-only flag, default true.
    #[serde(rename = "pub")]
    pub published: Option<String>,
    /// Author id, `-1` or absent for any.
    pub auth: Option<String>,
    /// Exact title, empty or absent for any.
    pub title: Option<String>,
}

impl ListAdsQuery {
    /// Builds the repository filter.
    #[must_use]
    pub fn to_filter(&self) -> AdFilter {
        let published_only = self
            .published
            .as_deref()
            .and_then(parse_flag)
            .unwrap_or(true);
        let author = self
            .auth
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .map_or(AuthorFilter::Any, AuthorFilter::from_raw);

        let filter = AdFilter::new()
            .published_only(published_only)
            .with_author(author);
        match &self.title {
            Some(title) => filter.with_title(title.clone()),
            None => filter,
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Ad payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdResponse {
    /// Ad id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Text.
    pub text: String,
    /// Author id.
    pub author_id: i64,
    /// Published flag.
    pub published: bool,
    /// Creation time, `YYYY-MM-DD HH:MM:SS` UTC.
    pub date_created: String,
    /// Last update time, same format.
    pub date_updated: String,
}

impl From<&Ad> for AdResponse {
    fn from(ad: &Ad) -> Self {
        Self {
            id: ad.id().get(),
            title: ad.title().to_string(),
            text: ad.text().to_string(),
            author_id: ad.author_id().get(),
            published: ad.is_published(),
            date_created: ad.created_at().to_display_format(),
            date_updated: ad.updated_at().to_display_format(),
        }
    }
}

/// User payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// User id.
    pub id: i64,
    /// Display name.
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().to_string(),
        }
    }
}

/// Empty object payload of delete operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyResponse {}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /api/v1/health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /api/v1/ads`
pub async fn create_ad(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    payload: Result<Json<CreateAdRequest>, JsonRejection>,
) -> ApiResult<AdResponse> {
    let Json(req) = payload?;
    let ad = state
        .service
        .create_ad(&ctx, &req.title, &req.text, UserId::new(req.user_id))
        .await?;
    ok(AdResponse::from(&ad))
}

/// `PUT /api/v1/ads/{id}/status`
pub async fn change_ad_status(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<String>,
    payload: Result<Json<ChangeAdStatusRequest>, JsonRejection>,
) -> ApiResult<AdResponse> {
    let id = AdId::new(parse_id(&id)?);
    let Json(req) = payload?;
    let ad = state
        .service
        .change_ad_status(&ctx, id, Caller::new(UserId::new(req.user_id)), req.published)
        .await?;
    ok(AdResponse::from(&ad))
}

/// `PUT /api/v1/ads/{id}`
pub async fn update_ad(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAdRequest>, JsonRejection>,
) -> ApiResult<AdResponse> {
    let id = AdId::new(parse_id(&id)?);
    let Json(req) = payload?;
    let ad = state
        .service
        .update_ad(
            &ctx,
            id,
            Caller::new(UserId::new(req.user_id)),
            &req.title,
            &req.text,
        )
        .await?;
    ok(AdResponse::from(&ad))
}

/// `GET /api/v1/ads?pub=&auth=&title=`
pub async fn list_ads(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    query: Result<Query<ListAdsQuery>, QueryRejection>,
) -> ApiResult<Vec<AdResponse>> {
    let Query(query) = query?;
    let ads = state.service.list_ads(&ctx, &query.to_filter()).await?;
    ok(ads.iter().map(AdResponse::from).collect())
}

/// `GET /api/v1/ads/{id}`
pub async fn get_ad(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<AdResponse> {
    let id = AdId::new(parse_id(&id)?);
    let ad = state.service.get_ad(&ctx, id).await?;
    ok(AdResponse::from(&ad))
}

/// `DELETE /api/v1/ads/{id}/del`
pub async fn delete_ad(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<String>,
    payload: Result<Json<DeleteAdRequest>, JsonRejection>,
) -> ApiResult<EmptyResponse> {
    let id = AdId::new(parse_id(&id)?);
    let Json(req) = payload?;
    state
        .service
        .delete_ad(&ctx, id, Caller::new(UserId::new(req.author_id)))
        .await?;
    ok(EmptyResponse {})
}

/// `POST /api/v1/users`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<UserResponse> {
    let Json(req) = payload?;
    let user = state.service.create_user(&ctx, &req.name).await?;
    ok(UserResponse::from(&user))
}

/// `GET /api/v1/users/{id}`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    let id = UserId::new(parse_id(&id)?);
    let user = state.service.get_user(&ctx, id).await?;
    ok(UserResponse::from(&user))
}

/// `DELETE /api/v1/users/{id}/del`
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<EmptyResponse> {
    let id = UserId::new(parse_id(&id)?);
    state.service.delete_user(&ctx, id).await?;
    ok(EmptyResponse {})
}

/// Fallback for unknown routes.
pub async fn route_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "route not found")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Timestamp;

    mod query_parsing {
        use super::*;

        fn query(published: Option<&str>, auth: Option<&str>, title: Option<&str>) -> AdFilter {
            ListAdsQuery {
                published: published.map(str::to_string),
                auth: auth.map(str::to_string),
                title: title.map(str::to_string),
            }
            .to_filter()
        }

        #[test]
        fn defaults_to_published_any_author_any_title() {
            let filter = query(None, None, None);
            assert!(filter.is_published_only());
            assert_eq!(filter.author(), AuthorFilter::Any);
            assert_eq!(filter.title(), None);
        }

        #[test]
        fn flag_spellings() {
            for raw in ["1", "t", "T", "TRUE", "true", "True"] {
                assert_eq!(parse_flag(raw), Some(true), "{raw}");
            }
            for raw in ["0", "f", "F", "FALSE", "false", "False"] {
                assert_eq!(parse_flag(raw), Some(false), "{raw}");
            }
            assert_eq!(parse_flag("yes"), None);
            assert_eq!(parse_flag(""), None);
        }

        #[test]
        fn unparsable_values_fall_back() {
            let filter = query(Some("maybe"), Some("alice"), Some(""));
            assert!(filter.is_published_only());
            assert_eq!(filter.author(), AuthorFilter::Any);
            assert_eq!(filter.title(), None);
        }

        #[test]
        fn explicit_values_apply() {
            let filter = query(Some("false"), Some("3"), Some("Bike"));
            assert!(!filter.is_published_only());
            assert_eq!(filter.author(), AuthorFilter::Only(UserId::new(3)));
            assert_eq!(filter.title(), Some("Bike"));
        }

        #[test]
        fn minus_one_means_any_author() {
            assert_eq!(query(None, Some("-1"), None).author(), AuthorFilter::Any);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn status_mapping() {
            let cases = [
                (ApplicationError::validation("bad"), StatusCode::BAD_REQUEST),
                (
                    ApplicationError::NotAuthor {
                        ad_id: AdId::new(0),
                        user_id: UserId::new(1),
                    },
                    StatusCode::FORBIDDEN,
                ),
                (ApplicationError::not_found("Ad", "1"), StatusCode::BAD_REQUEST),
                (
                    ApplicationError::AlreadyDeleted {
                        resource_type: "ad".into(),
                        id: "1".into(),
                    },
                    StatusCode::BAD_REQUEST,
                ),
                (ApplicationError::storage("down"), StatusCode::INTERNAL_SERVER_ERROR),
            ];
            for (err, status) in cases {
                assert_eq!(ApiError::from(err).status(), status);
            }
        }

        #[test]
        fn bad_id_message() {
            let err = parse_id("abc").unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert_eq!(err.message(), "id should be a number");
            assert_eq!(parse_id("-4").unwrap(), -4);
        }
    }

    mod payloads {
        use super::*;

        #[test]
        fn ad_response_formats_timestamps() {
            let at = Timestamp::from_secs(1_700_000_000).unwrap();
            let ad = Ad::new(AdId::new(1), "Bike", "Barely used", UserId::new(2), at).unwrap();
            let resp = AdResponse::from(&ad);
            assert_eq!(resp.id, 1);
            assert_eq!(resp.author_id, 2);
            assert!(!resp.published);
            assert_eq!(resp.date_created, "2023-11-14 22:13:20");
            assert_eq!(resp.date_created, resp.date_updated);
        }

        #[test]
        fn envelopes_serialize_both_keys() {
            let success = serde_json::to_value(Envelope::success(EmptyResponse {})).unwrap();
            assert_eq!(success, serde_json::json!({"data": {}, "error": null}));

            let failure = serde_json::to_value(Envelope::<()>::failure("boom")).unwrap();
            assert_eq!(failure, serde_json::json!({"data": null, "error": "boom"}));
        }
    }
}
