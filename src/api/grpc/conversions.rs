//! # Protobuf Conversions
//!
//! Mapping between domain values and generated messages, and from
//! [`ApplicationError`] to [`tonic::Status`].

use crate::api::grpc::proto::{AdResponse, ListAdsRequest, UserResponse};
use crate::application::ApplicationError;
use crate::domain::entities::{Ad, User};
use crate::domain::value_objects::{AdFilter, AuthorFilter};
use tonic::{Code, Status};

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

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().to_string(),
        }
    }
}

impl From<&ListAdsRequest> for AdFilter {
    fn from(req: &ListAdsRequest) -> Self {
        let author = req
            .author_id
            .map_or(AuthorFilter::Any, AuthorFilter::from_raw);
        AdFilter::new()
            .published_only(req.published_only.unwrap_or(true))
            .with_author(author)
            .with_title(req.title.clone())
    }
}

/// Returns the gRPC code for an application error.
#[must_use]
pub fn status_code(err: &ApplicationError) -> Code {
    match err {
        ApplicationError::Validation(_) => Code::InvalidArgument,
        ApplicationError::NotAuthor { .. } => Code::PermissionDenied,
        ApplicationError::NotFound { .. } => Code::NotFound,
        ApplicationError::AlreadyDeleted { .. } => Code::FailedPrecondition,
        ApplicationError::Storage(_) => Code::Internal,
    }
}

impl From<ApplicationError> for Status {
    fn from(err: ApplicationError) -> Self {
        Status::new(status_code(&err), err.to_string())
    }
}
