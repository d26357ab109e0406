//! # Ads Service
//!
//! Pass-through from transport handlers to the [`Repository`].
//!
//! Each method opens a span labelled with the request id, forwards its
//! arguments unchanged and converts the repository error into an
//! [`ApplicationError`]. Rejections are logged at `debug`, storage failures
//! at `error`.

use crate::application::context::RequestContext;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{Ad, User};
use crate::domain::value_objects::{AdFilter, AdId, Caller, UserId};
use crate::infrastructure::persistence::traits::{
    AdRepository, Repository, RepositoryError, UserRepository,
};
use std::sync::Arc;
use tracing::instrument;

fn reject(err: RepositoryError) -> ApplicationError {
    let err = ApplicationError::from(err);
    if err.is_storage() {
        tracing::error!(error = %err, "storage failure");
    } else {
        tracing::debug!(error = %err, "operation rejected");
    }
    err
}

/// Ads and users use cases.
///
/// Cheap to clone; clones share the repository.
///
/// # Examples
///
/// ```
/// use classified_ads::application::{AdsService, RequestContext};
/// use classified_ads::domain::value_objects::UserId;
/// use classified_ads::infrastructure::persistence::InMemoryRepository;
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let service = AdsService::new(Arc::new(InMemoryRepository::new()));
/// let ctx = RequestContext::new();
/// let ad = service.create_ad(&ctx, "Bike", "Barely used", UserId::new(0)).await.unwrap();
/// assert!(!ad.is_published());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AdsService {
    repo: Arc<dyn Repository>,
}

impl AdsService {
    /// Creates a service over `repo`.
    #[must_use]
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Creates an unpublished ad.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` for bad title or text.
    #[instrument(skip(self, ctx, text), fields(request_id = %ctx.request_id()))]
    pub async fn create_ad(
        &self,
        ctx: &RequestContext,
        title: &str,
        text: &str,
        author: UserId,
    ) -> ApplicationResult<Ad> {
        self.repo.create_ad(title, text, author).await.map_err(reject)
    }

    /// Publishes or unpublishes an ad.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `NotAuthor` or `AlreadyDeleted`.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn change_ad_status(
        &self,
        ctx: &RequestContext,
        id: AdId,
        caller: Caller,
        published: bool,
    ) -> ApplicationResult<Ad> {
        self.repo
            .update_ad_published_status(id, caller, published)
            .await
            .map_err(reject)
    }

    /// Replaces an ad's title and text.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `NotAuthor`, `AlreadyDeleted` or `Validation`.
    #[instrument(skip(self, ctx, text), fields(request_id = %ctx.request_id()))]
    pub async fn update_ad(
        &self,
        ctx: &RequestContext,
        id: AdId,
        caller: Caller,
        title: &str,
        text: &str,
    ) -> ApplicationResult<Ad> {
        self.repo
            .update_ad_text(id, caller, title, text)
            .await
            .map_err(reject)
    }

    /// Lists non-deleted ads matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the backend fails.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn list_ads(
        &self,
        ctx: &RequestContext,
        filter: &AdFilter,
    ) -> ApplicationResult<Vec<Ad>> {
        self.repo.list_ads(filter).await.map_err(reject)
    }

    /// Gets an active ad.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `AlreadyDeleted`.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn get_ad(&self, ctx: &RequestContext, id: AdId) -> ApplicationResult<Ad> {
        self.repo.get_ad(id).await.map_err(reject)
    }

    /// Soft-deletes an ad.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `NotAuthor` or `AlreadyDeleted`.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn delete_ad(
        &self,
        ctx: &RequestContext,
        id: AdId,
        caller: Caller,
    ) -> ApplicationResult<()> {
        self.repo.delete_ad(id, caller).await.map_err(reject)
    }

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the backend fails.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn create_user(&self, ctx: &RequestContext, name: &str) -> ApplicationResult<User> {
        self.repo.create_user(name).await.map_err(reject)
    }

    /// Gets an active user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user is unknown or deleted.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn get_user(&self, ctx: &RequestContext, id: UserId) -> ApplicationResult<User> {
        self.repo.get_user(id).await.map_err(reject)
    }

    /// Soft-deletes a user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user is unknown or already deleted.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn delete_user(&self, ctx: &RequestContext, id: UserId) -> ApplicationResult<()> {
        self.repo.delete_user(id).await.map_err(reject)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::AuthorFilter;
    use crate::infrastructure::persistence::InMemoryRepository;

    fn service() -> AdsService {
        AdsService::new(Arc::new(InMemoryRepository::new()))
    }

    fn caller(id: i64) -> Caller {
        Caller::new(UserId::new(id))
    }

    #[tokio::test]
    async fn ad_lifecycle_scenario() {
        let service = service();
        let ctx = RequestContext::new();

        let alice = service.create_user(&ctx, "alice").await.unwrap();
        assert_eq!(alice.id(), UserId::new(0));

        let ad = service
            .create_ad(&ctx, "Title", "Text", alice.id())
            .await
            .unwrap();
        assert_eq!(ad.id(), AdId::new(0));
        assert!(!ad.is_published());

        let ad = service
            .change_ad_status(&ctx, ad.id(), caller(0), true)
            .await
            .unwrap();
        assert!(ad.is_published());

        let err = service
            .change_ad_status(&ctx, ad.id(), caller(1), true)
            .await
            .unwrap_err();
        assert!(err.is_not_author());

        service.delete_ad(&ctx, ad.id(), caller(0)).await.unwrap();
        let err = service.get_ad(&ctx, ad.id()).await.unwrap_err();
        assert!(err.is_already_deleted());
    }

    #[tokio::test]
    async fn validation_surfaces_as_validation() {
        let err = service()
            .create_ad(&RequestContext::new(), "", "Text", UserId::new(0))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn update_checks_owner_before_content() {
        let service = service();
        let ctx = RequestContext::new();
        let ad = service
            .create_ad(&ctx, "Title", "Text", UserId::new(0))
            .await
            .unwrap();

        let err = service
            .update_ad(&ctx, ad.id(), caller(1), "", "")
            .await
            .unwrap_err();
        assert!(err.is_not_author());

        let updated = service
            .update_ad(&ctx, ad.id(), caller(0), "New", "Body")
            .await
            .unwrap();
        assert_eq!(updated.title(), "New");
        assert_eq!(updated.text(), "Body");
    }

    #[tokio::test]
    async fn listing_forwards_the_filter() {
        let service = service();
        let ctx = RequestContext::new();
        let first = service
            .create_ad(&ctx, "A", "Text", UserId::new(0))
            .await
            .unwrap();
        service
            .create_ad(&ctx, "B", "Text", UserId::new(1))
            .await
            .unwrap();
        service
            .change_ad_status(&ctx, first.id(), caller(0), true)
            .await
            .unwrap();

        let published = service
            .list_ads(&ctx, &AdFilter::new().published_only(true))
            .await
            .unwrap();
        assert_eq!(published.len(), 1);

        let by_author = service
            .list_ads(
                &ctx,
                &AdFilter::new().with_author(AuthorFilter::Only(UserId::new(1))),
            )
            .await
            .unwrap();
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].author_id(), UserId::new(1));
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let service = service();
        let ctx = RequestContext::new();
        assert!(service.get_ad(&ctx, AdId::new(3)).await.unwrap_err().is_not_found());
        assert!(
            service
                .get_user(&ctx, UserId::new(3))
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(
            service
                .delete_user(&ctx, UserId::new(3))
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn deleted_user_is_gone() {
        let service = service();
        let ctx = RequestContext::new();
        let user = service.create_user(&ctx, "bob").await.unwrap();
        service.delete_user(&ctx, user.id()).await.unwrap();
        assert!(service.get_user(&ctx, user.id()).await.unwrap_err().is_not_found());
        assert!(
            service
                .delete_user(&ctx, user.id())
                .await
                .unwrap_err()
                .is_not_found()
        );
    }
}
