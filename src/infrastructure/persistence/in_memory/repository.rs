//! # In-Memory Repository
//!
//! In-memory implementation of [`AdRepository`] and [`UserRepository`].
//!
//! Records live in two vectors. An identifier is the record's position in
//! its vector, so ids are assigned in creation order starting at 0 and
//! lookups are O(1). Nothing is ever removed: deletion only sets the
//! record's `deleted` flag.
//!
//! Every operation holds the store guard for its whole duration (write guard
//! for mutations, read guard for queries). The guard is released on every
//! exit path when it goes out of scope.

use crate::domain::entities::{Ad, User};
use crate::domain::value_objects::{AdFilter, AdId, Caller, Timestamp, UserId};
use crate::infrastructure::persistence::traits::{
    AdRepository, RepositoryError, RepositoryResult, UserRepository,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Store {
    ads: Vec<Ad>,
    users: Vec<User>,
}

impl Store {
    fn next_id(len: usize) -> RepositoryResult<i64> {
        i64::try_from(len).map_err(|_| RepositoryError::internal("identifier space exhausted"))
    }

    fn ad(&self, id: AdId) -> RepositoryResult<&Ad> {
        id.as_index()
            .and_then(|i| self.ads.get(i))
            .ok_or_else(|| RepositoryError::not_found("Ad", id))
    }

    fn ad_mut(&mut self, id: AdId) -> RepositoryResult<&mut Ad> {
        id.as_index()
            .and_then(|i| self.ads.get_mut(i))
            .ok_or_else(|| RepositoryError::not_found("Ad", id))
    }

    fn user_mut(&mut self, id: UserId) -> RepositoryResult<&mut User> {
        id.as_index()
            .and_then(|i| self.users.get_mut(i))
            .ok_or_else(|| RepositoryError::not_found("User", id))
    }
}

/// In-memory implementation of the ad and user repositories.
///
/// Cloning shares the underlying store. Suitable for tests and for running
/// the service without a database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored ads, deleted ones included.
    pub async fn len(&self) -> usize {
        self.store.read().await.ads.len()
    }

    /// Returns true if no ad has been created.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes every ad and user and restarts identifiers at 0.
    pub async fn clear(&self) {
        let mut store = self.store.write().await;
        store.ads.clear();
        store.users.clear();
    }
}

#[async_trait]
impl AdRepository for InMemoryRepository {
    async fn create_ad(&self, title: &str, text: &str, author: UserId) -> RepositoryResult<Ad> {
        let mut store = self.store.write().await;
        let id = AdId::new(Store::next_id(store.ads.len())?);
        let ad = Ad::new(id, title, text, author, Timestamp::now())?;
        store.ads.push(ad.clone());
        tracing::debug!(ad_id = %id, author = %author, "ad created");
        Ok(ad)
    }

    async fn update_ad_published_status(
        &self,
        id: AdId,
        caller: Caller,
        published: bool,
    ) -> RepositoryResult<Ad> {
        let mut store = self.store.write().await;
        let ad = store.ad_mut(id)?;
        ad.set_published(caller, published, Timestamp::now())?;
        Ok(ad.clone())
    }

    async fn update_ad_text(
        &self,
        id: AdId,
        caller: Caller,
        title: &str,
        text: &str,
    ) -> RepositoryResult<Ad> {
        let mut store = self.store.write().await;
        let ad = store.ad_mut(id)?;
        ad.update_content(caller, title, text, Timestamp::now())?;
        Ok(ad.clone())
    }

    async fn list_ads(&self, filter: &AdFilter) -> RepositoryResult<Vec<Ad>> {
        let store = self.store.read().await;
        Ok(store
            .ads
            .iter()
            .filter(|ad| filter.matches(ad))
            .cloned()
            .collect())
    }

    async fn get_ad(&self, id: AdId) -> RepositoryResult<Ad> {
        let store = self.store.read().await;
        let ad = store.ad(id)?;
        ad.ensure_active()?;
        Ok(ad.clone())
    }

    async fn delete_ad(&self, id: AdId, caller: Caller) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        store.ad_mut(id)?.mark_deleted(caller)?;
        tracing::debug!(ad_id = %id, %caller, "ad deleted");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create_user(&self, name: &str) -> RepositoryResult<User> {
        let mut store = self.store.write().await;
        let id = UserId::new(Store::next_id(store.users.len())?);
        let user = User::new(id, name);
        store.users.push(user.clone());
        tracing::debug!(user_id = %id, "user created");
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> RepositoryResult<User> {
        let store = self.store.read().await;
        id.as_index()
            .and_then(|i| store.users.get(i))
            .filter(|user| !user.is_deleted())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("User", id))
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        if store.user_mut(id)?.mark_deleted() {
            tracing::debug!(user_id = %id, "user deleted");
            Ok(())
        } else {
            Err(RepositoryError::not_found("User", id))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::value_objects::AuthorFilter;

    fn caller(id: i64) -> Caller {
        Caller::new(UserId::new(id))
    }

    fn domain_error(err: RepositoryError) -> DomainError {
        match err {
            RepositoryError::Domain(e) => e,
            other => panic!("expected domain error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn new_repository_is_empty() {
        let repo = InMemoryRepository::new();
        assert!(repo.is_empty().await);
        assert!(repo.list_ads(&AdFilter::new()).await.unwrap().is_empty());
    }

    mod ads {
        use super::*;

        #[tokio::test]
        async fn create_assigns_sequential_ids() {
            let repo = InMemoryRepository::new();
            let first = repo.create_ad("One", "Text", UserId::new(0)).await.unwrap();
            let second = repo.create_ad("Two", "Text", UserId::new(0)).await.unwrap();

            assert_eq!(first.id(), AdId::new(0));
            assert_eq!(second.id(), AdId::new(1));
            assert!(!first.is_published());
            assert_eq!(first.created_at(), first.updated_at());
            assert_eq!(repo.len().await, 2);
        }

        #[tokio::test]
        async fn invalid_create_stores_nothing() {
            let repo = InMemoryRepository::new();
            let err = repo.create_ad("", "Text", UserId::new(0)).await.unwrap_err();
            assert!(domain_error(err).is_validation());
            assert!(repo.is_empty().await);

            let ad = repo.create_ad("Ok", "Text", UserId::new(0)).await.unwrap();
            assert_eq!(ad.id(), AdId::new(0));
        }

        #[tokio::test]
        async fn get_round_trips_created_ad() {
            let repo = InMemoryRepository::new();
            let created = repo.create_ad("Title", "Text", UserId::new(3)).await.unwrap();
            let fetched = repo.get_ad(created.id()).await.unwrap();
            assert_eq!(fetched, created);
        }

        #[tokio::test]
        async fn get_unknown_is_not_found() {
            let repo = InMemoryRepository::new();
            assert!(repo.get_ad(AdId::new(0)).await.unwrap_err().is_not_found());
            assert!(repo.get_ad(AdId::new(-1)).await.unwrap_err().is_not_found());
        }

        #[tokio::test]
        async fn publish_requires_author() {
            let repo = InMemoryRepository::new();
            let ad = repo.create_ad("Title", "Text", UserId::new(0)).await.unwrap();

            let published = repo
                .update_ad_published_status(ad.id(), caller(0), true)
                .await
                .unwrap();
            assert!(published.is_published());
            assert!(!published.created_at().is_after(&published.updated_at()));

            let err = repo
                .update_ad_published_status(ad.id(), caller(1), false)
                .await
                .unwrap_err();
            assert!(domain_error(err).is_not_author());
            assert!(repo.get_ad(ad.id()).await.unwrap().is_published());
        }

        #[tokio::test]
        async fn publish_unknown_is_not_found() {
            let repo = InMemoryRepository::new();
            let err = repo
                .update_ad_published_status(AdId::new(7), caller(0), true)
                .await
                .unwrap_err();
            assert!(err.is_not_found());
        }

        #[tokio::test]
        async fn update_text() {
            let repo = InMemoryRepository::new();
            let ad = repo.create_ad("Title", "Text", UserId::new(0)).await.unwrap();

            let updated = repo
                .update_ad_text(ad.id(), caller(0), "New title", "New text")
                .await
                .unwrap();
            assert_eq!(updated.title(), "New title");
            assert_eq!(updated.text(), "New text");
            assert_eq!(updated.created_at(), ad.created_at());
        }

        #[tokio::test]
        async fn update_text_checks_author_before_content() {
            let repo = InMemoryRepository::new();
            let ad = repo.create_ad("Title", "Text", UserId::new(0)).await.unwrap();

            let err = repo
                .update_ad_text(ad.id(), caller(1), "", "")
                .await
                .unwrap_err();
            assert!(domain_error(err).is_not_author());

            let err = repo
                .update_ad_text(ad.id(), caller(0), "", "Text")
                .await
                .unwrap_err();
            assert!(domain_error(err).is_validation());
            assert_eq!(repo.get_ad(ad.id()).await.unwrap().title(), "Title");
        }

        #[tokio::test]
        async fn delete_is_soft_and_detects_repeats() {
            let repo = InMemoryRepository::new();
            let ad = repo.create_ad("Title", "Text", UserId::new(0)).await.unwrap();

            let err = repo.delete_ad(ad.id(), caller(1)).await.unwrap_err();
            assert!(domain_error(err).is_not_author());

            repo.delete_ad(ad.id(), caller(0)).await.unwrap();
            assert_eq!(repo.len().await, 1);

            let err = repo.delete_ad(ad.id(), caller(0)).await.unwrap_err();
            assert!(domain_error(err).is_already_deleted());

            let err = repo.get_ad(ad.id()).await.unwrap_err();
            assert!(domain_error(err).is_already_deleted());
        }

        #[tokio::test]
        async fn delete_unknown_is_not_found() {
            let repo = InMemoryRepository::new();
            assert!(repo.delete_ad(AdId::new(0), caller(0)).await.unwrap_err().is_not_found());
        }

        #[tokio::test]
        async fn deleted_ads_reject_updates() {
            let repo = InMemoryRepository::new();
            let ad = repo.create_ad("Title", "Text", UserId::new(0)).await.unwrap();
            repo.delete_ad(ad.id(), caller(0)).await.unwrap();

            let err = repo
                .update_ad_published_status(ad.id(), caller(0), true)
                .await
                .unwrap_err();
            assert!(domain_error(err).is_already_deleted());
        }
    }

    mod listing {
        use super::*;

        async fn seeded() -> InMemoryRepository {
            let repo = InMemoryRepository::new();
            repo.create_ad("Bike", "Red", UserId::new(0)).await.unwrap();
            repo.create_ad("Car", "Blue", UserId::new(1)).await.unwrap();
            repo.create_ad("Bike", "Green", UserId::new(1)).await.unwrap();
            repo.create_ad("Boat", "White", UserId::new(0)).await.unwrap();
            repo.update_ad_published_status(AdId::new(1), caller(1), true)
                .await
                .unwrap();
            repo.update_ad_published_status(AdId::new(2), caller(1), true)
                .await
                .unwrap();
            repo.delete_ad(AdId::new(3), caller(0)).await.unwrap();
            repo
        }

        fn ids(ads: &[Ad]) -> Vec<i64> {
            ads.iter().map(|ad| ad.id().get()).collect()
        }

        #[tokio::test]
        async fn default_filter_lists_active_in_creation_order() {
            let repo = seeded().await;
            let ads = repo.list_ads(&AdFilter::new()).await.unwrap();
            assert_eq!(ids(&ads), vec![0, 1, 2]);
        }

        #[tokio::test]
        async fn published_only() {
            let repo = seeded().await;
            let ads = repo
                .list_ads(&AdFilter::new().published_only(true))
                .await
                .unwrap();
            assert_eq!(ids(&ads), vec![1, 2]);
            assert!(ads.iter().all(Ad::is_published));
        }

        #[tokio::test]
        async fn by_author() {
            let repo = seeded().await;
            let filter = AdFilter::new().with_author(AuthorFilter::Only(UserId::new(0)));
            let ads = repo.list_ads(&filter).await.unwrap();
            assert_eq!(ids(&ads), vec![0]);

            let any = AdFilter::new().with_author(AuthorFilter::Any);
            assert_eq!(repo.list_ads(&any).await.unwrap().len(), 3);
        }

        #[tokio::test]
        async fn combined_predicates() {
            let repo = seeded().await;
            let filter = AdFilter::new()
                .published_only(true)
                .with_author(AuthorFilter::Only(UserId::new(1)))
                .with_title("Bike");
            let ads = repo.list_ads(&filter).await.unwrap();
            assert_eq!(ids(&ads), vec![2]);
        }
    }

    mod users {
        use super::*;

        #[tokio::test]
        async fn create_and_get() {
            let repo = InMemoryRepository::new();
            let alice = repo.create_user("alice").await.unwrap();
            let bob = repo.create_user("bob").await.unwrap();

            assert_eq!(alice.id(), UserId::new(0));
            assert_eq!(bob.id(), UserId::new(1));
            assert_eq!(repo.get_user(bob.id()).await.unwrap().name(), "bob");
        }

        #[tokio::test]
        async fn get_unknown_is_not_found() {
            let repo = InMemoryRepository::new();
            assert!(repo.get_user(UserId::new(0)).await.unwrap_err().is_not_found());
        }

        #[tokio::test]
        async fn delete_hides_user_and_detects_repeats() {
            let repo = InMemoryRepository::new();
            let alice = repo.create_user("alice").await.unwrap();

            repo.delete_user(alice.id()).await.unwrap();
            assert!(repo.get_user(alice.id()).await.unwrap_err().is_not_found());
            assert!(repo.delete_user(alice.id()).await.unwrap_err().is_not_found());
            assert!(repo.delete_user(UserId::new(5)).await.unwrap_err().is_not_found());
        }

        #[tokio::test]
        async fn deleting_a_user_keeps_their_ads() {
            let repo = InMemoryRepository::new();
            let alice = repo.create_user("alice").await.unwrap();
            let ad = repo.create_ad("Title", "Text", alice.id()).await.unwrap();

            repo.delete_user(alice.id()).await.unwrap();
            assert_eq!(repo.get_ad(ad.id()).await.unwrap().author_id(), alice.id());
        }
    }

    #[tokio::test]
    async fn clear_restarts_ids() {
        let repo = InMemoryRepository::new();
        repo.create_ad("Title", "Text", UserId::new(0)).await.unwrap();
        repo.create_user("alice").await.unwrap();

        repo.clear().await;
        assert!(repo.is_empty().await);
        assert_eq!(repo.create_user("bob").await.unwrap().id(), UserId::new(0));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let repo = InMemoryRepository::new();
        let clone = repo.clone();
        repo.create_ad("Title", "Text", UserId::new(0)).await.unwrap();
        assert_eq!(clone.len().await, 1);
    }

    #[tokio::test]
    async fn len_waits_for_pending_writer() {
        let repo = InMemoryRepository::new();
        repo.create_ad("Title", "Text", UserId::new(0)).await.unwrap();

        let guard = repo.store.write().await;
        let reader = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.len().await })
        };
        tokio::task::yield_now().await;
        assert!(!reader.is_finished());
        drop(guard);
        assert_eq!(reader.await.unwrap(), 1);
    }
}
