//! # PostgreSQL Repository
//!
//! PostgreSQL implementation of [`AdRepository`] and [`UserRepository`]
//! using sqlx.
//!
//! Ads live in the `adds` table and users in `users`. Both carry a `deleted`
//! flag; rows are never removed. Identifiers come from identity columns
//! starting at 0.
//!
//! Ownership-checked mutations run in a transaction: the row is locked with
//! `SELECT ... FOR UPDATE`, the change is applied to the loaded [`Ad`] and
//! the result is written back. Dropping the transaction on an error path
//! rolls it back.

use crate::domain::entities::{Ad, User};
use crate::domain::value_objects::{AdFilter, AdId, Caller, Timestamp, UserId};
use crate::infrastructure::config::PostgresConfig;
use crate::infrastructure::persistence::postgres::connection;
use crate::infrastructure::persistence::traits::{
    AdRepository, RepositoryError, RepositoryResult, UserRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::query(e.to_string())
}

/// PostgreSQL implementation of the ad and user repositories.
///
/// # Examples
///
/// ```ignore
/// use classified_ads::infrastructure::persistence::postgres::PostgresRepository;
///
/// let repo = PostgresRepository::connect(config.postgres()).await?;
/// let ad = repo.create_ad("Bike", "Barely used", UserId::new(0)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Wraps an existing pool. The schema must already be migrated.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Connection` if the database is unreachable
    /// and `RepositoryError::Query` if a migration fails.
    pub async fn connect(config: &PostgresConfig) -> RepositoryResult<Self> {
        let pool = connection::create_pool(config).await?;
        connection::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    async fn lock_ad(tx: &mut Transaction<'_, Postgres>, id: AdId) -> RepositoryResult<Ad> {
        let row: Option<AdRow> = sqlx::query_as(
            r#"
            SELECT id, title, text, author_id, published, deleted,
                   date_created, date_updated
            FROM adds
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.get())
        .fetch_optional(&mut **tx)
        .await
        .map_err(query_error)?;

        row.map(Ad::from)
            .ok_or_else(|| RepositoryError::not_found("Ad", id))
    }

    async fn store_ad(tx: &mut Transaction<'_, Postgres>, ad: &Ad) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            UPDATE adds
            SET title = $2, text = $3, published = $4, deleted = $5, date_updated = $6
            WHERE id = $1
            "#,
        )
        .bind(ad.id().get())
        .bind(ad.title())
        .bind(ad.text())
        .bind(ad.is_published())
        .bind(ad.is_deleted())
        .bind(*ad.updated_at().as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(query_error)?;
        Ok(())
    }

    /// Loads and locks an ad, applies `change`, and persists the result.
    async fn modify_ad<F>(&self, id: AdId, change: F) -> RepositoryResult<Ad>
    where
        F: FnOnce(&mut Ad) -> RepositoryResult<()> + Send,
    {
        let mut tx = self.pool.begin().await.map_err(query_error)?;
        let mut ad = Self::lock_ad(&mut tx, id).await?;
        change(&mut ad)?;
        Self::store_ad(&mut tx, &ad).await?;
        tx.commit().await.map_err(query_error)?;
        Ok(ad)
    }
}

#[async_trait]
impl AdRepository for PostgresRepository {
    async fn create_ad(&self, title: &str, text: &str, author: UserId) -> RepositoryResult<Ad> {
        Ad::validate_content(title, text)?;
        let now = Timestamp::now();

        let row: AdRow = sqlx::query_as(
            r#"
            INSERT INTO adds (title, text, author_id, published, deleted, date_created, date_updated)
            VALUES ($1, $2, $3, FALSE, FALSE, $4, $4)
            RETURNING id, title, text, author_id, published, deleted, date_created, date_updated
            "#,
        )
        .bind(title)
        .bind(text)
        .bind(author.get())
        .bind(*now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;

        let ad = Ad::from(row);
        tracing::debug!(ad_id = %ad.id(), author = %author, "ad created");
        Ok(ad)
    }

    async fn update_ad_published_status(
        &self,
        id: AdId,
        caller: Caller,
        published: bool,
    ) -> RepositoryResult<Ad> {
        self.modify_ad(id, |ad| {
            ad.set_published(caller, published, Timestamp::now())
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn update_ad_text(
        &self,
        id: AdId,
        caller: Caller,
        title: &str,
        text: &str,
    ) -> RepositoryResult<Ad> {
        self.modify_ad(id, |ad| {
            ad.update_content(caller, title, text, Timestamp::now())
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn list_ads(&self, filter: &AdFilter) -> RepositoryResult<Vec<Ad>> {
        let rows: Vec<AdRow> = sqlx::query_as(
            r#"
            SELECT id, title, text, author_id, published, deleted,
                   date_created, date_updated
            FROM adds
            WHERE deleted = FALSE
              AND ($1 = FALSE OR published = TRUE)
              AND ($2::BIGINT IS NULL OR author_id = $2)
              AND ($3::TEXT IS NULL OR title = $3)
            ORDER BY id ASC
            "#,
        )
        .bind(filter.is_published_only())
        .bind(filter.author().author().map(UserId::get))
        .bind(filter.title())
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(rows.into_iter().map(Ad::from).collect())
    }

    async fn get_ad(&self, id: AdId) -> RepositoryResult<Ad> {
        let row: Option<AdRow> = sqlx::query_as(
            r#"
            SELECT id, title, text, author_id, published, deleted,
                   date_created, date_updated
            FROM adds
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        let ad = row
            .map(Ad::from)
            .ok_or_else(|| RepositoryError::not_found("Ad", id))?;
        ad.ensure_active()?;
        Ok(ad)
    }

    async fn delete_ad(&self, id: AdId, caller: Caller) -> RepositoryResult<()> {
        self.modify_ad(id, |ad| ad.mark_deleted(caller).map_err(RepositoryError::from))
            .await?;
        tracing::debug!(ad_id = %id, %caller, "ad deleted");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresRepository {
    async fn create_user(&self, name: &str) -> RepositoryResult<User> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (name, deleted)
            VALUES ($1, FALSE)
            RETURNING id, name, deleted
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;

        let user = User::from(row);
        tracing::debug!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> RepositoryResult<User> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, deleted
            FROM users
            WHERE id = $1 AND deleted = FALSE
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        row.map(User::from)
            .ok_or_else(|| RepositoryError::not_found("User", id))
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE users SET deleted = TRUE WHERE id = $1 AND deleted = FALSE")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("User", id));
        }
        tracing::debug!(user_id = %id, "user deleted");
        Ok(())
    }
}

/// Row type for ad queries.
#[derive(Debug, sqlx::FromRow)]
struct AdRow {
    id: i64,
    title: String,
    text: String,
    author_id: i64,
    published: bool,
    deleted: bool,
    date_created: DateTime<Utc>,
    date_updated: DateTime<Utc>,
}

impl From<AdRow> for Ad {
    fn from(row: AdRow) -> Self {
        Ad::from_parts(
            AdId::new(row.id),
            row.title,
            row.text,
            UserId::new(row.author_id),
            row.published,
            row.deleted,
            Timestamp::from(row.date_created),
            Timestamp::from(row.date_updated),
        )
    }
}

/// Row type for user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    deleted: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::from_parts(UserId::new(row.id), row.name, row.deleted)
    }
}
