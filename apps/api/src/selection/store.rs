//! Selection store: persisted set of review ids approved for public display.
//!
//! `AppState` holds an `Arc<dyn SelectionStore>`. Production uses `PgSelectionStore`;
//! handler tests use the in-memory store at the bottom of this file.
//!
//! Every mutation is a single statement keyed by `review_id`, so duplicate
//! concurrent submissions cannot create two rows.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::selection::SelectionRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    Created(SelectionRecord),
    AlreadySelected,
}

#[async_trait]
pub trait SelectionStore: Send + Sync {
    /// Inserts a record unless one already exists for `review_id`.
    async fn select(&self, review_id: i64, listing_name: &str)
        -> Result<SelectOutcome, AppError>;

    /// Deletes the record for `review_id`, returning it if it existed.
    async fn unselect(&self, review_id: i64) -> Result<Option<SelectionRecord>, AppError>;

    async fn selected_ids(&self) -> Result<HashSet<i64>, AppError>;

    /// All records, oldest first.
    async fn list(&self) -> Result<Vec<SelectionRecord>, AppError>;
}

#[derive(Clone)]
pub struct PgSelectionStore {
    pool: PgPool,
}

impl PgSelectionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SelectionStore for PgSelectionStore {
    async fn select(
        &self,
        review_id: i64,
        listing_name: &str,
    ) -> Result<SelectOutcome, AppError> {
        let inserted: Option<SelectionRecord> = sqlx::query_as(
            r#"
            INSERT INTO selected_reviews (review_id, listing_name)
            VALUES ($1, $2)
            ON CONFLICT (review_id) DO NOTHING
            RETURNING review_id, listing_name, created_at, updated_at
            "#,
        )
        .bind(review_id)
        .bind(listing_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match inserted {
            Some(record) => {
                info!("Review {review_id} marked as selected");
                SelectOutcome::Created(record)
            }
            None => SelectOutcome::AlreadySelected,
        })
    }

    async fn unselect(&self, review_id: i64) -> Result<Option<SelectionRecord>, AppError> {
        let deleted: Option<SelectionRecord> = sqlx::query_as(
            r#"
            DELETE FROM selected_reviews
            WHERE review_id = $1
            RETURNING review_id, listing_name, created_at, updated_at
            "#,
        )
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await?;

        if deleted.is_some() {
            info!("Review {review_id} unmarked as selected");
        }
        Ok(deleted)
    }

    async fn selected_ids(&self) -> Result<HashSet<i64>, AppError> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT review_id FROM selected_reviews")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids.into_iter().collect())
    }

    async fn list(&self) -> Result<Vec<SelectionRecord>, AppError> {
        Ok(sqlx::query_as::<_, SelectionRecord>(
            r#"
            SELECT review_id, listing_name, created_at, updated_at
            FROM selected_reviews
            ORDER BY created_at ASC, review_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }
}

#[cfg(test)]
pub use memory::InMemorySelectionStore;
