//! PostgreSQL-backed `FeedbackRepository` implementation using Diesel ORM.
//!
//! Edits run inside a transaction that locks the row first so a concurrent
//! acknowledge cannot interleave with a partial update.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{FeedbackRepository, FeedbackRepositoryError};
use crate::domain::{
    Feedback, FeedbackDraft, FeedbackId, FeedbackUpdate, NewFeedback, Sentiment, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{FeedbackChangeset, FeedbackRow, NewFeedbackRow};
use super::pool::{DbPool, PoolError};
use super::schema::feedbacks;

/// Diesel-backed feedback store.
#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FeedbackRepositoryError {
    map_basic_pool_error(error, FeedbackRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> FeedbackRepositoryError {
    map_basic_diesel_error(
        error,
        FeedbackRepositoryError::query,
        FeedbackRepositoryError::connection,
    )
}

fn row_to_feedback(row: FeedbackRow) -> Result<Feedback, FeedbackRepositoryError> {
    let sentiment = row
        .sentiment
        .parse::<Sentiment>()
        .map_err(|err| FeedbackRepositoryError::query(format!("invalid stored sentiment: {err}")))?;
    Feedback::new(FeedbackDraft {
        id: FeedbackId::new(row.id),
        manager_id: UserId::new(row.manager_id),
        employee_id: UserId::new(row.employee_id),
        strengths: row.strengths,
        improvements: row.improvements,
        sentiment,
        acknowledged: row.acknowledged,
        created_at: row.created_at,
    })
    .map_err(|err| FeedbackRepositoryError::query(format!("invalid stored feedback: {err}")))
}

fn rows_to_feedbacks(rows: Vec<FeedbackRow>) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
    rows.into_iter().map(row_to_feedback).collect()
}

fn changeset(update: &FeedbackUpdate) -> FeedbackChangeset<'_> {
    FeedbackChangeset {
        strengths: update.strengths(),
        improvements: update.improvements(),
        sentiment: update.sentiment().map(Sentiment::as_str),
    }
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn insert(&self, feedback: NewFeedback) -> Result<Feedback, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewFeedbackRow {
            manager_id: feedback.manager_id.get(),
            employee_id: feedback.employee_id.get(),
            strengths: feedback.content.strengths(),
            improvements: feedback.content.improvements(),
            sentiment: feedback.content.sentiment().as_str(),
            created_at: feedback.created_at,
        };

        let row: FeedbackRow = diesel::insert_into(feedbacks::table)
            .values(&new_row)
            .returning(FeedbackRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_feedback(row)
    }

    async fn find_by_id(
        &self,
        id: FeedbackId,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<FeedbackRow> = feedbacks::table
            .filter(feedbacks::id.eq(id.get()))
            .select(FeedbackRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_feedback).transpose()
    }

    async fn list_for_employee(
        &self,
        employee: UserId,
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<FeedbackRow> = feedbacks::table
            .filter(feedbacks::employee_id.eq(employee.get()))
            .order((feedbacks::created_at.desc(), feedbacks::id.desc()))
            .select(FeedbackRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_feedbacks(rows)
    }

    async fn list_for_manager(
        &self,
        manager: UserId,
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<FeedbackRow> = feedbacks::table
            .filter(feedbacks::manager_id.eq(manager.get()))
            .order((feedbacks::created_at.desc(), feedbacks::id.desc()))
            .select(FeedbackRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_feedbacks(rows)
    }

    async fn update(
        &self,
        id: FeedbackId,
        update: &FeedbackUpdate,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = changeset(update);
        let is_empty = update.is_empty();

        let row: Option<FeedbackRow> = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let current: Option<FeedbackRow> = feedbacks::table
                        .filter(feedbacks::id.eq(id.get()))
                        .select(FeedbackRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;

                    if current.is_none() || is_empty {
                        return Ok(current);
                    }

                    diesel::update(feedbacks::table.filter(feedbacks::id.eq(id.get())))
                        .set(&changes)
                        .returning(FeedbackRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row.map(row_to_feedback).transpose()
    }

    async fn mark_acknowledged(
        &self,
        id: FeedbackId,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<FeedbackRow> =
            diesel::update(feedbacks::table.filter(feedbacks::id.eq(id.get())))
                .set(feedbacks::acknowledged.eq(true))
                .returning(FeedbackRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;

        row.map(row_to_feedback).transpose()
    }
}
