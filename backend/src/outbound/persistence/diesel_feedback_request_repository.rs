//! PostgreSQL-backed `FeedbackRequestRepository` implementation using Diesel
//! ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FeedbackRequestRepository, FeedbackRequestRepositoryError};
use crate::domain::{
    FeedbackRequest, FeedbackRequestId, NewFeedbackRequest, RequestMessage, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{FeedbackRequestRow, NewFeedbackRequestRow};
use super::pool::{DbPool, PoolError};
use super::schema::feedback_requests;

/// Diesel-backed feedback request store.
#[derive(Clone)]
pub struct DieselFeedbackRequestRepository {
    pool: DbPool,
}

impl DieselFeedbackRequestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FeedbackRequestRepositoryError {
    map_basic_pool_error(error, FeedbackRequestRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> FeedbackRequestRepositoryError {
    map_basic_diesel_error(
        error,
        FeedbackRequestRepositoryError::query,
        FeedbackRequestRepositoryError::connection,
    )
}

fn row_to_request(row: FeedbackRequestRow) -> Result<FeedbackRequest, FeedbackRequestRepositoryError> {
    let message = RequestMessage::new(row.message).map_err(|err| {
        FeedbackRequestRepositoryError::query(format!("invalid stored message: {err}"))
    })?;
    Ok(FeedbackRequest::restore(
        FeedbackRequestId::new(row.id),
        NewFeedbackRequest {
            employee_id: UserId::new(row.employee_id),
            manager_id: UserId::new(row.manager_id),
            message,
            created_at: row.created_at,
        },
        row.responded,
    ))
}

#[async_trait]
impl FeedbackRequestRepository for DieselFeedbackRequestRepository {
    async fn insert(
        &self,
        request: NewFeedbackRequest,
    ) -> Result<FeedbackRequest, FeedbackRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewFeedbackRequestRow {
            employee_id: request.employee_id.get(),
            manager_id: request.manager_id.get(),
            message: request.message.as_ref(),
            created_at: request.created_at,
        };

        let row: FeedbackRequestRow = diesel::insert_into(feedback_requests::table)
            .values(&new_row)
            .returning(FeedbackRequestRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_request(row)
    }

    async fn list_for_manager(
        &self,
        manager: UserId,
    ) -> Result<Vec<FeedbackRequest>, FeedbackRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<FeedbackRequestRow> = feedback_requests::table
            .filter(feedback_requests::manager_id.eq(manager.get()))
            .order((
                feedback_requests::created_at.asc(),
                feedback_requests::id.asc(),
            ))
            .select(FeedbackRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_request).collect()
    }

    async fn delete_for_pair(
        &self,
        manager: UserId,
        employee: UserId,
    ) -> Result<usize, FeedbackRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            feedback_requests::table
                .filter(feedback_requests::manager_id.eq(manager.get()))
                .filter(feedback_requests::employee_id.eq(employee.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
