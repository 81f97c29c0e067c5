//! Port for feedback persistence.

use async_trait::async_trait;

use crate::domain::{Feedback, FeedbackId, FeedbackUpdate, NewFeedback, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by feedback repository adapters.
    pub enum FeedbackRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "feedback repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "feedback repository query failed: {message}",
    }
}

/// Storage for feedback records.
///
/// List operations return records newest first, ties broken by id
/// descending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Insert new feedback with `acknowledged = false`.
    async fn insert(&self, feedback: NewFeedback) -> Result<Feedback, FeedbackRepositoryError>;

    async fn find_by_id(&self, id: FeedbackId)
    -> Result<Option<Feedback>, FeedbackRepositoryError>;

    /// Feedback addressed to `employee`.
    async fn list_for_employee(
        &self,
        employee: UserId,
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError>;

    /// Feedback written by `manager`.
    async fn list_for_manager(
        &self,
        manager: UserId,
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError>;

    /// Apply the present fields of `update` in one transaction.
    ///
    /// Returns `None` when the record does not exist.
    async fn update(
        &self,
        id: FeedbackId,
        update: &FeedbackUpdate,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError>;

    /// Set `acknowledged = true`. Returns `None` when the record does not exist.
    async fn mark_acknowledged(
        &self,
        id: FeedbackId,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError>;
}
