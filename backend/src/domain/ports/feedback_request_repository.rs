//! Port for feedback request persistence.

use async_trait::async_trait;

use crate::domain::{FeedbackRequest, NewFeedbackRequest, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by feedback request repository adapters.
    pub enum FeedbackRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "feedback request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "feedback request repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRequestRepository: Send + Sync {
    async fn insert(
        &self,
        request: NewFeedbackRequest,
    ) -> Result<FeedbackRequest, FeedbackRequestRepositoryError>;

    /// Requests directed at `manager`, oldest first.
    async fn list_for_manager(
        &self,
        manager: UserId,
    ) -> Result<Vec<FeedbackRequest>, FeedbackRequestRepositoryError>;

    /// Delete every request from `employee` to `manager`, returning how many
    /// rows were removed.
    async fn delete_for_pair(
        &self,
        manager: UserId,
        employee: UserId,
    ) -> Result<usize, FeedbackRequestRepositoryError>;
}
