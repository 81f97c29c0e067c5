//! Driving port for creating feedback requests.

use async_trait::async_trait;

use crate::domain::{Actor, Error, FeedbackRequest, RequestMessage, UserId};

/// Employee input for a new feedback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequestSubmission {
    pub manager_id: UserId,
    pub message: RequestMessage,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRequestCommand: Send + Sync {
    /// Employee only. The target must be a registered manager.
    async fn create(
        &self,
        actor: &Actor,
        submission: FeedbackRequestSubmission,
    ) -> Result<FeedbackRequest, Error>;
}
