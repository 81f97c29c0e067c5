//! Driving port for feedback mutations.

use async_trait::async_trait;

use crate::domain::{Actor, Error, Feedback, FeedbackContent, FeedbackId, FeedbackUpdate, UserId};

/// Manager input for new feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSubmission {
    pub employee_id: UserId,
    pub content: FeedbackContent,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackCommand: Send + Sync {
    /// Manager only. Writes feedback for an employee and discards any pending
    /// requests that it fulfils.
    async fn create(&self, actor: &Actor, submission: FeedbackSubmission)
    -> Result<Feedback, Error>;

    /// Addressed employee only; anyone else sees `NotFound`.
    async fn acknowledge(&self, actor: &Actor, id: FeedbackId) -> Result<Feedback, Error>;

    /// Authoring manager only; anyone else sees `NotFound`.
    async fn update(
        &self,
        actor: &Actor,
        id: FeedbackId,
        update: FeedbackUpdate,
    ) -> Result<Feedback, Error>;
}
