//! Driving port for feedback reads.

use async_trait::async_trait;

use crate::domain::{Actor, Error, Feedback};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackQuery: Send + Sync {
    /// Employee only. Feedback addressed to the actor, newest first.
    async fn list_own(&self, actor: &Actor) -> Result<Vec<Feedback>, Error>;

    /// Manager only. Feedback written by the actor, newest first.
    async fn list_given(&self, actor: &Actor) -> Result<Vec<Feedback>, Error>;
}
