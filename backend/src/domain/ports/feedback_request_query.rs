//! Driving port for reading feedback requests.

use async_trait::async_trait;

use crate::domain::{Actor, Error, FeedbackRequest};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRequestQuery: Send + Sync {
    /// Manager only. Requests directed at the actor.
    async fn list_for_manager(&self, actor: &Actor) -> Result<Vec<FeedbackRequest>, Error>;
}
