//! Feedback request service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::service_support::{RoleTarget, load_user_with_role, map_request_repository_error};
use crate::domain::ports::{
    FeedbackRequestCommand, FeedbackRequestQuery, FeedbackRequestRepository,
    FeedbackRequestSubmission, UserRepository,
};
use crate::domain::{Actor, Error, FeedbackRequest, NewFeedbackRequest, Role};

/// Lets employees ask managers for feedback and managers read those asks.
#[derive(Clone)]
pub struct FeedbackRequestService<R, U> {
    requests: Arc<R>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, U> FeedbackRequestService<R, U> {
    pub fn new(requests: Arc<R>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            requests,
            users,
            clock,
        }
    }
}

#[async_trait]
impl<R, U> FeedbackRequestCommand for FeedbackRequestService<R, U>
where
    R: FeedbackRequestRepository,
    U: UserRepository,
{
    async fn create(
        &self,
        actor: &Actor,
        submission: FeedbackRequestSubmission,
    ) -> Result<FeedbackRequest, Error> {
        actor.require_role(Role::Employee)?;
        let FeedbackRequestSubmission {
            manager_id,
            message,
        } = submission;

        load_user_with_role(
            self.users.as_ref(),
            RoleTarget {
                id: manager_id,
                role: Role::Manager,
                field: "managerId",
                code: "not_a_manager",
            },
        )
        .await?;

        self.requests
            .insert(NewFeedbackRequest {
                employee_id: actor.id(),
                manager_id,
                message,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_request_repository_error)
    }
}

#[async_trait]
impl<R, U> FeedbackRequestQuery for FeedbackRequestService<R, U>
where
    R: FeedbackRequestRepository,
    U: UserRepository,
{
    async fn list_for_manager(&self, actor: &Actor) -> Result<Vec<FeedbackRequest>, Error> {
        actor.require_role(Role::Manager)?;
        self.requests
            .list_for_manager(actor.id())
            .await
            .map_err(map_request_repository_error)
    }
}
