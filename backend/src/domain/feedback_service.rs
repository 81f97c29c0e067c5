//! Feedback lifecycle service.
//!
//! Implements the feedback driving ports: managers create and edit feedback,
//! employees read and acknowledge it. Creating feedback also discards any
//! pending requests it fulfils, as a best-effort step.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};

use super::service_support::{
    RoleTarget, load_user_with_role, map_feedback_repository_error, map_request_repository_error,
};
use crate::domain::ports::{
    FeedbackCommand, FeedbackQuery, FeedbackRepository, FeedbackRequestRepository,
    FeedbackSubmission, UserRepository,
};
use crate::domain::{
    Actor, Error, Feedback, FeedbackId, FeedbackUpdate, NewFeedback, Role, UserId,
};

fn feedback_not_found(id: FeedbackId) -> Error {
    Error::not_found(format!("feedback {id} not found"))
}

/// Feedback service implementing [`FeedbackCommand`] and [`FeedbackQuery`].
#[derive(Clone)]
pub struct FeedbackService<F, R, U> {
    feedbacks: Arc<F>,
    requests: Arc<R>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<F, R, U> FeedbackService<F, R, U> {
    /// Create a new service over the feedback, request and identity stores.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use feedback_backend::domain::FeedbackService;
    /// # use feedback_backend::outbound::memory::InMemoryStore;
    /// let store = Arc::new(InMemoryStore::default());
    /// let _service = FeedbackService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(
        feedbacks: Arc<F>,
        requests: Arc<R>,
        users: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            feedbacks,
            requests,
            users,
            clock,
        }
    }
}

impl<F, R, U> FeedbackService<F, R, U>
where
    F: FeedbackRepository,
    R: FeedbackRequestRepository,
    U: UserRepository,
{
    /// Load feedback visible to the caller under `owns`, or `NotFound`.
    async fn load_owned(
        &self,
        id: FeedbackId,
        owns: impl Fn(&Feedback) -> bool + Send,
    ) -> Result<Feedback, Error> {
        self.feedbacks
            .find_by_id(id)
            .await
            .map_err(map_feedback_repository_error)?
            .filter(|feedback| owns(feedback))
            .ok_or_else(|| feedback_not_found(id))
    }

    /// Best-effort: delete requests fulfilled by new feedback. Failures are
    /// logged and never reach the caller.
    async fn discard_fulfilled_requests(&self, manager: UserId, employee: UserId) {
        match self.requests.delete_for_pair(manager, employee).await {
            Ok(removed) => {
                debug!(%manager, %employee, removed, "discarded fulfilled feedback requests");
            }
            Err(error) => {
                let error = map_request_repository_error(error);
                warn!(
                    %manager,
                    %employee,
                    error = %error,
                    "failed to discard fulfilled feedback requests"
                );
            }
        }
    }
}

#[async_trait]
impl<F, R, U> FeedbackCommand for FeedbackService<F, R, U>
where
    F: FeedbackRepository,
    R: FeedbackRequestRepository,
    U: UserRepository,
{
    async fn create(
        &self,
        actor: &Actor,
        submission: FeedbackSubmission,
    ) -> Result<Feedback, Error> {
        actor.require_role(Role::Manager)?;
        let FeedbackSubmission {
            employee_id,
            content,
        } = submission;

        load_user_with_role(
            self.users.as_ref(),
            RoleTarget {
                id: employee_id,
                role: Role::Employee,
                field: "employeeId",
                code: "not_an_employee",
            },
        )
        .await?;

        let feedback = self
            .feedbacks
            .insert(NewFeedback {
                manager_id: actor.id(),
                employee_id,
                content,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_feedback_repository_error)?;

        self.discard_fulfilled_requests(actor.id(), employee_id)
            .await;
        Ok(feedback)
    }

    async fn acknowledge(&self, actor: &Actor, id: FeedbackId) -> Result<Feedback, Error> {
        let caller = actor.id();
        let feedback = self
            .load_owned(id, |feedback| feedback.is_addressed_to(caller))
            .await?;
        if feedback.is_acknowledged() {
            return Ok(feedback);
        }

        self.feedbacks
            .mark_acknowledged(id)
            .await
            .map_err(map_feedback_repository_error)?
            .ok_or_else(|| feedback_not_found(id))
    }

    async fn update(
        &self,
        actor: &Actor,
        id: FeedbackId,
        update: FeedbackUpdate,
    ) -> Result<Feedback, Error> {
        let caller = actor.id();
        let feedback = self
            .load_owned(id, |feedback| feedback.is_given_by(caller))
            .await?;
        if update.is_empty() {
            return Ok(feedback);
        }

        self.feedbacks
            .update(id, &update)
            .await
            .map_err(map_feedback_repository_error)?
            .ok_or_else(|| feedback_not_found(id))
    }
}

#[async_trait]
impl<F, R, U> FeedbackQuery for FeedbackService<F, R, U>
where
    F: FeedbackRepository,
    R: FeedbackRequestRepository,
    U: UserRepository,
{
    async fn list_own(&self, actor: &Actor) -> Result<Vec<Feedback>, Error> {
        actor.require_role(Role::Employee)?;
        self.feedbacks
            .list_for_employee(actor.id())
            .await
            .map_err(map_feedback_repository_error)
    }

    async fn list_given(&self, actor: &Actor) -> Result<Vec<Feedback>, Error> {
        actor.require_role(Role::Manager)?;
        self.feedbacks
            .list_for_manager(actor.id())
            .await
            .map_err(map_feedback_repository_error)
    }
}

#[cfg(test)]
#[path = "feedback_service_tests.rs"]
mod tests;
