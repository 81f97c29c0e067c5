//! Dashboard aggregation service.

use std::sync::Arc;

use async_trait::async_trait;

use super::service_support::map_feedback_repository_error;
use crate::domain::ports::{DashboardQuery, FeedbackRepository};
use crate::domain::{Actor, EmployeeDashboard, Error, ManagerDashboard, Role};

/// Read-only rollups over the feedback store.
#[derive(Clone)]
pub struct DashboardService<F> {
    feedbacks: Arc<F>,
}

impl<F> DashboardService<F> {
    pub fn new(feedbacks: Arc<F>) -> Self {
        Self { feedbacks }
    }
}

#[async_trait]
impl<F> DashboardQuery for DashboardService<F>
where
    F: FeedbackRepository,
{
    async fn manager_dashboard(&self, actor: &Actor) -> Result<ManagerDashboard, Error> {
        actor.require_role(Role::Manager)?;
        let given = self
            .feedbacks
            .list_for_manager(actor.id())
            .await
            .map_err(map_feedback_repository_error)?;
        Ok(ManagerDashboard::from_given(given))
    }

    async fn employee_dashboard(&self, actor: &Actor) -> Result<EmployeeDashboard, Error> {
        actor.require_role(Role::Employee)?;
        let received = self
            .feedbacks
            .list_for_employee(actor.id())
            .await
            .map_err(map_feedback_repository_error)?;
        Ok(EmployeeDashboard::from_received(received))
    }
}
