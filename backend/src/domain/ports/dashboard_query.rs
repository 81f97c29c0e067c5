//! Driving port for role dashboards.

use async_trait::async_trait;

use crate::domain::{Actor, EmployeeDashboard, Error, ManagerDashboard};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    async fn manager_dashboard(&self, actor: &Actor) -> Result<ManagerDashboard, Error>;

    async fn employee_dashboard(&self, actor: &Actor) -> Result<EmployeeDashboard, Error>;
}
