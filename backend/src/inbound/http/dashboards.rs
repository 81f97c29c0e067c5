//! Dashboard API handlers.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, ManagerDashboard, SentimentSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::CurrentActor;
use crate::inbound::http::feedbacks::{FeedbackResponse, feedback_list};
use crate::inbound::http::state::HttpState;

/// Rollup of the feedback a manager has written.
#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerDashboardResponse {
    pub total_feedback_given: usize,
    /// Counts per sentiment; all three keys are always present.
    pub sentiment_summary: SentimentSummary,
    pub feedbacks: Vec<FeedbackResponse>,
}

impl From<ManagerDashboard> for ManagerDashboardResponse {
    fn from(dashboard: ManagerDashboard) -> Self {
        Self {
            total_feedback_given: dashboard.total_feedback_given(),
            sentiment_summary: dashboard.sentiment_summary(),
            feedbacks: feedback_list(dashboard.into_feedbacks()),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/manager",
    responses(
        (status = 200, description = "Manager dashboard", body = ManagerDashboardResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a manager", body = Error)
    ),
    tags = ["dashboards"],
    operation_id = "managerDashboard"
)]
#[get("/dashboard/manager")]
pub async fn manager_dashboard(
    state: web::Data<HttpState>,
    actor: CurrentActor,
) -> ApiResult<web::Json<ManagerDashboardResponse>> {
    let dashboard = state
        .dashboards
        .manager_dashboard(&actor.into_inner())
        .await?;
    Ok(web::Json(dashboard.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/employee",
    responses(
        (status = 200, description = "Feedback received by the caller", body = [FeedbackResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not an employee", body = Error)
    ),
    tags = ["dashboards"],
    operation_id = "employeeDashboard"
)]
#[get("/dashboard/employee")]
pub async fn employee_dashboard(
    state: web::Data<HttpState>,
    actor: CurrentActor,
) -> ApiResult<web::Json<Vec<FeedbackResponse>>> {
    let dashboard = state
        .dashboards
        .employee_dashboard(&actor.into_inner())
        .await?;
    Ok(web::Json(feedback_list(dashboard.into_feedbacks())))
}
