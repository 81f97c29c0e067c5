//! Feedback request API handlers.
//!
//! ```text
//! POST /api/v1/feedback-requests {"managerId":1,"message":"Could you review my Q2 work?"}
//! GET  /api/v1/feedback-requests
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::FeedbackRequestSubmission;
use crate::domain::{Error, FeedbackRequest, RequestMessage, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::CurrentActor;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::request_error;

/// Body for `POST /api/v1/feedback-requests`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateFeedbackRequestRequest {
    pub manager_id: i64,
    pub message: String,
}

/// A pending feedback request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequestResponse {
    pub id: i64,
    pub employee_id: i64,
    pub manager_id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
    /// Always `false`; fulfilled requests are removed instead.
    pub responded: bool,
}

impl From<FeedbackRequest> for FeedbackRequestResponse {
    fn from(request: FeedbackRequest) -> Self {
        Self {
            id: request.id().get(),
            employee_id: request.employee_id().get(),
            manager_id: request.manager_id().get(),
            message: request.message().to_owned(),
            created_at: request.created_at(),
            responded: request.responded(),
        }
    }
}

/// Ask a manager for feedback.
#[utoipa::path(
    post,
    path = "/api/v1/feedback-requests",
    request_body = CreateFeedbackRequestRequest,
    responses(
        (status = 201, description = "Request recorded", body = FeedbackRequestResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not an employee", body = Error)
    ),
    tags = ["feedback-requests"],
    operation_id = "createFeedbackRequest"
)]
#[post("/feedback-requests")]
pub async fn create_feedback_request(
    state: web::Data<HttpState>,
    actor: CurrentActor,
    payload: web::Json<CreateFeedbackRequestRequest>,
) -> ApiResult<HttpResponse> {
    let CreateFeedbackRequestRequest {
        manager_id,
        message,
    } = payload.into_inner();
    let submission = FeedbackRequestSubmission {
        manager_id: UserId::new(manager_id),
        message: RequestMessage::new(message).map_err(request_error)?,
    };
    let created = state
        .feedback_requests
        .create(&actor.into_inner(), submission)
        .await?;
    Ok(HttpResponse::Created().json(FeedbackRequestResponse::from(created)))
}

/// Requests addressed to the calling manager, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/feedback-requests",
    responses(
        (status = 200, description = "Pending requests", body = [FeedbackRequestResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a manager", body = Error)
    ),
    tags = ["feedback-requests"],
    operation_id = "listFeedbackRequests"
)]
#[get("/feedback-requests")]
pub async fn list_feedback_requests(
    state: web::Data<HttpState>,
    actor: CurrentActor,
) -> ApiResult<web::Json<Vec<FeedbackRequestResponse>>> {
    let requests = state
        .feedback_requests_query
        .list_for_manager(&actor.into_inner())
        .await?;
    Ok(web::Json(
        requests
            .into_iter()
            .map(FeedbackRequestResponse::from)
            .collect(),
    ))
}
