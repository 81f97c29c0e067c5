//! Feedback API handlers.
//!
//! ```text
//! POST /api/v1/feedbacks                    manager creates feedback
//! PUT  /api/v1/feedbacks/{id}               owning manager edits
//! PUT  /api/v1/feedbacks/{id}/acknowledge   receiving employee acknowledges
//! GET  /api/v1/my-feedback                  employee's received feedback
//! GET  /api/v1/given-feedbacks              manager's written feedback
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::FeedbackSubmission;
use crate::domain::{Error, Feedback, FeedbackContent, FeedbackId, FeedbackUpdate, Sentiment, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::CurrentActor;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{feedback_error, parse_sentiment};

/// Body for `POST /api/v1/feedbacks`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateFeedbackRequest {
    pub employee_id: i64,
    pub strengths: String,
    pub improvements: String,
    /// `positive`, `neutral` or `negative`.
    pub sentiment: String,
}

/// Body for `PUT /api/v1/feedbacks/{id}`. Absent fields are left unchanged.
///
/// `acknowledged` is not accepted here; unknown fields are rejected.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateFeedbackRequest {
    #[serde(default)]
    pub strengths: Option<String>,
    #[serde(default)]
    pub improvements: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
}

/// Feedback as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: i64,
    pub manager_id: i64,
    pub employee_id: i64,
    pub strengths: String,
    pub improvements: String,
    pub sentiment: Sentiment,
    pub acknowledged: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id().get(),
            manager_id: feedback.manager_id().get(),
            employee_id: feedback.employee_id().get(),
            strengths: feedback.strengths().to_owned(),
            improvements: feedback.improvements().to_owned(),
            sentiment: feedback.sentiment(),
            acknowledged: feedback.is_acknowledged(),
            created_at: feedback.created_at(),
        }
    }
}

pub(crate) fn feedback_list(feedbacks: Vec<Feedback>) -> Vec<FeedbackResponse> {
    feedbacks.into_iter().map(FeedbackResponse::from).collect()
}

impl TryFrom<CreateFeedbackRequest> for FeedbackSubmission {
    type Error = Error;

    fn try_from(value: CreateFeedbackRequest) -> Result<Self, Self::Error> {
        let sentiment = parse_sentiment(&value.sentiment)?;
        let content = FeedbackContent::new(value.strengths, value.improvements, sentiment)
            .map_err(feedback_error)?;
        Ok(Self {
            employee_id: UserId::new(value.employee_id),
            content,
        })
    }
}

impl TryFrom<UpdateFeedbackRequest> for FeedbackUpdate {
    type Error = Error;

    fn try_from(value: UpdateFeedbackRequest) -> Result<Self, Self::Error> {
        let sentiment = value
            .sentiment
            .as_deref()
            .map(parse_sentiment)
            .transpose()?;
        FeedbackUpdate::try_from_parts(value.strengths, value.improvements, sentiment)
            .map_err(feedback_error)
    }
}

/// Create feedback for an employee.
#[utoipa::path(
    post,
    path = "/api/v1/feedbacks",
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Feedback created", body = FeedbackResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a manager", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "createFeedback"
)]
#[post("/feedbacks")]
pub async fn create_feedback(
    state: web::Data<HttpState>,
    actor: CurrentActor,
    payload: web::Json<CreateFeedbackRequest>,
) -> ApiResult<HttpResponse> {
    let submission = FeedbackSubmission::try_from(payload.into_inner())?;
    let created = state
        .feedback
        .create(&actor.into_inner(), submission)
        .await?;
    Ok(HttpResponse::Created().json(FeedbackResponse::from(created)))
}

/// Edit feedback the caller wrote.
#[utoipa::path(
    put,
    path = "/api/v1/feedbacks/{id}",
    params(("id" = i64, Path, description = "Feedback id")),
    request_body = UpdateFeedbackRequest,
    responses(
        (status = 200, description = "Updated feedback", body = FeedbackResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No such feedback written by the caller", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "updateFeedback"
)]
#[put("/feedbacks/{id}")]
pub async fn update_feedback(
    state: web::Data<HttpState>,
    actor: CurrentActor,
    path: web::Path<i64>,
    payload: web::Json<UpdateFeedbackRequest>,
) -> ApiResult<web::Json<FeedbackResponse>> {
    let update = FeedbackUpdate::try_from(payload.into_inner())?;
    let updated = state
        .feedback
        .update(&actor.into_inner(), FeedbackId::new(path.into_inner()), update)
        .await?;
    Ok(web::Json(updated.into()))
}

/// Acknowledge feedback addressed to the caller.
#[utoipa::path(
    put,
    path = "/api/v1/feedbacks/{id}/acknowledge",
    params(("id" = i64, Path, description = "Feedback id")),
    responses(
        (status = 200, description = "Acknowledged feedback", body = FeedbackResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No such feedback addressed to the caller", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "acknowledgeFeedback"
)]
#[put("/feedbacks/{id}/acknowledge")]
pub async fn acknowledge_feedback(
    state: web::Data<HttpState>,
    actor: CurrentActor,
    path: web::Path<i64>,
) -> ApiResult<web::Json<FeedbackResponse>> {
    let acknowledged = state
        .feedback
        .acknowledge(&actor.into_inner(), FeedbackId::new(path.into_inner()))
        .await?;
    Ok(web::Json(acknowledged.into()))
}

/// Feedback the calling employee received, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/my-feedback",
    responses(
        (status = 200, description = "Received feedback", body = [FeedbackResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not an employee", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "listOwnFeedback"
)]
#[get("/my-feedback")]
pub async fn list_own_feedback(
    state: web::Data<HttpState>,
    actor: CurrentActor,
) -> ApiResult<web::Json<Vec<FeedbackResponse>>> {
    let feedbacks = state.feedback_query.list_own(&actor.into_inner()).await?;
    Ok(web::Json(feedback_list(feedbacks)))
}

/// Feedback the calling manager wrote, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/given-feedbacks",
    responses(
        (status = 200, description = "Written feedback", body = [FeedbackResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a manager", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "listGivenFeedback"
)]
#[get("/given-feedbacks")]
pub async fn list_given_feedback(
    state: web::Data<HttpState>,
    actor: CurrentActor,
) -> ApiResult<web::Json<Vec<FeedbackResponse>>> {
    let feedbacks = state.feedback_query.list_given(&actor.into_inner()).await?;
    Ok(web::Json(feedback_list(feedbacks)))
}

#[cfg(test)]
#[path = "feedbacks_tests.rs"]
mod tests;
