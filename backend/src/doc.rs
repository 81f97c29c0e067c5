//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint from the inbound layer together
//! with the request, response and error schemas they reference. A bearer
//! token scheme is registered globally; the account and health endpoints opt
//! out per operation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Role, Sentiment, SentimentSummary};
use crate::inbound::http::accounts::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::inbound::http::dashboards::ManagerDashboardResponse;
use crate::inbound::http::feedback_requests::{
    CreateFeedbackRequestRequest, FeedbackRequestResponse,
};
use crate::inbound::http::feedbacks::{
    CreateFeedbackRequest, FeedbackResponse, UpdateFeedbackRequest,
};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /api/v1/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI serves it in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Feedback backend API",
        description = "Role-based feedback exchange between managers and employees."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::me,
        crate::inbound::http::feedbacks::create_feedback,
        crate::inbound::http::feedbacks::update_feedback,
        crate::inbound::http::feedbacks::acknowledge_feedback,
        crate::inbound::http::feedbacks::list_own_feedback,
        crate::inbound::http::feedbacks::list_given_feedback,
        crate::inbound::http::feedback_requests::create_feedback_request,
        crate::inbound::http::feedback_requests::list_feedback_requests,
        crate::inbound::http::dashboards::manager_dashboard,
        crate::inbound::http::dashboards::employee_dashboard,
        crate::inbound::http::directory::list_employees,
        crate::inbound::http::directory::list_managers,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        Sentiment,
        SentimentSummary,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        TokenResponse,
        CreateFeedbackRequest,
        UpdateFeedbackRequest,
        FeedbackResponse,
        CreateFeedbackRequestRequest,
        FeedbackRequestResponse,
        ManagerDashboardResponse
    )),
    tags(
        (name = "accounts", description = "Registration, login and the current user"),
        (name = "feedback", description = "Feedback written by managers"),
        (name = "feedback-requests", description = "Employee requests for feedback"),
        (name = "dashboards", description = "Per-role summaries"),
        (name = "directory", description = "Listing users of the opposite role"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("FeedbackResponse", "acknowledged")]
    #[case("ManagerDashboardResponse", "sentiment_summary")]
    #[case("ManagerDashboardResponse", "total_feedback_given")]
    fn schemas_expose_wire_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/api/v1/feedbacks")]
    #[case("/api/v1/feedbacks/{id}/acknowledge")]
    #[case("/api/v1/dashboard/manager")]
    #[case("/health/ready")]
    fn endpoints_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
