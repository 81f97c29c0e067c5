//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod actor;
pub mod dashboards;
pub mod directory;
pub mod error;
pub mod feedback_requests;
pub mod feedbacks;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Versioned API scope with every feedback endpoint registered.
///
/// Callers attach [`state::HttpState`] as app data; the scope installs its own
/// JSON extractor limits and error mapping.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(validation::json_config())
        .service(accounts::register)
        .service(accounts::login)
        .service(accounts::me)
        .service(feedbacks::create_feedback)
        .service(feedbacks::acknowledge_feedback)
        .service(feedbacks::update_feedback)
        .service(feedbacks::list_own_feedback)
        .service(feedbacks::list_given_feedback)
        .service(feedback_requests::create_feedback_request)
        .service(feedback_requests::list_feedback_requests)
        .service(dashboards::manager_dashboard)
        .service(dashboards::employee_dashboard)
        .service(directory::list_employees)
        .service(directory::list_managers)
}
