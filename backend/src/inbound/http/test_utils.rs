//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    MockAccountCommand, MockCurrentUserQuery, MockDashboardQuery, MockDirectoryQuery,
    MockFeedbackCommand, MockFeedbackQuery, MockFeedbackRequestCommand, MockFeedbackRequestQuery,
};
use crate::domain::{Actor, Email, Role, UserId};

use super::state::HttpState;

/// Token accepted by [`MockPorts::authenticate_as`].
pub const TEST_TOKEN: &str = "test-token";

/// One mock per driving port. Set expectations, then call
/// [`MockPorts::into_data`].
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountCommand,
    pub current_user: MockCurrentUserQuery,
    pub feedback: MockFeedbackCommand,
    pub feedback_query: MockFeedbackQuery,
    pub feedback_requests: MockFeedbackRequestCommand,
    pub feedback_requests_query: MockFeedbackRequestQuery,
    pub dashboards: MockDashboardQuery,
    pub directory: MockDirectoryQuery,
}

impl MockPorts {
    /// Resolve [`TEST_TOKEN`] to an actor with the given id and role.
    pub fn authenticate_as(&mut self, id: i64, role: Role) -> Actor {
        let actor = test_actor(id, role);
        let resolved = actor.clone();
        self.current_user
            .expect_resolve_actor()
            .withf(|token| token == TEST_TOKEN)
            .returning(move |_| Ok(resolved.clone()));
        actor
    }

    pub fn into_data(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            accounts: Arc::new(self.accounts),
            current_user: Arc::new(self.current_user),
            feedback: Arc::new(self.feedback),
            feedback_query: Arc::new(self.feedback_query),
            feedback_requests: Arc::new(self.feedback_requests),
            feedback_requests_query: Arc::new(self.feedback_requests_query),
            dashboards: Arc::new(self.dashboards),
            directory: Arc::new(self.directory),
        })
    }
}

pub fn test_actor(id: i64, role: Role) -> Actor {
    Actor::new(
        UserId::new(id),
        Email::new(format!("user{id}@example.com")).expect("valid email"),
        role,
    )
}

/// `Authorization` header carrying [`TEST_TOKEN`].
pub fn bearer() -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {TEST_TOKEN}"),
    )
}
