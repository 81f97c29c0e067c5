//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they depend only on driving
//! ports and stay testable with mocks.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, CurrentUserQuery, DashboardQuery, DirectoryQuery, FeedbackCommand,
    FeedbackQuery, FeedbackRepository, FeedbackRequestCommand, FeedbackRequestQuery,
    FeedbackRequestRepository, PasswordHasher, TokenCodec, UserRepository,
};
use crate::domain::{
    AccountService, DashboardService, DirectoryService, FeedbackRequestService, FeedbackService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub current_user: Arc<dyn CurrentUserQuery>,
    pub feedback: Arc<dyn FeedbackCommand>,
    pub feedback_query: Arc<dyn FeedbackQuery>,
    pub feedback_requests: Arc<dyn FeedbackRequestCommand>,
    pub feedback_requests_query: Arc<dyn FeedbackRequestQuery>,
    pub dashboards: Arc<dyn DashboardQuery>,
    pub directory: Arc<dyn DirectoryQuery>,
}

/// Driven adapters and security primitives the services are built from.
pub struct StateDependencies<U, F, R> {
    pub users: Arc<U>,
    pub feedbacks: Arc<F>,
    pub requests: Arc<R>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenCodec>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Wire every domain service over the supplied repositories.
    pub fn from_dependencies<U, F, R>(deps: StateDependencies<U, F, R>) -> Self
    where
        U: UserRepository + 'static,
        F: FeedbackRepository + 'static,
        R: FeedbackRequestRepository + 'static,
    {
        let StateDependencies {
            users,
            feedbacks,
            requests,
            hasher,
            tokens,
            clock,
        } = deps;

        let accounts = Arc::new(AccountService::new(users.clone(), hasher, tokens));
        let feedback = Arc::new(FeedbackService::new(
            feedbacks.clone(),
            requests.clone(),
            users.clone(),
            clock.clone(),
        ));
        let feedback_requests = Arc::new(FeedbackRequestService::new(
            requests,
            users.clone(),
            clock,
        ));

        Self {
            accounts: accounts.clone(),
            current_user: accounts,
            feedback: feedback.clone(),
            feedback_query: feedback,
            feedback_requests: feedback_requests.clone(),
            feedback_requests_query: feedback_requests,
            dashboards: Arc::new(DashboardService::new(feedbacks)),
            directory: Arc::new(DirectoryService::new(users)),
        }
    }
}
