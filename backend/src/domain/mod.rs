//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed entities shared by the HTTP and persistence
//! adapters, plus the services that implement the driving ports. Types keep
//! their invariants behind validating constructors and document their serde
//! contracts in Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) - API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) - stable error identifier.
//! - User, Role, Actor - identities and the authenticated caller.
//! - Feedback, FeedbackRequest - the records managers and employees exchange.
//! - ManagerDashboard, EmployeeDashboard - read-only rollups.
//! - `*Service` - driving port implementations.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod feedback;
pub mod feedback_request;
pub mod ports;
pub mod trace_id;
pub mod user;

mod account_service;
mod dashboard_service;
mod directory_service;
mod feedback_request_service;
mod feedback_service;
mod service_support;

pub use self::account_service::AccountService;
pub use self::auth::{
    Actor, LoginCredentials, LoginValidationError, MIN_PASSWORD_LENGTH, RegistrationDetails,
    RegistrationValidationError, TokenSubject,
};
pub use self::dashboard::{EmployeeDashboard, ManagerDashboard, SentimentSummary};
pub use self::dashboard_service::DashboardService;
pub use self::directory_service::DirectoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feedback::{
    Feedback, FeedbackContent, FeedbackDraft, FeedbackId, FeedbackUpdate,
    FeedbackValidationError, NewFeedback, Sentiment, SentimentParseError, sort_newest_first,
};
pub use self::feedback_request::{
    FeedbackRequest, FeedbackRequestId, FeedbackRequestValidationError, NewFeedbackRequest,
    RequestMessage,
};
pub use self::feedback_request_service::FeedbackRequestService;
pub use self::feedback_service::FeedbackService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, EmailValidationError, NewUserAccount, Role, RoleParseError, User, UserAccount, UserId,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use feedback_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
