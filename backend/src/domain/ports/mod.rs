//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`TokenCodec`]) are
//! implemented by outbound adapters. Driving ports (`*Command`, `*Query`) are
//! implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod current_user_query;
mod dashboard_query;
mod directory_query;
mod feedback_command;
mod feedback_query;
mod feedback_repository;
mod feedback_request_command;
mod feedback_request_query;
mod feedback_request_repository;
mod password_hasher;
mod token_codec;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use current_user_query::MockCurrentUserQuery;
pub use current_user_query::CurrentUserQuery;
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::DashboardQuery;
#[cfg(test)]
pub use directory_query::MockDirectoryQuery;
pub use directory_query::DirectoryQuery;
#[cfg(test)]
pub use feedback_command::MockFeedbackCommand;
pub use feedback_command::{FeedbackCommand, FeedbackSubmission};
#[cfg(test)]
pub use feedback_query::MockFeedbackQuery;
pub use feedback_query::FeedbackQuery;
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
pub use feedback_repository::{FeedbackRepository, FeedbackRepositoryError};
#[cfg(test)]
pub use feedback_request_command::MockFeedbackRequestCommand;
pub use feedback_request_command::{FeedbackRequestCommand, FeedbackRequestSubmission};
#[cfg(test)]
pub use feedback_request_query::MockFeedbackRequestQuery;
pub use feedback_request_query::FeedbackRequestQuery;
#[cfg(test)]
pub use feedback_request_repository::MockFeedbackRequestRepository;
pub use feedback_request_repository::{FeedbackRequestRepository, FeedbackRequestRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{IssuedToken, TokenCodec, TokenCodecError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
