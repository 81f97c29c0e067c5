//! Helpers shared by the domain services: repository error mapping and
//! role checks against the identity store.

use serde_json::json;

use super::ports::{
    FeedbackRepositoryError, FeedbackRequestRepositoryError, UserRepository, UserRepositoryError,
};
use super::{Error, Role, User, UserId};

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { .. } => Error::conflict("email already registered")
            .with_details(json!({ "field": "email", "code": "duplicate_email" })),
    }
}

pub(crate) fn map_feedback_repository_error(error: FeedbackRepositoryError) -> Error {
    match error {
        FeedbackRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("feedback repository unavailable: {message}"))
        }
        FeedbackRepositoryError::Query { message } => {
            Error::internal(format!("feedback repository error: {message}"))
        }
    }
}

pub(crate) fn map_request_repository_error(error: FeedbackRequestRepositoryError) -> Error {
    match error {
        FeedbackRequestRepositoryError::Connection { message } => Error::service_unavailable(
            format!("feedback request repository unavailable: {message}"),
        ),
        FeedbackRequestRepositoryError::Query { message } => {
            Error::internal(format!("feedback request repository error: {message}"))
        }
    }
}

/// Target of an operation that must hold a particular role.
pub(crate) struct RoleTarget {
    pub id: UserId,
    pub role: Role,
    /// Request field named in the validation error.
    pub field: &'static str,
    /// Machine-readable code reported when the check fails.
    pub code: &'static str,
}

/// Load `target.id` and check it holds `target.role`.
///
/// A missing user and a user with the wrong role both fail as
/// `InvalidRequest` naming the offending field.
pub(crate) async fn load_user_with_role<U>(users: &U, target: RoleTarget) -> Result<User, Error>
where
    U: UserRepository + ?Sized,
{
    let RoleTarget {
        id,
        role,
        field,
        code,
    } = target;
    let user = users
        .find_by_id(id)
        .await
        .map_err(map_user_repository_error)?;
    match user {
        Some(user) if user.role() == role => Ok(user),
        _ => Err(
            Error::invalid_request(format!("{field} must reference a registered {role}"))
                .with_details(json!({ "field": field, "code": code, "value": id.get() })),
        ),
    }
}
