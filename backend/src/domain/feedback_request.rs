//! Employee-initiated requests for feedback from a manager.
//!
//! A request lives until the targeted manager writes feedback for the
//! requesting employee, at which point it is deleted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackRequestId(i64);

impl FeedbackRequestId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FeedbackRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for request messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackRequestValidationError {
    #[error("message must not be blank")]
    BlankMessage,
}

/// Non-blank free-text message attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMessage(String);

impl RequestMessage {
    pub fn new(raw: impl Into<String>) -> Result<Self, FeedbackRequestValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(FeedbackRequestValidationError::BlankMessage);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for RequestMessage {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Request about to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedbackRequest {
    pub employee_id: UserId,
    pub manager_id: UserId,
    pub message: RequestMessage,
    pub created_at: DateTime<Utc>,
}

/// A persisted feedback request.
///
/// `responded` is always `false`: fulfilled requests are deleted rather than
/// flagged. The field is kept so clients reading it keep working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    id: FeedbackRequestId,
    employee_id: UserId,
    manager_id: UserId,
    message: RequestMessage,
    created_at: DateTime<Utc>,
    responded: bool,
}

impl FeedbackRequest {
    /// Attach a store-assigned id to a freshly inserted request.
    pub fn from_new(id: FeedbackRequestId, new: NewFeedbackRequest) -> Self {
        let NewFeedbackRequest {
            employee_id,
            manager_id,
            message,
            created_at,
        } = new;
        Self {
            id,
            employee_id,
            manager_id,
            message,
            created_at,
            responded: false,
        }
    }

    /// Rebuild a stored request.
    pub fn restore(
        id: FeedbackRequestId,
        new: NewFeedbackRequest,
        responded: bool,
    ) -> Self {
        Self {
            responded,
            ..Self::from_new(id, new)
        }
    }

    pub fn id(&self) -> FeedbackRequestId {
        self.id
    }

    pub fn employee_id(&self) -> UserId {
        self.employee_id
    }

    pub fn manager_id(&self) -> UserId {
        self.manager_id
    }

    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn responded(&self) -> bool {
        self.responded
    }

    /// Whether feedback from `manager` to `employee` fulfils this request.
    pub fn is_fulfilled_by(&self, manager: UserId, employee: UserId) -> bool {
        self.manager_id == manager && self.employee_id == employee
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(employee: i64, manager: i64) -> FeedbackRequest {
        FeedbackRequest::from_new(
            FeedbackRequestId::new(1),
            NewFeedbackRequest {
                employee_id: UserId::new(employee),
                manager_id: UserId::new(manager),
                message: RequestMessage::new("How did the launch go?").expect("message"),
                created_at: Utc::now(),
            },
        )
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn message_rejects_blank_input(#[case] raw: &str) {
        assert_eq!(
            RequestMessage::new(raw),
            Err(FeedbackRequestValidationError::BlankMessage)
        );
    }

    #[rstest]
    fn new_requests_are_not_responded() {
        assert!(!request(2, 1).responded());
    }

    #[rstest]
    #[case(1, 2, true)]
    #[case(2, 1, false)]
    #[case(1, 3, false)]
    fn fulfilment_matches_manager_and_employee_pair(
        #[case] manager: i64,
        #[case] employee: i64,
        #[case] expected: bool,
    ) {
        let pending = request(2, 1);
        assert_eq!(
            pending.is_fulfilled_by(UserId::new(manager), UserId::new(employee)),
            expected
        );
    }
}
