//! Feedback entity and its mutation rules.
//!
//! A feedback record is written by a manager about one employee. After
//! creation only the text fields and sentiment may change, and only through a
//! [`FeedbackUpdate`]. The `acknowledged` flag moves from `false` to `true`
//! once and never back.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Identifier assigned by the feedback store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackId(i64);

impl FeedbackId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Overall tone of a piece of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Every sentiment in display order.
    pub const ALL: [Self; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// Raised when a stored or submitted sentiment is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sentiment: {0}")]
pub struct SentimentParseError(pub String);

impl FromStr for Sentiment {
    type Err = SentimentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(SentimentParseError(other.to_owned())),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for feedback text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackValidationError {
    #[error("strengths must not be blank")]
    BlankStrengths,
    #[error("improvements must not be blank")]
    BlankImprovements,
}

impl FeedbackValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankStrengths => "strengths",
            Self::BlankImprovements => "improvements",
        }
    }
}

fn check_strengths(text: &str) -> Result<(), FeedbackValidationError> {
    if text.trim().is_empty() {
        Err(FeedbackValidationError::BlankStrengths)
    } else {
        Ok(())
    }
}

fn check_improvements(text: &str) -> Result<(), FeedbackValidationError> {
    if text.trim().is_empty() {
        Err(FeedbackValidationError::BlankImprovements)
    } else {
        Ok(())
    }
}

/// The editable part of a feedback record.
///
/// ## Invariants
/// - `strengths` and `improvements` are non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackContent {
    strengths: String,
    improvements: String,
    sentiment: Sentiment,
}

impl FeedbackContent {
    /// Validate the text fields.
    ///
    /// # Examples
    /// ```
    /// use feedback_backend::domain::{FeedbackContent, Sentiment};
    ///
    /// assert!(FeedbackContent::new("Clear writing", "Speak up", Sentiment::Positive).is_ok());
    /// assert!(FeedbackContent::new("  ", "Speak up", Sentiment::Positive).is_err());
    /// ```
    pub fn new(
        strengths: impl Into<String>,
        improvements: impl Into<String>,
        sentiment: Sentiment,
    ) -> Result<Self, FeedbackValidationError> {
        let strengths = strengths.into();
        let improvements = improvements.into();
        check_strengths(&strengths)?;
        check_improvements(&improvements)?;
        Ok(Self {
            strengths,
            improvements,
            sentiment,
        })
    }

    pub fn strengths(&self) -> &str {
        self.strengths.as_str()
    }

    pub fn improvements(&self) -> &str {
        self.improvements.as_str()
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }
}

/// Feedback about to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub manager_id: UserId,
    pub employee_id: UserId,
    pub content: FeedbackContent,
    pub created_at: DateTime<Utc>,
}

/// Raw field bundle used to rebuild a persisted feedback record.
#[derive(Debug, Clone)]
pub struct FeedbackDraft {
    pub id: FeedbackId,
    pub manager_id: UserId,
    pub employee_id: UserId,
    pub strengths: String,
    pub improvements: String,
    pub sentiment: Sentiment,
    pub acknowledged: bool,
    pub created_at: DateTime<Utc>,
}

/// A persisted feedback record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    id: FeedbackId,
    manager_id: UserId,
    employee_id: UserId,
    content: FeedbackContent,
    acknowledged: bool,
    created_at: DateTime<Utc>,
}

impl Feedback {
    /// Rebuild a record, validating its text fields.
    pub fn new(draft: FeedbackDraft) -> Result<Self, FeedbackValidationError> {
        let FeedbackDraft {
            id,
            manager_id,
            employee_id,
            strengths,
            improvements,
            sentiment,
            acknowledged,
            created_at,
        } = draft;
        Ok(Self {
            id,
            manager_id,
            employee_id,
            content: FeedbackContent::new(strengths, improvements, sentiment)?,
            acknowledged,
            created_at,
        })
    }

    /// Attach a store-assigned id to freshly inserted feedback.
    pub fn from_new(id: FeedbackId, new: NewFeedback) -> Self {
        let NewFeedback {
            manager_id,
            employee_id,
            content,
            created_at,
        } = new;
        Self {
            id,
            manager_id,
            employee_id,
            content,
            acknowledged: false,
            created_at,
        }
    }

    pub fn id(&self) -> FeedbackId {
        self.id
    }

    pub fn manager_id(&self) -> UserId {
        self.manager_id
    }

    pub fn employee_id(&self) -> UserId {
        self.employee_id
    }

    pub fn content(&self) -> &FeedbackContent {
        &self.content
    }

    pub fn strengths(&self) -> &str {
        self.content.strengths()
    }

    pub fn improvements(&self) -> &str {
        self.content.improvements()
    }

    pub fn sentiment(&self) -> Sentiment {
        self.content.sentiment()
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `user` wrote this feedback.
    pub fn is_given_by(&self, user: UserId) -> bool {
        self.manager_id == user
    }

    /// Whether `user` is the subject of this feedback.
    pub fn is_addressed_to(&self, user: UserId) -> bool {
        self.employee_id == user
    }

    /// Mark as acknowledged. Repeating the call has no further effect.
    pub fn acknowledge(&mut self) {
        self.acknowledged = true;
    }

    /// Apply the present fields of `update`, leaving everything else intact.
    pub fn apply(&mut self, update: &FeedbackUpdate) {
        if let Some(strengths) = update.strengths() {
            self.content.strengths = strengths.to_owned();
        }
        if let Some(improvements) = update.improvements() {
            self.content.improvements = improvements.to_owned();
        }
        if let Some(sentiment) = update.sentiment() {
            self.content.sentiment = sentiment;
        }
    }
}

/// Newest first, ties broken by id descending.
pub fn sort_newest_first(feedbacks: &mut [Feedback]) {
    feedbacks.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Partial update of the editable feedback fields.
///
/// Absent fields are left untouched. There is no `acknowledged` field: only
/// the receiving employee can set it.
///
/// # Examples
/// ```
/// use feedback_backend::domain::{FeedbackUpdate, Sentiment};
///
/// let update = FeedbackUpdate::default().with_sentiment(Sentiment::Neutral);
/// assert!(!update.is_empty());
/// assert!(FeedbackUpdate::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackUpdate {
    strengths: Option<String>,
    improvements: Option<String>,
    sentiment: Option<Sentiment>,
}

impl FeedbackUpdate {
    /// Validate optional inputs; present text must be non-blank.
    pub fn try_from_parts(
        strengths: Option<String>,
        improvements: Option<String>,
        sentiment: Option<Sentiment>,
    ) -> Result<Self, FeedbackValidationError> {
        if let Some(text) = strengths.as_deref() {
            check_strengths(text)?;
        }
        if let Some(text) = improvements.as_deref() {
            check_improvements(text)?;
        }
        Ok(Self {
            strengths,
            improvements,
            sentiment,
        })
    }

    /// Set the strengths text, rejecting blank input.
    pub fn try_with_strengths(
        mut self,
        strengths: impl Into<String>,
    ) -> Result<Self, FeedbackValidationError> {
        let strengths = strengths.into();
        check_strengths(&strengths)?;
        self.strengths = Some(strengths);
        Ok(self)
    }

    /// Set the improvements text, rejecting blank input.
    pub fn try_with_improvements(
        mut self,
        improvements: impl Into<String>,
    ) -> Result<Self, FeedbackValidationError> {
        let improvements = improvements.into();
        check_improvements(&improvements)?;
        self.improvements = Some(improvements);
        Ok(self)
    }

    #[must_use]
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn strengths(&self) -> Option<&str> {
        self.strengths.as_deref()
    }

    pub fn improvements(&self) -> Option<&str> {
        self.improvements.as_deref()
    }

    pub fn sentiment(&self) -> Option<Sentiment> {
        self.sentiment
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.strengths.is_none() && self.improvements.is_none() && self.sentiment.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    #[fixture]
    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn feedback(created_at: DateTime<Utc>) -> Feedback {
        Feedback::new(FeedbackDraft {
            id: FeedbackId::new(7),
            manager_id: UserId::new(1),
            employee_id: UserId::new(2),
            strengths: "Thorough reviews".to_owned(),
            improvements: "Share context earlier".to_owned(),
            sentiment: Sentiment::Positive,
            acknowledged: false,
            created_at,
        })
        .expect("valid feedback")
    }

    #[rstest]
    #[case("", "ok", FeedbackValidationError::BlankStrengths)]
    #[case("ok", " \t", FeedbackValidationError::BlankImprovements)]
    fn content_rejects_blank_text(
        #[case] strengths: &str,
        #[case] improvements: &str,
        #[case] expected: FeedbackValidationError,
    ) {
        let err = FeedbackContent::new(strengths, improvements, Sentiment::Neutral)
            .expect_err("blank text");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn sentiment_round_trips_through_str() {
        for sentiment in Sentiment::ALL {
            assert_eq!(sentiment.as_str().parse::<Sentiment>(), Ok(sentiment));
        }
        assert!("ecstatic".parse::<Sentiment>().is_err());
    }

    #[rstest]
    fn acknowledge_is_idempotent(mut feedback: Feedback) {
        feedback.acknowledge();
        let once = feedback.clone();
        feedback.acknowledge();
        assert_eq!(feedback, once);
        assert!(feedback.is_acknowledged());
    }

    #[rstest]
    fn empty_update_changes_nothing(mut feedback: Feedback) {
        let before = feedback.clone();
        feedback.apply(&FeedbackUpdate::default());
        assert_eq!(feedback, before);
    }

    #[rstest]
    fn update_touches_only_present_fields(mut feedback: Feedback) {
        let update = FeedbackUpdate::default()
            .try_with_improvements("Delegate more")
            .expect("valid text")
            .with_sentiment(Sentiment::Neutral);
        feedback.apply(&update);

        assert_eq!(feedback.strengths(), "Thorough reviews");
        assert_eq!(feedback.improvements(), "Delegate more");
        assert_eq!(feedback.sentiment(), Sentiment::Neutral);
        assert!(!feedback.is_acknowledged());
        assert_eq!(feedback.manager_id(), UserId::new(1));
        assert_eq!(feedback.employee_id(), UserId::new(2));
    }

    #[rstest]
    fn update_rejects_blank_present_text() {
        let err = FeedbackUpdate::try_from_parts(Some("  ".to_owned()), None, None)
            .expect_err("blank strengths");
        assert_eq!(err.field(), "strengths");
    }

    #[rstest]
    fn sort_orders_newest_first_with_id_tiebreak(feedback: Feedback, created_at: DateTime<Utc>) {
        let older = Feedback::new(FeedbackDraft {
            id: FeedbackId::new(9),
            manager_id: UserId::new(1),
            employee_id: UserId::new(2),
            strengths: "a".to_owned(),
            improvements: "b".to_owned(),
            sentiment: Sentiment::Negative,
            acknowledged: false,
            created_at: created_at - Duration::days(1),
        })
        .expect("valid feedback");
        let mut same_time = feedback.clone();
        same_time.id = FeedbackId::new(8);

        let mut all = vec![older, feedback, same_time];
        sort_newest_first(&mut all);

        let ids: Vec<i64> = all.iter().map(|f| f.id().get()).collect();
        assert_eq!(ids, vec![8, 7, 9]);
    }
}
