//! Read-only rollups shown on the role dashboards.

use serde::Serialize;
use utoipa::ToSchema;

use super::{Feedback, Sentiment};

/// Count of feedback records per sentiment.
///
/// Every sentiment is present, zero counts included, so the counts always sum
/// to the number of records summarised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SentimentSummary {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentSummary {
    /// Tally the sentiments of `feedbacks`.
    ///
    /// # Examples
    /// ```
    /// use feedback_backend::domain::SentimentSummary;
    ///
    /// let summary = SentimentSummary::from_feedbacks(&[]);
    /// assert_eq!(summary.total(), 0);
    /// ```
    pub fn from_feedbacks(feedbacks: &[Feedback]) -> Self {
        feedbacks
            .iter()
            .fold(Self::default(), |mut summary, feedback| {
                match feedback.sentiment() {
                    Sentiment::Positive => summary.positive += 1,
                    Sentiment::Neutral => summary.neutral += 1,
                    Sentiment::Negative => summary.negative += 1,
                }
                summary
            })
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Manager view over the feedback they have given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerDashboard {
    total_feedback_given: usize,
    sentiment_summary: SentimentSummary,
    feedbacks: Vec<Feedback>,
}

impl ManagerDashboard {
    /// Build the dashboard from feedback already ordered newest first.
    pub fn from_given(feedbacks: Vec<Feedback>) -> Self {
        Self {
            total_feedback_given: feedbacks.len(),
            sentiment_summary: SentimentSummary::from_feedbacks(&feedbacks),
            feedbacks,
        }
    }

    pub fn total_feedback_given(&self) -> usize {
        self.total_feedback_given
    }

    pub fn sentiment_summary(&self) -> SentimentSummary {
        self.sentiment_summary
    }

    pub fn feedbacks(&self) -> &[Feedback] {
        &self.feedbacks
    }

    pub fn into_feedbacks(self) -> Vec<Feedback> {
        self.feedbacks
    }
}

/// Employee view over the feedback they have received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDashboard {
    feedbacks: Vec<Feedback>,
}

impl EmployeeDashboard {
    pub fn from_received(feedbacks: Vec<Feedback>) -> Self {
        Self { feedbacks }
    }

    pub fn feedbacks(&self) -> &[Feedback] {
        &self.feedbacks
    }

    pub fn into_feedbacks(self) -> Vec<Feedback> {
        self.feedbacks
    }
}
