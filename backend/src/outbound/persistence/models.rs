//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversion into domain types lives in the
//! repository modules so validation failures map onto port errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{feedback_requests, feedbacks, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub password_hash: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub role: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the feedbacks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = feedbacks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FeedbackRow {
    pub id: i64,
    pub manager_id: i64,
    pub employee_id: i64,
    pub strengths: String,
    pub improvements: String,
    pub sentiment: String,
    pub acknowledged: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating feedback records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = feedbacks)]
pub(crate) struct NewFeedbackRow<'a> {
    pub manager_id: i64,
    pub employee_id: i64,
    pub strengths: &'a str,
    pub improvements: &'a str,
    pub sentiment: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Partial changeset for manager edits. `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = feedbacks)]
pub(crate) struct FeedbackChangeset<'a> {
    pub strengths: Option<&'a str>,
    pub improvements: Option<&'a str>,
    pub sentiment: Option<&'a str>,
}

/// Row struct for reading from the feedback_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = feedback_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FeedbackRequestRow {
    pub id: i64,
    pub employee_id: i64,
    pub manager_id: i64,
    pub message: String,
    pub responded: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating feedback request records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = feedback_requests)]
pub(crate) struct NewFeedbackRequestRow<'a> {
    pub employee_id: i64,
    pub manager_id: i64,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
}
