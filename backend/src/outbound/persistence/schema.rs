//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Int8,
        /// Trimmed, lowercased address. Unique.
        email -> Varchar,
        /// `manager` or `employee`.
        role -> Varchar,
        /// PHC-formatted Argon2 hash.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Feedback written by managers for employees.
    feedbacks (id) {
        id -> Int8,
        manager_id -> Int8,
        employee_id -> Int8,
        strengths -> Text,
        improvements -> Text,
        /// `positive`, `neutral` or `negative`.
        sentiment -> Varchar,
        acknowledged -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Pending requests from employees to managers.
    feedback_requests (id) {
        id -> Int8,
        employee_id -> Int8,
        manager_id -> Int8,
        message -> Text,
        responded -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(feedback_requests, feedbacks, users);
