//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected payload becomes an `invalid_request` error whose details
//! name the offending camelCase field and a stable machine-readable code.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{
    Error, FeedbackRequestValidationError, FeedbackValidationError, LoginValidationError,
    RegistrationValidationError, Sentiment,
};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const STRENGTHS: FieldName = FieldName::new("strengths");
pub(crate) const IMPROVEMENTS: FieldName = FieldName::new("improvements");
pub(crate) const SENTIMENT: FieldName = FieldName::new("sentiment");
pub(crate) const MESSAGE: FieldName = FieldName::new("message");

fn field_error(field: FieldName, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

pub(crate) fn login_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => field_error(EMAIL, "empty_email", err.to_string()),
        LoginValidationError::EmptyPassword => {
            field_error(PASSWORD, "empty_password", err.to_string())
        }
    }
}

pub(crate) fn registration_error(err: RegistrationValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

pub(crate) fn feedback_error(err: FeedbackValidationError) -> Error {
    match err {
        FeedbackValidationError::BlankStrengths => {
            field_error(STRENGTHS, "blank_strengths", err.to_string())
        }
        FeedbackValidationError::BlankImprovements => {
            field_error(IMPROVEMENTS, "blank_improvements", err.to_string())
        }
    }
}

pub(crate) fn request_error(err: FeedbackRequestValidationError) -> Error {
    field_error(MESSAGE, "blank_message", err.to_string())
}

/// Parse a sentiment label, naming `sentiment` on failure.
pub(crate) fn parse_sentiment(value: &str) -> Result<Sentiment, Error> {
    value.parse::<Sentiment>().map_err(|_| {
        Error::invalid_request("sentiment must be positive, neutral or negative").with_details(
            json!({
                "field": SENTIMENT.as_str(),
                "code": "unknown_sentiment",
                "value": value,
            }),
        )
    })
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let error = match &err {
        JsonPayloadError::ContentType => Error::invalid_request("expected application/json body")
            .with_details(json!({ "code": "unsupported_content_type" })),
        _ => Error::invalid_request(format!("malformed request body: {err}"))
            .with_details(json!({ "code": "malformed_body" })),
    };
    error.into()
}

/// JSON extractor configuration returning domain-shaped 400 responses,
/// including for unknown fields.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(json_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(FeedbackValidationError::BlankStrengths, "strengths", "blank_strengths")]
    #[case(
        FeedbackValidationError::BlankImprovements,
        "improvements",
        "blank_improvements"
    )]
    fn feedback_errors_name_their_field(
        #[case] err: FeedbackValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mapped = feedback_error(err);
        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        let details = mapped.details().expect("details");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], code);
    }

    #[rstest]
    #[case("positive", true)]
    #[case("negative", true)]
    #[case("meh", false)]
    fn sentiment_labels_are_checked(#[case] raw: &str, #[case] valid: bool) {
        let parsed = parse_sentiment(raw);
        assert_eq!(parsed.is_ok(), valid);
        if let Err(err) = parsed {
            assert_eq!(err.details().expect("details")["value"], raw);
        }
    }
}
