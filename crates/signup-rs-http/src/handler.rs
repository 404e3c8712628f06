//! The server-side submission handler.
//!
//! [`handle_submission`] turns a form-encoded body into a status and a
//! [`SubmissionOutcome`]. It never fails: malformed or missing fields are an
//! ordinary `Invalid` result.

use http::StatusCode;

use signup_rs_forms::{FormValues, Schema, SubmissionOutcome, ValidationResult};

use crate::querydict::QueryDict;

/// Receives accepted submissions.
///
/// The sink runs after validation succeeds and before the response is built.
/// It makes no persistence guarantee.
pub trait SubmissionSink: Send + Sync {
    /// Called once per accepted submission with the cleaned data.
    fn accept(&self, data: &FormValues);
}

/// Writes each accepted submission as a structured `info` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl SubmissionSink for TracingSink {
    fn accept(&self, data: &FormValues) {
        let field = |name: &str| data.get(name).map(ToString::to_string).unwrap_or_default();
        tracing::info!(
            name = %field("name"),
            email = %field("email"),
            age = %field("age"),
            "signup accepted"
        );
    }
}

/// The result of handling one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct HandledSubmission {
    /// `200 OK` when accepted, `400 Bad Request` when rejected.
    pub status: StatusCode,
    /// The outcome returned to the client.
    pub outcome: SubmissionOutcome,
    /// The values as submitted, before coercion.
    pub submitted: FormValues,
}

/// Validates a submission against `schema` and hands accepted data to `sink`.
///
/// # Examples
///
/// ```
/// use signup_rs_forms::signup_schema;
/// use signup_rs_http::handler::{handle_submission, TracingSink};
/// use signup_rs_http::QueryDict;
///
/// let form = QueryDict::parse("name=A&email=al%40x.com&age=18");
/// let handled = handle_submission(signup_schema(), &TracingSink, &form);
/// assert_eq!(handled.status, http::StatusCode::BAD_REQUEST);
/// assert_eq!(
///     handled.outcome.errors().unwrap()["name"],
///     "Name should have at least 2 letters"
/// );
/// ```
pub fn handle_submission(
    schema: &Schema,
    sink: &dyn SubmissionSink,
    form: &QueryDict,
) -> HandledSubmission {
    let submitted = form.to_form_values();

    match schema.validate(&submitted) {
        ValidationResult::Valid { data } => {
            sink.accept(&data);
            HandledSubmission {
                status: StatusCode::OK,
                outcome: SubmissionOutcome::Success,
                submitted,
            }
        }
        ValidationResult::Invalid { errors } => {
            let mut failing: Vec<&str> = errors.keys().map(String::as_str).collect();
            failing.sort_unstable();
            tracing::debug!(fields = ?failing, "signup rejected");
            HandledSubmission {
                status: StatusCode::BAD_REQUEST,
                outcome: SubmissionOutcome::Errors(errors),
                submitted,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use signup_rs_forms::{signup_schema, FieldValue};

    #[derive(Default)]
    struct RecordingSink {
        accepted: Mutex<Vec<FormValues>>,
    }

    impl SubmissionSink for RecordingSink {
        fn accept(&self, data: &FormValues) {
            self.accepted.lock().unwrap().push(data.clone());
        }
    }

    #[test]
    fn test_valid_submission_is_accepted() {
        let sink = RecordingSink::default();
        let form = QueryDict::parse("name=Al&email=al%40x.com&age=18");
        let handled = handle_submission(signup_schema(), &sink, &form);

        assert_eq!(handled.status, StatusCode::OK);
        assert_eq!(handled.outcome, SubmissionOutcome::Success);
        let accepted = sink.accepted.lock().unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].get("age"), Some(&FieldValue::Number(18.0)));
    }

    #[test]
    fn test_invalid_submission_is_not_accepted() {
        let sink = RecordingSink::default();
        let form = QueryDict::parse("name=Alice&email=a%40b.com&age=17");
        let handled = handle_submission(signup_schema(), &sink, &form);

        assert_eq!(handled.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            handled.outcome.errors().unwrap()["age"],
            "You must be at least 18 to create an account"
        );
        assert!(sink.accepted.lock().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_body_is_an_ordinary_rejection() {
        let form = QueryDict::parse("%%%&&=&age=abc");
        let handled = handle_submission(signup_schema(), &TracingSink, &form);
        let errors = handled.outcome.errors().unwrap();
        assert_eq!(handled.status, StatusCode::BAD_REQUEST);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["name"], "Required");
        assert_eq!(errors["age"], "Expected number, received nan");
    }

    #[test]
    fn test_submitted_values_are_kept_as_text() {
        let form = QueryDict::parse("name=A&email=&age=17");
        let handled = handle_submission(signup_schema(), &TracingSink, &form);
        assert_eq!(handled.submitted.get("age"), Some(&FieldValue::from("17")));
    }

    #[test]
    fn test_tracing_sink_does_not_panic_on_missing_fields() {
        TracingSink.accept(&FormValues::new());
    }
}
