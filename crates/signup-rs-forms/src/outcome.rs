//! The submission outcome returned across the transport boundary.
//!
//! On the wire an outcome is exactly one of:
//!
//! ```json
//! { "success": true }
//! { "errors": { "name": "Name should have at least 2 letters" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::validation::ValidationResult;
use crate::value::FieldErrors;

/// What the server returns for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OutcomeBody", into = "OutcomeBody")]
pub enum SubmissionOutcome {
    /// The submission was accepted.
    Success,
    /// The submission was rejected; messages keyed by field name.
    Errors(FieldErrors),
}

impl SubmissionOutcome {
    /// Returns `true` for an accepted submission.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns the error mapping of a rejected submission.
    pub const fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Errors(errors) => Some(errors),
            Self::Success => None,
        }
    }
}

impl From<ValidationResult> for SubmissionOutcome {
    fn from(result: ValidationResult) -> Self {
        match result {
            ValidationResult::Valid { .. } => Self::Success,
            ValidationResult::Invalid { errors } => Self::Errors(errors),
        }
    }
}

/// The JSON shape of an outcome: both keys optional, exactly one present.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutcomeBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

impl From<SubmissionOutcome> for OutcomeBody {
    fn from(outcome: SubmissionOutcome) -> Self {
        match outcome {
            SubmissionOutcome::Success => Self {
                success: Some(true),
                errors: None,
            },
            SubmissionOutcome::Errors(errors) => Self {
                success: None,
                errors: Some(errors),
            },
        }
    }
}

impl TryFrom<OutcomeBody> for SubmissionOutcome {
    type Error = String;

    fn try_from(body: OutcomeBody) -> Result<Self, Self::Error> {
        match (body.success, body.errors) {
            (Some(true), None) => Ok(Self::Success),
            (None, Some(errors)) => Ok(Self::Errors(errors)),
            (Some(false), None) => Err("`success` must be true when present".to_string()),
            (Some(_), Some(_)) => {
                Err("outcome must not carry both `success` and `errors`".to_string())
            }
            (None, None) => Err("outcome must carry `success` or `errors`".to_string()),
        }
    }
}
