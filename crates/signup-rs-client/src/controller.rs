//! The client-side form controller.
//!
//! [`FormController`] owns the current [`FormValues`] and a mirrored error
//! mapping. It validates single fields locally, encodes submissions and
//! reconciles the server's answer.
//!
//! ```text
//! Idle --submit--> Submitting --success--> Idle (values reset)
//!                      |------errors-----> ErrorsShown --edit--> Idle
//!                      `-----failure-----> Failed      --edit--> Idle
//! ```

use std::sync::Arc;
use std::time::Duration;

use signup_rs_core::{SignupError, SignupResult};
use signup_rs_forms::{signup_schema, FieldErrors, FieldValue, FormValues, Schema, SubmissionOutcome};
use signup_rs_http::QueryDict;

use crate::submission::{PendingSubmission, SubmissionEvent, SubmitFailure};
use crate::transport::Transport;

/// Where the controller is in a submission cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Editable, nothing in flight.
    Idle,
    /// A submission is awaiting its outcome.
    Submitting,
    /// The last submission was rejected; errors are shown.
    ErrorsShown,
    /// The last submission produced no outcome.
    Failed,
}

/// Client-side owner of one form instance.
///
/// # Examples
///
/// ```
/// use signup_rs_client::{FormController, FormState};
///
/// let mut form = FormController::signup();
/// form.set_field("name", "A").unwrap();
/// assert!(!form.validate_field("name").unwrap());
/// assert_eq!(form.errors()["name"], "Name should have at least 2 letters");
///
/// let pending = form.submit().unwrap();
/// assert_eq!(form.state(), FormState::Submitting);
/// assert!(pending.body().contains("name=A"));
/// ```
#[derive(Debug, Clone)]
pub struct FormController {
    schema: Arc<Schema>,
    values: FormValues,
    errors: FieldErrors,
    state: FormState,
    next_sequence: u64,
    in_flight: Option<u64>,
    last_failure: Option<SubmitFailure>,
}

impl FormController {
    /// Creates a controller holding the schema's default values.
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            values: schema.defaults(),
            schema,
            errors: FieldErrors::new(),
            state: FormState::Idle,
            next_sequence: 1,
            in_flight: None,
            last_failure: None,
        }
    }

    /// Creates a controller for [`signup_schema`].
    pub fn signup() -> Self {
        Self::new(Arc::new(signup_schema().clone()))
    }

    /// Returns the current values.
    pub const fn values(&self) -> &FormValues {
        &self.values
    }

    /// Returns the current error mapping.
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Returns the current state.
    pub const fn state(&self) -> FormState {
        self.state
    }

    /// Returns the failure of the last submission, if it failed.
    pub const fn last_failure(&self) -> Option<&SubmitFailure> {
        self.last_failure.as_ref()
    }

    /// Updates one field. Does not validate.
    ///
    /// Editing after a rejection or a failure returns the form to `Idle`.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> SignupResult<()> {
        if !self.schema.contains(name) {
            return Err(SignupError::UnknownField(name.to_string()));
        }
        self.values.set(name, value);
        if matches!(self.state, FormState::ErrorsShown | FormState::Failed) {
            self.state = FormState::Idle;
        }
        Ok(())
    }

    /// Validates one field and updates only that field's error. Returns
    /// `true` if the field is valid.
    ///
    /// The field is checked as it will be sent, so a number typed into a
    /// text field is judged as its text, exactly as the server will see it.
    pub fn validate_field(&mut self, name: &str) -> SignupResult<bool> {
        if !self.schema.contains(name) {
            return Err(SignupError::UnknownField(name.to_string()));
        }
        match self.schema.validate_field(name, &self.encoded().to_form_values()) {
            Ok(_) => {
                self.errors.remove(name);
                Ok(true)
            }
            Err(err) => {
                self.errors.insert(err.field, err.message);
                Ok(false)
            }
        }
    }

    /// Sets the error message shown for a field.
    pub fn set_error(&mut self, name: &str, message: impl Into<String>) -> SignupResult<()> {
        if !self.schema.contains(name) {
            return Err(SignupError::UnknownField(name.to_string()));
        }
        self.errors.insert(name.to_string(), message.into());
        Ok(())
    }

    /// Restores default values, clears every error and returns to `Idle`.
    ///
    /// An in-flight submission is forgotten; its event will be ignored.
    pub fn reset(&mut self) {
        self.values = self.schema.defaults();
        self.errors.clear();
        self.state = FormState::Idle;
        self.in_flight = None;
        self.last_failure = None;
    }

    /// Encodes the current values for sending and enters `Submitting`.
    ///
    /// No local validation happens here; the server decides.
    pub fn submit(&mut self) -> SignupResult<PendingSubmission> {
        if self.state == FormState::Submitting {
            return Err(SignupError::SubmissionInFlight);
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.in_flight = Some(sequence);
        self.state = FormState::Submitting;
        self.last_failure = None;

        let body = self.encoded().urlencode();
        tracing::debug!(sequence, "submission started");
        Ok(PendingSubmission::new(sequence, body))
    }

    /// Applies a submission event. Returns `false` if the event does not
    /// answer the submission in flight and was ignored.
    pub fn reconcile(&mut self, event: SubmissionEvent) -> bool {
        if self.in_flight != Some(event.sequence()) {
            tracing::debug!(
                sequence = event.sequence(),
                in_flight = ?self.in_flight,
                "ignoring stale submission event"
            );
            return false;
        }
        self.in_flight = None;

        match event.into_result() {
            Ok(SubmissionOutcome::Success) => {
                self.values = self.schema.defaults();
                self.errors.clear();
                self.state = FormState::Idle;
            }
            Ok(SubmissionOutcome::Errors(errors)) => {
                let unknown = errors
                    .keys()
                    .find(|k| !self.schema.contains(k.as_str()))
                    .cloned();
                if let Some(unknown) = unknown {
                    let failure = SubmitFailure::BadResponse(format!(
                        "error reported for undeclared field `{unknown}`"
                    ));
                    tracing::warn!(%failure, "rejecting submission outcome");
                    self.last_failure = Some(failure);
                    self.state = FormState::Failed;
                } else {
                    self.errors = errors;
                    self.state = FormState::ErrorsShown;
                }
            }
            Err(failure) => {
                self.last_failure = Some(failure);
                self.state = FormState::Failed;
            }
        }
        true
    }

    /// Submits through `transport`, waits at most `timeout`, and reconciles.
    pub async fn submit_with(
        &mut self,
        transport: &dyn Transport,
        timeout: Duration,
    ) -> SignupResult<FormState> {
        let pending = self.submit()?;
        let event = pending.send(transport, timeout).await;
        self.reconcile(event);
        Ok(self.state)
    }

    fn encoded(&self) -> QueryDict {
        QueryDict::from_form_values(&self.values)
    }
}
