//! Submission events.
//!
//! A [`PendingSubmission`] is created by
//! [`FormController::submit`](crate::FormController::submit). Sending it
//! produces exactly one [`SubmissionEvent`], which the controller consumes
//! by value in [`reconcile`](crate::FormController::reconcile).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;

use signup_rs_core::SignupError;
use signup_rs_forms::SubmissionOutcome;

use crate::transport::{Transport, TransportResponse};

/// Why a submission produced no outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitFailure {
    /// No answer arrived within the timeout.
    #[error("submission timed out after {} ms", .0.as_millis())]
    TimedOut(Duration),
    /// The transport could not deliver the submission.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The server answered with something that is not an outcome.
    #[error("unexpected response: {0}")]
    BadResponse(String),
    /// The sending task ended without reporting.
    #[error("submission was abandoned")]
    Abandoned,
}

impl From<SubmitFailure> for SignupError {
    fn from(failure: SubmitFailure) -> Self {
        match failure {
            SubmitFailure::TimedOut(after) => {
                Self::Timeout(u64::try_from(after.as_millis()).unwrap_or(u64::MAX))
            }
            SubmitFailure::Transport(msg) | SubmitFailure::BadResponse(msg) => {
                Self::TransportError(msg)
            }
            abandoned @ SubmitFailure::Abandoned => Self::InternalServerError(abandoned.to_string()),
        }
    }
}

/// The single result of one submission.
///
/// Not `Clone`; an event can be reconciled at most once.
#[derive(Debug)]
pub struct SubmissionEvent {
    sequence: u64,
    result: Result<SubmissionOutcome, SubmitFailure>,
}

impl SubmissionEvent {
    /// Creates an event for submission `sequence`.
    pub const fn new(sequence: u64, result: Result<SubmissionOutcome, SubmitFailure>) -> Self {
        Self { sequence, result }
    }

    /// Returns the sequence number of the submission this event answers.
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the outcome or failure.
    pub const fn result(&self) -> &Result<SubmissionOutcome, SubmitFailure> {
        &self.result
    }

    pub(crate) fn into_result(self) -> Result<SubmissionOutcome, SubmitFailure> {
        self.result
    }
}

/// An encoded submission waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    sequence: u64,
    body: String,
}

impl PendingSubmission {
    pub(crate) const fn new(sequence: u64, body: String) -> Self {
        Self { sequence, body }
    }

    /// Returns the sequence number.
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the form-encoded body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Sends the submission and waits at most `timeout` for the answer.
    pub async fn send(self, transport: &dyn Transport, timeout: Duration) -> SubmissionEvent {
        let result = match tokio::time::timeout(timeout, transport.send(self.body)).await {
            Err(_) => Err(SubmitFailure::TimedOut(timeout)),
            Ok(Err(e)) => Err(SubmitFailure::Transport(e.to_string())),
            Ok(Ok(response)) => decode_outcome(&response),
        };
        if let Err(failure) = &result {
            tracing::warn!(sequence = self.sequence, %failure, "submission failed");
        }
        SubmissionEvent::new(self.sequence, result)
    }

    /// Sends the submission on a spawned task.
    ///
    /// The returned receiver yields the event once. If the task is dropped
    /// before finishing, the receiver reports a closed channel; use
    /// [`receive`] to turn that into [`SubmitFailure::Abandoned`].
    pub fn dispatch(
        self,
        transport: Arc<dyn Transport>,
        timeout: Duration,
    ) -> oneshot::Receiver<SubmissionEvent> {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let event = self.send(transport.as_ref(), timeout).await;
            if tx.send(event).is_err() {
                tracing::debug!("submission receiver dropped before the outcome arrived");
            }
        });
        rx
    }
}

/// Waits for a dispatched submission's event.
pub async fn receive(sequence: u64, rx: oneshot::Receiver<SubmissionEvent>) -> SubmissionEvent {
    rx.await
        .unwrap_or_else(|_| SubmissionEvent::new(sequence, Err(SubmitFailure::Abandoned)))
}

/// Decodes a transport response into an outcome.
///
/// `200` must carry `{"success": true}` and `400` must carry `{"errors": ...}`.
/// Anything else is a [`SubmitFailure::BadResponse`].
pub fn decode_outcome(response: &TransportResponse) -> Result<SubmissionOutcome, SubmitFailure> {
    let outcome: SubmissionOutcome = serde_json::from_str(&response.body).map_err(|e| {
        SubmitFailure::BadResponse(format!("status {}: undecodable body: {e}", response.status))
    })?;

    match (response.status, &outcome) {
        (200, SubmissionOutcome::Success) | (400, SubmissionOutcome::Errors(_)) => Ok(outcome),
        (status, _) => Err(SubmitFailure::BadResponse(format!(
            "status {status} does not match the outcome"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct Fixed(TransportResponse);

    #[async_trait]
    impl Transport for Fixed {
        async fn send(&self, _body: String) -> Result<TransportResponse, SignupError> {
            Ok(self.0.clone())
        }
    }

    struct Hanging;

    #[async_trait]
    impl Transport for Hanging {
        async fn send(&self, _body: String) -> Result<TransportResponse, SignupError> {
            std::future::pending().await
        }
    }

    struct Broken;

    #[async_trait]
    impl Transport for Broken {
        async fn send(&self, _body: String) -> Result<TransportResponse, SignupError> {
            Err(SignupError::TransportError("connection reset".into()))
        }
    }

    #[test]
    fn test_decode_success() {
        let response = TransportResponse::new(200, r#"{"success":true}"#);
        assert_eq!(decode_outcome(&response), Ok(SubmissionOutcome::Success));
    }

    #[test]
    fn test_decode_errors() {
        let response = TransportResponse::new(400, r#"{"errors":{"age":"Required"}}"#);
        let outcome = decode_outcome(&response).unwrap();
        assert_eq!(outcome.errors().unwrap()["age"], "Required");
    }

    #[test]
    fn test_decode_mismatched_status() {
        let response = TransportResponse::new(500, r#"{"success":true}"#);
        assert!(matches!(
            decode_outcome(&response),
            Err(SubmitFailure::BadResponse(_))
        ));
        let response = TransportResponse::new(200, r#"{"errors":{}}"#);
        assert!(decode_outcome(&response).is_err());
    }

    #[test]
    fn test_decode_garbage() {
        let response = TransportResponse::new(413, "Payload too large");
        assert!(matches!(
            decode_outcome(&response),
            Err(SubmitFailure::BadResponse(_))
        ));
    }

    #[test]
    fn test_failure_into_signup_error() {
        let err = SignupError::from(SubmitFailure::TimedOut(Duration::from_millis(250)));
        assert!(matches!(err, SignupError::Timeout(250)));
        let err = SignupError::from(SubmitFailure::BadResponse("x".into()));
        assert_eq!(err.status_code(), 502);
    }

    #[tokio::test]
    async fn test_send_times_out() {
        let pending = PendingSubmission::new(1, String::new());
        let event = pending.send(&Hanging, Duration::from_millis(20)).await;
        assert_eq!(event.sequence(), 1);
        assert_eq!(
            event.result(),
            &Err(SubmitFailure::TimedOut(Duration::from_millis(20)))
        );
    }

    #[tokio::test]
    async fn test_send_transport_error() {
        let event = PendingSubmission::new(3, String::new())
            .send(&Broken, Duration::from_secs(1))
            .await;
        assert!(matches!(event.result(), Err(SubmitFailure::Transport(_))));
    }

    #[tokio::test]
    async fn test_dispatch_delivers_one_event() {
        let transport: Arc<dyn Transport> =
            Arc::new(Fixed(TransportResponse::new(200, r#"{"success":true}"#)));
        let rx = PendingSubmission::new(7, String::new()).dispatch(transport, Duration::from_secs(1));
        let event = receive(7, rx).await;
        assert_eq!(event.sequence(), 7);
        assert_eq!(event.into_result(), Ok(SubmissionOutcome::Success));
    }

    #[tokio::test]
    async fn test_receive_closed_channel_is_abandoned() {
        let (tx, rx) = oneshot::channel::<SubmissionEvent>();
        drop(tx);
        let event = receive(4, rx).await;
        assert_eq!(event.result(), &Err(SubmitFailure::Abandoned));
    }
}
