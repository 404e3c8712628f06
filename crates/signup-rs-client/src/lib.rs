//! # signup-rs-client
//!
//! The client side of signup-rs. A [`FormController`] holds what the user
//! typed, validates single fields with the shared schema, and reconciles
//! the server's [`SubmissionOutcome`](signup_rs_forms::SubmissionOutcome).
//!
//! ## Modules
//!
//! - [`controller`] - [`FormController`] and [`FormState`]
//! - [`submission`] - [`PendingSubmission`], [`SubmissionEvent`], timeouts and failures
//! - [`transport`] - the [`Transport`] trait and the reqwest-based [`HttpTransport`]

pub mod controller;
pub mod submission;
pub mod transport;

pub use controller::{FormController, FormState};
pub use submission::{decode_outcome, receive, PendingSubmission, SubmissionEvent, SubmitFailure};
pub use transport::{HttpTransport, Transport, TransportResponse};
