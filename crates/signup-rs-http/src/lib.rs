//! # signup-rs-http
//!
//! The server side of signup-rs: the form-encoded body codec, HTTP
//! responses, the submission handler, and the axum application.
//!
//! ## Modules
//!
//! - [`querydict`] - [`QueryDict`] for `application/x-www-form-urlencoded` bodies
//! - [`response`] - [`HttpResponse`] and its conversion into axum responses
//! - [`handler`] - [`handle_submission`] and the [`SubmissionSink`] seam
//! - [`server`] - [`SignupApp`], the router and server entry points

pub mod handler;
pub mod querydict;
pub mod response;
pub mod server;

pub use handler::{handle_submission, HandledSubmission, SubmissionSink, TracingSink};
pub use querydict::QueryDict;
pub use response::HttpResponse;
pub use server::SignupApp;
