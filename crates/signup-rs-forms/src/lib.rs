//! # signup-rs-forms
//!
//! The validation contract shared by the signup-rs server and client. Both
//! sides build on the same [`Schema`], so they can never disagree about what
//! a valid submission is.
//!
//! ## Modules
//!
//! - [`value`] - Raw and cleaned field values
//! - [`schema`] - Field declarations and constraints, including [`signup_schema`]
//! - [`validation`] - Whole-form and single-field validation
//! - [`outcome`] - The submission outcome exchanged across the transport boundary
//! - [`widgets`] / [`bound_field`] / [`page`] - HTML rendering of the form

pub mod bound_field;
pub mod outcome;
pub mod page;
pub mod schema;
pub mod validation;
pub mod value;
pub mod widgets;

pub use outcome::SubmissionOutcome;
pub use schema::{signup_schema, Check, Constraint, FieldKind, FieldSpec, Schema};
pub use validation::ValidationResult;
pub use value::{FieldErrors, FieldValue, FormValues};
