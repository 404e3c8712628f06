//! Whole-form and single-field validation.
//!
//! Validation runs in two steps per field:
//! 1. Coercion of the raw value to the field's declared kind (numeric text is
//!    parsed for number fields; a missing value is a `required` failure)
//! 2. The field's constraints, in order; only the first failure is reported
//!
//! Errors accumulate across fields, so every failing field is reported at
//! once. Validation is pure: no I/O and no shared mutable state.

use signup_rs_core::ValidationError;

use crate::schema::{FieldKind, FieldSpec, Schema};
use crate::value::{FieldErrors, FieldValue, FormValues};

/// The outcome of validating a full set of values.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Every constraint is satisfied. `data` holds every declared field,
    /// coerced to its declared kind.
    Valid {
        /// The cleaned values.
        data: FormValues,
    },
    /// At least one field failed. Each failing field appears once, with the
    /// message of its first failing check.
    Invalid {
        /// Messages keyed by field name.
        errors: FieldErrors,
    },
}

impl ValidationResult {
    /// Returns `true` for [`ValidationResult::Valid`].
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Returns the error mapping of an invalid result.
    pub const fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid { errors } => Some(errors),
            Self::Valid { .. } => None,
        }
    }

    /// Returns the cleaned data of a valid result.
    pub const fn data(&self) -> Option<&FormValues> {
        match self {
            Self::Valid { data } => Some(data),
            Self::Invalid { .. } => None,
        }
    }
}

/// Cleans a single raw value against its field declaration.
///
/// Returns the coerced value, or the first failure:
/// - `required` when the value is missing (or blank, for number fields)
/// - `invalid_type` when the value cannot be coerced to the declared kind
/// - the code and message of the first failing constraint
pub fn clean_field_value(
    field: &FieldSpec,
    raw: Option<&FieldValue>,
) -> Result<FieldValue, ValidationError> {
    let value = coerce(field, raw)?;

    match field
        .constraints
        .iter()
        .find(|c| !c.check.is_satisfied_by(&value))
    {
        Some(failed) => Err(ValidationError::new(
            &field.name,
            &failed.message,
            failed.check.code(),
        )),
        None => Ok(value),
    }
}

fn coerce(field: &FieldSpec, raw: Option<&FieldValue>) -> Result<FieldValue, ValidationError> {
    let Some(raw) = raw else {
        return Err(ValidationError::required(&field.name));
    };

    match (field.kind, raw) {
        (FieldKind::Text, FieldValue::Text(s)) => Ok(FieldValue::Text(s.clone())),
        (FieldKind::Text, FieldValue::Number(_)) => Err(ValidationError::new(
            &field.name,
            "Expected string, received number",
            "invalid_type",
        )),
        (FieldKind::Number, FieldValue::Number(n)) if n.is_finite() => Ok(FieldValue::Number(*n)),
        (FieldKind::Number, FieldValue::Text(s)) if s.trim().is_empty() => {
            Err(ValidationError::required(&field.name))
        }
        (FieldKind::Number, FieldValue::Text(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(FieldValue::Number(n)),
            _ => Err(not_a_number(field)),
        },
        (FieldKind::Number, FieldValue::Number(_)) => Err(not_a_number(field)),
    }
}

fn not_a_number(field: &FieldSpec) -> ValidationError {
    ValidationError::new(&field.name, "Expected number, received nan", "invalid_type")
}

impl Schema {
    /// Validates a full set of raw values.
    ///
    /// Undeclared keys in `raw` are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use signup_rs_forms::{signup_schema, FormValues};
    ///
    /// let raw = FormValues::new()
    ///     .with("name", "A")
    ///     .with("email", "al@x.com")
    ///     .with("age", 18);
    /// let result = signup_schema().validate(&raw);
    /// let errors = result.errors().unwrap();
    /// assert_eq!(errors.len(), 1);
    /// assert_eq!(errors["name"], "Name should have at least 2 letters");
    /// ```
    pub fn validate(&self, raw: &FormValues) -> ValidationResult {
        let mut data = FormValues::new();
        let failures = self.collect_failures(raw, &mut data);

        if failures.is_empty() {
            ValidationResult::Valid { data }
        } else {
            let errors = failures
                .into_iter()
                .map(|err| (err.field, err.message))
                .collect();
            ValidationResult::Invalid { errors }
        }
    }

    /// Validates a full set of raw values and returns each failure with its code.
    ///
    /// Failures are returned in declaration order.
    pub fn validation_errors(&self, raw: &FormValues) -> Vec<ValidationError> {
        self.collect_failures(raw, &mut FormValues::new())
    }

    /// Validates a single field against the current values.
    ///
    /// Other fields are neither read nor reported.
    pub fn validate_field(
        &self,
        name: &str,
        raw: &FormValues,
    ) -> Result<FieldValue, ValidationError> {
        let field = self
            .field(name)
            .ok_or_else(|| ValidationError::new(name, "Unknown field", "unknown_field"))?;
        clean_field_value(field, raw.get(name))
    }

    fn collect_failures(&self, raw: &FormValues, cleaned: &mut FormValues) -> Vec<ValidationError> {
        let mut failures = Vec::new();
        for field in self.fields() {
            match clean_field_value(field, raw.get(&field.name)) {
                Ok(value) => cleaned.set(field.name.clone(), value),
                Err(err) => failures.push(err),
            }
        }
        failures
    }
}
