//! Field declarations and constraints.
//!
//! A [`Schema`] is an ordered list of [`FieldSpec`]s. Each field has a
//! [`FieldKind`], presentation metadata, an initial value, and an ordered list
//! of [`Constraint`]s pairing a [`Check`] with the message shown when it fails.
//!
//! [`signup_schema`] returns the process-wide signup form declaration used
//! by both the server and the client.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use signup_rs_core::SignupError;

use crate::value::{FieldValue, FormValues};
use crate::widgets::WidgetType;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_+\-]+\.?)*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("valid regex")
});

static SIGNUP_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new(vec![
        FieldSpec::new("name", FieldKind::Text)
            .label("Name")
            .placeholder("John Doe")
            .initial("")
            .constraint(Check::MinLength(2), "Name should have at least 2 letters"),
        FieldSpec::new("email", FieldKind::Text)
            .label("Email")
            .placeholder("example@mail.com")
            .widget(WidgetType::EmailInput)
            .initial("")
            .constraint(Check::Email, "Invalid email"),
        FieldSpec::new("age", FieldKind::Number)
            .label("Age")
            .placeholder("Your age")
            .initial(18)
            .constraint(Check::MinValue(18.0), "You must be at least 18 to create an account"),
    ])
    .and_then(|schema| schema.with_layout(&["email", "name", "age"]))
    .expect("signup schema is well-formed")
});

/// Returns the signup form schema: `name`, `email`, and `age`.
///
/// The schema is built once and shared; callers on both sides of the
/// transport validate against this same instance.
pub fn signup_schema() -> &'static Schema {
    &SIGNUP_SCHEMA
}

/// The kind of value a field holds once cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string.
    Text,
    /// A finite floating-point number.
    Number,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("string"),
            Self::Number => f.write_str("number"),
        }
    }
}

/// A predicate over a cleaned field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Text with at least this many characters.
    MinLength(usize),
    /// Text with at most this many characters.
    MaxLength(usize),
    /// A number greater than or equal to this bound.
    MinValue(f64),
    /// A number less than or equal to this bound.
    MaxValue(f64),
    /// Text shaped like an email address.
    Email,
}

impl Check {
    /// Returns the field kind this check applies to.
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::MinLength(_) | Self::MaxLength(_) | Self::Email => FieldKind::Text,
            Self::MinValue(_) | Self::MaxValue(_) => FieldKind::Number,
        }
    }

    /// Returns the error code reported when this check fails.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MinLength(_) => "min_length",
            Self::MaxLength(_) => "max_length",
            Self::MinValue(_) => "min_value",
            Self::MaxValue(_) => "max_value",
            Self::Email => "invalid_email",
        }
    }

    /// Evaluates the check. A value of the wrong kind never satisfies it.
    pub fn is_satisfied_by(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Self::MinLength(min), FieldValue::Text(s)) => s.chars().count() >= *min,
            (Self::MaxLength(max), FieldValue::Text(s)) => s.chars().count() <= *max,
            (Self::Email, FieldValue::Text(s)) => EMAIL_RE.is_match(s),
            (Self::MinValue(min), FieldValue::Number(n)) => n >= min,
            (Self::MaxValue(max), FieldValue::Number(n)) => n <= max,
            _ => false,
        }
    }
}

/// A check paired with the message shown when it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// The predicate.
    pub check: Check,
    /// The user-facing failure message.
    pub message: String,
}

/// Declaration of one form field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// The field name (HTML name attribute and error key).
    pub name: String,
    /// The kind of the cleaned value.
    pub kind: FieldKind,
    /// Human-readable label.
    pub label: String,
    /// Placeholder text for the input.
    pub placeholder: String,
    /// The value the field holds when the form is mounted or reset.
    pub initial: FieldValue,
    /// The widget used to render the field.
    pub widget: WidgetType,
    /// Constraints, evaluated in order.
    pub constraints: Vec<Constraint>,
}

impl FieldSpec {
    /// Creates a field with no constraints.
    ///
    /// The label defaults to the name, the widget to the default for the
    /// kind, and the initial value to an empty string or zero.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        let label = name.replace('_', " ");
        let (widget, initial) = match kind {
            FieldKind::Text => (WidgetType::TextInput, FieldValue::Text(String::new())),
            FieldKind::Number => (WidgetType::NumberInput, FieldValue::Number(0.0)),
        };
        Self {
            name,
            kind,
            label,
            placeholder: String::new(),
            initial,
            widget,
            constraints: Vec::new(),
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<FieldValue>) -> Self {
        self.initial = value.into();
        self
    }

    /// Sets the widget type.
    #[must_use]
    pub fn widget(mut self, widget: WidgetType) -> Self {
        self.widget = widget;
        self
    }

    /// Appends a constraint.
    #[must_use]
    pub fn constraint(mut self, check: Check, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint {
            check,
            message: message.into(),
        });
        self
    }
}

/// An ordered set of field declarations.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    layout: Vec<usize>,
}

impl Schema {
    /// Creates a schema from fields in validation order.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::ConfigurationError`] if two fields share a name,
    /// a constraint does not apply to its field's kind, or an initial value
    /// has the wrong kind.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, SignupError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SignupError::ConfigurationError(format!(
                    "duplicate field '{}'",
                    field.name
                )));
            }
            if let Some(c) = field.constraints.iter().find(|c| c.check.kind() != field.kind) {
                return Err(SignupError::ConfigurationError(format!(
                    "constraint {:?} does not apply to {} field '{}'",
                    c.check, field.kind, field.name
                )));
            }
            let initial_kind = match field.initial {
                FieldValue::Text(_) => FieldKind::Text,
                FieldValue::Number(_) => FieldKind::Number,
            };
            if initial_kind != field.kind {
                return Err(SignupError::ConfigurationError(format!(
                    "initial value of '{}' is not a {}",
                    field.name, field.kind
                )));
            }
        }
        let layout = (0..fields.len()).collect();
        Ok(Self { fields, layout })
    }

    /// Sets the order in which fields are displayed.
    ///
    /// Fields not named keep their declaration order after the named ones.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::UnknownField`] for a name the schema does not declare.
    pub fn with_layout(mut self, order: &[&str]) -> Result<Self, SignupError> {
        let mut layout = Vec::with_capacity(self.fields.len());
        for name in order {
            let idx = self
                .position(name)
                .ok_or_else(|| SignupError::UnknownField((*name).to_string()))?;
            if !layout.contains(&idx) {
                layout.push(idx);
            }
        }
        for idx in 0..self.fields.len() {
            if !layout.contains(&idx) {
                layout.push(idx);
            }
        }
        self.layout = layout;
        Ok(self)
    }

    /// Returns the fields in validation (declaration) order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Iterates over the fields in display order.
    pub fn layout(&self) -> impl Iterator<Item = &FieldSpec> {
        self.layout.iter().map(|&idx| &self.fields[idx])
    }

    /// Returns the declaration of a field.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns `true` if the schema declares the field.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the initial values of every field.
    pub fn defaults(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.initial.clone()))
            .collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}
