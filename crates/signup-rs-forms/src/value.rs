//! Field values.
//!
//! A [`FieldValue`] is either text or a number. [`FormValues`] maps field
//! names to values and is used both for raw input (anything the user or the
//! transport produced) and for cleaned data (values coerced to their declared
//! kind).

use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field-keyed error messages, one message per failing field.
pub type FieldErrors = HashMap<String, String>;

/// A single field value.
///
/// Serialized untagged, so text becomes a JSON string and numbers a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A text value.
    Text(String),
    /// A numeric value.
    Number(f64),
}

impl FieldValue {
    /// Returns the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Returns the number, if this is a numeric value.
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Formats the value the way it is written into a form submission.
    ///
    /// Whole numbers are written without a fractional part (`18`, not `18.0`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

/// A mapping from field name to value.
///
/// # Examples
///
/// ```
/// use signup_rs_forms::value::{FieldValue, FormValues};
///
/// let values = FormValues::new()
///     .with("name", "Al")
///     .with("email", "al@x.com")
///     .with("age", 18);
/// assert_eq!(values.get("age"), Some(&FieldValue::Number(18.0)));
/// assert_eq!(values.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: HashMap<String, FieldValue>,
}

impl FormValues {
    /// Creates an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the value for a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Sets the value for a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Removes the value for a field.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.values.remove(name)
    }

    /// Returns `true` if the field has a value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of fields with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no field has a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, FieldValue> {
        self.values.iter()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FormValues {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = hash_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
