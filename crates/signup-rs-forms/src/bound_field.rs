//! Bound fields: a field declaration paired with its current value and error.
//!
//! A [`BoundField`] is what the page renderer iterates over. It knows how to
//! render the label, the input, and the message shown beneath the input.

use std::collections::BTreeMap;

use crate::schema::FieldSpec;
use crate::value::FieldValue;
use crate::widgets::escape_html;

/// A field declaration bound to its current value and error message.
#[derive(Debug, Clone)]
pub struct BoundField<'a> {
    /// The field declaration.
    pub field: &'a FieldSpec,
    /// The value currently held by the form, if any.
    pub value: Option<&'a FieldValue>,
    /// The error message currently shown for the field, if any.
    pub error: Option<&'a str>,
}

impl<'a> BoundField<'a> {
    /// Binds a field to a value and an error.
    pub const fn new(
        field: &'a FieldSpec,
        value: Option<&'a FieldValue>,
        error: Option<&'a str>,
    ) -> Self {
        Self {
            field,
            value,
            error,
        }
    }

    /// Returns the HTML `id` of the input.
    pub fn auto_id(&self) -> String {
        format!("id_{}", self.field.name)
    }

    /// Returns `true` if an error is shown for this field.
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Renders the `<input>` element.
    pub fn render(&self) -> String {
        let mut attrs = BTreeMap::new();
        attrs.insert("id".to_string(), self.auto_id());
        attrs.insert("required".to_string(), String::new());
        if !self.field.placeholder.is_empty() {
            attrs.insert("placeholder".to_string(), self.field.placeholder.clone());
        }
        if self.has_error() {
            attrs.insert("aria-invalid".to_string(), "true".to_string());
            attrs.insert("aria-describedby".to_string(), self.error_id());
        }
        let value = self.value.map(ToString::to_string).unwrap_or_default();
        self.field.widget.render(&self.field.name, &value, &attrs)
    }

    /// Renders the `<label>` element.
    pub fn label_tag(&self) -> String {
        format!(
            r#"<label for="{}">{}</label>"#,
            self.auto_id(),
            escape_html(&self.field.label)
        )
    }

    /// Renders the error message, or an empty string when there is none.
    pub fn error_tag(&self) -> String {
        self.error.map_or_else(String::new, |message| {
            format!(
                r#"<p class="error" id="{}">{}</p>"#,
                self.error_id(),
                escape_html(message)
            )
        })
    }

    fn error_id(&self) -> String {
        format!("{}_error", self.auto_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::signup_schema;

    #[test]
    fn test_render_with_value() {
        let field = signup_schema().field("name").unwrap();
        let value = FieldValue::from("Alice");
        let bf = BoundField::new(field, Some(&value), None);
        let html = bf.render();
        assert!(html.contains(r#"type="text""#));
        assert!(html.contains(r#"name="name""#));
        assert!(html.contains(r#"value="Alice""#));
        assert!(html.contains(r#"id="id_name""#));
        assert!(html.contains(r#"placeholder="John Doe""#));
        assert!(!html.contains("aria-invalid"));
    }

    #[test]
    fn test_render_number_value() {
        let field = signup_schema().field("age").unwrap();
        let value = FieldValue::Number(18.0);
        let html = BoundField::new(field, Some(&value), None).render();
        assert!(html.contains(r#"value="18""#));
    }

    #[test]
    fn test_render_without_value() {
        let field = signup_schema().field("email").unwrap();
        let html = BoundField::new(field, None, None).render();
        assert!(html.contains(r#"value="""#));
        assert!(html.contains(r#"type="email""#));
    }

    #[test]
    fn test_label_tag() {
        let field = signup_schema().field("email").unwrap();
        let bf = BoundField::new(field, None, None);
        assert_eq!(bf.label_tag(), r#"<label for="id_email">Email</label>"#);
    }

    #[test]
    fn test_error_tag() {
        let field = signup_schema().field("email").unwrap();
        let bf = BoundField::new(field, None, Some("Invalid email"));
        assert!(bf.has_error());
        assert_eq!(
            bf.error_tag(),
            r#"<p class="error" id="id_email_error">Invalid email</p>"#
        );
        assert!(bf.render().contains(r#"aria-describedby="id_email_error""#));
    }

    #[test]
    fn test_error_tag_empty() {
        let field = signup_schema().field("email").unwrap();
        assert_eq!(BoundField::new(field, None, None).error_tag(), "");
    }
}
