//! HTML input widgets.
//!
//! Each [`WidgetType`] renders one `<input>` element. Attribute values and
//! the current value are HTML-escaped.

use std::collections::BTreeMap;
use std::fmt;

/// The input elements the form uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetType {
    /// `<input type="text">`.
    TextInput,
    /// `<input type="email">`.
    EmailInput,
    /// `<input type="number">`.
    NumberInput,
}

impl WidgetType {
    /// Returns the value of the `type` attribute.
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::TextInput => "text",
            Self::EmailInput => "email",
            Self::NumberInput => "number",
        }
    }

    /// Renders the widget as an `<input>` element.
    ///
    /// `attrs` are emitted in key order after `type`, `name` and `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use signup_rs_forms::widgets::WidgetType;
    ///
    /// let html = WidgetType::EmailInput.render("email", "a@b.com", &BTreeMap::new());
    /// assert_eq!(html, r#"<input type="email" name="email" value="a@b.com" />"#);
    /// ```
    pub fn render(self, name: &str, value: &str, attrs: &BTreeMap<String, String>) -> String {
        format!(
            r#"<input type="{}" name="{}" value="{}"{} />"#,
            self.input_type(),
            escape_html(name),
            escape_html(value),
            render_attrs(attrs)
        )
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "TextInput",
            Self::EmailInput => "EmailInput",
            Self::NumberInput => "NumberInput",
        };
        write!(f, "{name}")
    }
}

/// Formats an attribute map as ` key="value" key2="value2"`.
///
/// An empty value renders as a bare boolean attribute (` required`).
fn render_attrs(attrs: &BTreeMap<String, String>) -> String {
    attrs
        .iter()
        .map(|(k, v)| {
            if v.is_empty() {
                format!(" {k}")
            } else {
                format!(r#" {k}="{}""#, escape_html(v))
            }
        })
        .collect()
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_types() {
        assert_eq!(WidgetType::TextInput.input_type(), "text");
        assert_eq!(WidgetType::EmailInput.input_type(), "email");
        assert_eq!(WidgetType::NumberInput.input_type(), "number");
    }

    #[test]
    fn test_render_with_attrs_sorted() {
        let mut attrs = BTreeMap::new();
        attrs.insert("placeholder".to_string(), "Your age".to_string());
        attrs.insert("id".to_string(), "id_age".to_string());
        attrs.insert("required".to_string(), String::new());
        let html = WidgetType::NumberInput.render("age", "18", &attrs);
        assert_eq!(
            html,
            r#"<input type="number" name="age" value="18" id="id_age" placeholder="Your age" required />"#
        );
    }

    #[test]
    fn test_render_escapes_value() {
        let html = WidgetType::TextInput.render("name", r#""><script>"#, &BTreeMap::new());
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b's <tag>"), "a &amp; b&#x27;s &lt;tag&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_display() {
        assert_eq!(WidgetType::EmailInput.to_string(), "EmailInput");
    }
}
