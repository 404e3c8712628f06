//! Rendering of the complete form page.

use crate::bound_field::BoundField;
use crate::schema::Schema;
use crate::value::{FieldErrors, FormValues};

/// Renders the form page as a complete HTML document.
///
/// Fields appear in the schema's display order. Each input is followed by
/// its error message, if `errors` has one. The form posts to `action`.
///
/// # Examples
///
/// ```
/// use signup_rs_forms::page::render_form_page;
/// use signup_rs_forms::{signup_schema, FieldErrors};
///
/// let schema = signup_schema();
/// let html = render_form_page(schema, &schema.defaults(), &FieldErrors::new(), "/");
/// assert!(html.contains(r#"<form method="post" action="/">"#));
/// ```
pub fn render_form_page(
    schema: &Schema,
    values: &FormValues,
    errors: &FieldErrors,
    action: &str,
) -> String {
    let rows: String = schema
        .layout()
        .map(|field| {
            let bf = BoundField::new(
                field,
                values.get(&field.name),
                errors.get(&field.name).map(String::as_str),
            );
            format!(
                "      <div class=\"field\">\n        {}\n        {}\n        {}\n      </div>\n",
                bf.label_tag(),
                bf.render(),
                bf.error_tag()
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Create an account</title>
  </head>
  <body>
    <form method="post" action="{action}">
{rows}      <div class="actions">
        <button type="submit">Submit</button>
      </div>
    </form>
  </body>
</html>
"#,
        action = crate::widgets::escape_html(action),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::signup_schema;

    #[test]
    fn test_page_contains_all_fields_in_display_order() {
        let schema = signup_schema();
        let html = render_form_page(schema, &schema.defaults(), &FieldErrors::new(), "/");
        let email = html.find(r#"name="email""#).unwrap();
        let name = html.find(r#"name="name""#).unwrap();
        let age = html.find(r#"name="age""#).unwrap();
        assert!(email < name && name < age);
        assert!(html.contains(r#"value="18""#));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn test_page_escapes_action() {
        let schema = signup_schema();
        let html = render_form_page(
            schema,
            &schema.defaults(),
            &FieldErrors::new(),
            r#"/signup"><script>x</script>"#,
        );
        assert!(html.contains(r#"action="/signup&quot;&gt;&lt;script&gt;x&lt;/script&gt;""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_page_shows_errors_beneath_inputs() {
        let schema = signup_schema();
        let values = FormValues::new().with("name", "A").with("email", "x").with("age", "17");
        let mut errors = FieldErrors::new();
        errors.insert("name".to_string(), "Name should have at least 2 letters".to_string());
        let html = render_form_page(schema, &values, &errors, "/signup");

        let input = html.find(r#"name="name""#).unwrap();
        let message = html.find("Name should have at least 2 letters").unwrap();
        assert!(message > input);
        assert!(html.contains(r#"value="A""#));
        assert!(html.contains(r#"value="17""#));
        assert!(html.contains(r#"action="/signup""#));
        assert_eq!(html.matches(r#"class="error""#).count(), 1);
    }
}
