//! Form-encoded bodies (`application/x-www-form-urlencoded`).
//!
//! [`QueryDict`] is the transport-level shape of a submission: an ordered list
//! of string pairs. It converts to and from [`FormValues`] at the boundary.

use signup_rs_forms::FormValues;

/// An ordered, multi-valued dictionary of form-encoded pairs.
///
/// # Examples
///
/// ```
/// use signup_rs_http::QueryDict;
///
/// let qd = QueryDict::parse("name=Jo+Ann&email=jo%40x.com&age=18&age=19");
/// assert_eq!(qd.get("name"), Some("Jo Ann"));
/// assert_eq!(qd.get("email"), Some("jo@x.com"));
/// assert_eq!(qd.get("age"), Some("19"));
/// assert_eq!(qd.get_list("age"), vec!["18", "19"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDict {
    pairs: Vec<(String, String)>,
}

impl QueryDict {
    /// Creates an empty `QueryDict`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a form-encoded string (e.g. `"key1=val1&key2=val2"`).
    ///
    /// `+` decodes to a space and percent sequences are decoded as UTF-8
    /// (invalid sequences are replaced). A pair without `=` has an empty value.
    pub fn parse(input: &str) -> Self {
        let pairs = input
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair
                    .find('=')
                    .map_or((pair, ""), |eq_pos| (&pair[..eq_pos], &pair[eq_pos + 1..]));
                (percent_decode(key), percent_decode(value))
            })
            .collect();
        Self { pairs }
    }

    /// Builds a `QueryDict` from form values, one pair per field.
    ///
    /// Pairs are sorted by field name so the encoding is deterministic.
    pub fn from_form_values(values: &FormValues) -> Self {
        let mut pairs: Vec<(String, String)> = values
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();
        pairs.sort();
        Self { pairs }
    }

    /// Returns the last value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for `key`, in order.
    pub fn get_list(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Appends a pair.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encodes the pairs in order, percent-encoding keys and values.
    pub fn urlencode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Converts to raw form values. Every value is text; for repeated keys
    /// the last value wins.
    pub fn to_form_values(&self) -> FormValues {
        self.pairs
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

fn percent_decode(input: &str) -> String {
    let plus_decoded = input.replace('+', " ");
    percent_encoding::percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}

fn percent_encode(input: &str) -> String {
    percent_encoding::utf8_percent_encode(input, percent_encoding::NON_ALPHANUMERIC).to_string()
}
