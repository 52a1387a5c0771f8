//! Catalog header (entry 0) metadata.
//!
//! The header is a block of `Key: value` lines, for example:
//!
//! ```text
//! Project-Id-Version: demo 1.0
//! Content-Type: text/plain; charset=UTF-8
//! Plural-Forms: nplurals=3; plural=n==1 ? 0 : n%10>=2 && n%10<=4 ? 1 : 2;
//! ```

const PLURAL_FORMS: &str = "Plural-Forms:";
const PLURAL_MARKER: &str = "plural=";
const NPLURALS_MARKER: &str = "nplurals=";
const CHARSET_MARKER: &str = "charset=";

/// Parsed `Key: value` lines of a catalog header, in file order.
///
/// # Examples
///
/// ```
/// use motext_catalog::header::Metadata;
///
/// let meta = Metadata::parse("Language: pl\nContent-Type: text/plain; charset=UTF-8\n");
/// assert_eq!(meta.get("language"), Some("pl"));
/// assert_eq!(meta.charset(), Some("UTF-8"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Parses header text. Lines without a `:` are skipped.
    pub fn parse(header: &str) -> Self {
        let entries = header
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { entries }
    }

    /// Returns the value of the first line whose key matches `key`, ignoring
    /// ASCII case.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(key, value)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parsed lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no lines were parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `charset=` parameter of `Content-Type`.
    pub fn charset(&self) -> Option<&str> {
        let content_type = self.get("Content-Type")?;
        let start = content_type.find(CHARSET_MARKER)? + CHARSET_MARKER.len();
        let charset = content_type[start..]
            .split(|c: char| c == ';' || c.is_whitespace())
            .next()?;
        (!charset.is_empty()).then_some(charset)
    }

    /// The `nplurals=` parameter of `Plural-Forms`.
    pub fn plural_count(&self) -> Option<usize> {
        let forms = self.get("Plural-Forms")?;
        let start = forms.find(NPLURALS_MARKER)? + NPLURALS_MARKER.len();
        let digits: &str = &forms[start..];
        let len = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        digits[..len].parse().ok()
    }
}

/// Finds the plural expression source in raw header text.
///
/// Looks for the first line starting with `Plural-Forms:`, then takes the text
/// after `plural=` up to the first `;`, newline or carriage return.
///
/// ```
/// use motext_catalog::header::plural_expression;
///
/// let header = "Plural-Forms: nplurals=2; plural=n != 1;\n";
/// assert_eq!(plural_expression(header), Some("n != 1"));
/// assert_eq!(plural_expression("Language: de\n"), None);
/// ```
pub fn plural_expression(header: &str) -> Option<&str> {
    let line = header
        .split('\n')
        .find(|line| line.starts_with(PLURAL_FORMS))?;
    let start = line.find(PLURAL_MARKER)? + PLURAL_MARKER.len();
    let rest = &line[start..];
    let end = rest
        .find(|c: char| matches!(c, ';' | '\n' | '\r'))
        .unwrap_or(rest.len());
    Some(&rest[..end])
}
