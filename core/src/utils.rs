//! Utility functions and types.

use std::fmt;

/// Redact hides secrets when they are formatted with `{:?}`.
///
/// Values shorter than 12 bytes are fully masked. Longer values keep their
/// first and last three characters so that different keys can still be told
/// apart in logs.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref().unwrap_or_default())
    }
}

impl fmt::Debug for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        match s.len() {
            0 => f.write_str("EMPTY"),
            n if n < 12 || !s.is_char_boundary(3) || !s.is_char_boundary(n - 3) => {
                f.write_str("***")
            }
            n => write!(f, "{}***{}", &s[..3], &s[n - 3..]),
        }
    }
}
