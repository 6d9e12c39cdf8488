use serde::Serialize;

/// One metadata entry after parsing, and after stripping if requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEntry {
    pub key: String,
    pub value: String,
}

impl TagEntry {
    /// Parse a serialized `KEY=VALUE` entry into an owned tag.
    ///
    /// Returns `None` for entries [`split_tag`] rejects.
    pub fn parse(raw: &str) -> Option<Self> {
        let (key, value) = split_tag(raw)?;
        Some(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Remove every occurrence of `pattern` from the key.
    pub fn strip_key(&mut self, pattern: &str) {
        strip_pattern(&mut self.key, pattern);
    }
}

/// Split a serialized `KEY=VALUE` entry at its first `=`.
///
/// The value is everything after the first `=`, further `=` characters
/// included. No whitespace is trimmed. An entry without `=`, or with an
/// empty key, yields `None`.
///
/// ```rust
/// use gtiff_metadata::metadata::split_tag;
///
/// assert_eq!(split_tag("A=B=C"), Some(("A", "B=C")));
/// assert_eq!(split_tag("Malformed"), None);
/// ```
pub fn split_tag(raw: &str) -> Option<(&str, &str)> {
    let (key, value) = raw.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Remove all occurrences of a literal `pattern` from `key`, in place.
///
/// Each pass searches from the start of the already shortened key, so an
/// occurrence formed by joining the text around a removal is removed too.
/// An empty pattern leaves the key untouched.
///
/// ```rust
/// use gtiff_metadata::metadata::strip_pattern;
///
/// let mut key = String::from("EXIF_EXIF_Model");
/// strip_pattern(&mut key, "EXIF_");
/// assert_eq!(key, "Model");
/// ```
pub fn strip_pattern(key: &mut String, pattern: &str) {
    if pattern.is_empty() {
        return;
    }
    while let Some(pos) = key.find(pattern) {
        key.replace_range(pos..pos + pattern.len(), "");
    }
}
