//! Glob patterns for key enumeration.
//!
//! Only `*` is a wildcard. Every other character, including regex
//! metacharacters such as `.` `+` `?` `[`, matches itself.

use regex::Regex;

use crate::error::{Result, StoreError};

/// Compiled `*` glob over cache keys.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compiles a glob pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use matchday_cache::store::GlobPattern;
    ///
    /// let pattern = GlobPattern::new("fixtures:*").unwrap();
    /// assert!(pattern.matches("fixtures:2026-10-16"));
    /// assert!(!pattern.matches("stats:team:7"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        Self::compile(pattern, false)
    }

    /// Compiles a pattern in wire form, where `\x` stands for a literal `x`.
    ///
    /// This is the form [`escape_glob`] produces, so
    /// `GlobPattern::from_escaped(&escape_glob(p))` matches what
    /// `GlobPattern::new(p)` matches.
    pub fn from_escaped(pattern: &str) -> Result<Self> {
        Self::compile(pattern, true)
    }

    fn compile(pattern: &str, escapes: bool) -> Result<Self> {
        let mut body = String::with_capacity(pattern.len() + 8);
        let mut chars = pattern.chars();

        while let Some(c) = chars.next() {
            match c {
                '*' => body.push_str(".*"),
                '\\' if escapes => {
                    let literal = chars.next().unwrap_or('\\');
                    body.push_str(&regex::escape(literal.encode_utf8(&mut [0; 4])));
                }
                other => body.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
            }
        }

        let regex = Regex::new(&format!("(?s)^{body}$")).map_err(|e| {
            StoreError::InvalidRequest(format!("invalid key pattern '{pattern}': {e}"))
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns true if `key` matches the whole pattern.
    pub fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Backslash-escapes the characters a Redis-style `KEYS` glob treats as
/// syntax (`\`, `?`, `[`, `]`), leaving `*` as the only wildcard.
///
/// ```
/// use matchday_cache::store::escape_glob;
///
/// assert_eq!(escape_glob("tags:[home]:*"), r"tags:\[home\]:*");
/// ```
pub fn escape_glob(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '?' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
