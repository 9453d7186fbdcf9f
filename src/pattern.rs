//! Match pattern compilation.
//!
//! A match pattern is a restricted wildcard string describing a set of
//! hostnames: literal characters plus `*` ("any sequence"), with an optional
//! leading `!` that negates the whole pattern. Patterns are not a full regex
//! language; everything except `*` matches literally.
//!
//! # Pattern Formats
//! - Exact: `example.com` - matches only `example.com` (case-insensitive)
//! - Wildcard: `*.example.com` - matches any subdomain of `example.com`
//! - Negated: `!*.example.com` - matches any host the plain pattern does not

use regex::Regex;

use crate::error::{Error, Result};

/// A compiled match pattern.
///
/// Holds the original pattern text, the negation-stripped body, and a
/// case-insensitive regex anchored to the whole input. Negation is applied
/// by inverting the match result: the compiled pattern matches exactly when
/// the input does not satisfy the un-negated body.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: String,
    body: String,
    regex: Regex,
    negated: bool,
}

impl CompiledPattern {
    /// Compile a match pattern.
    ///
    /// Fails with [`Error::InvalidPattern`] if the regex engine rejects the
    /// translated expression (e.g. the compiled size limit is exceeded).
    pub fn compile(pattern: &str) -> Result<Self> {
        let (negated, body) = match pattern.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };

        let regex = Regex::new(&wildcard_to_regex(body)).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            body: body.to_string(),
            regex,
            negated,
        })
    }

    /// The original pattern text, including any leading `!`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The pattern text with any leading `!` removed.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether this pattern is negated.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Test the un-negated body against the full input string.
    pub(crate) fn matches_body(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// Test the pattern against the full input string, negation applied.
    pub fn is_match(&self, input: &str) -> bool {
        self.matches_body(input) != self.negated
    }
}

/// Translate a wildcard body into an anchored case-insensitive regex.
///
/// Every regex metacharacter is escaped, then each escaped `*` becomes
/// "zero or more of any character".
fn wildcard_to_regex(body: &str) -> String {
    let escaped = regex::escape(body).replace(r"\*", ".*");
    format!("(?i)^(?:{escaped})$")
}
