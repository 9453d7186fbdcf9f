//! Block rules: one match pattern bound to a set of standard identifiers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::matcher::PatternMatcher;

/// Persisted form of a block rule.
///
/// `s` is sorted ascending on output so that logically identical rules
/// serialize to byte-identical JSON regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleData {
    /// Match pattern (wildcard syntax, optional leading `!`)
    pub p: String,
    /// Standard identifiers to block
    pub s: Vec<u32>,
}

/// BlockRule binds one match pattern to the standard identifiers that
/// should be disabled on matching pages.
///
/// The pattern is fixed at construction; the identifier set can be replaced
/// wholesale. Identifiers are opaque to this crate: no validation against a
/// standards catalog, no deduplication.
///
/// # Examples
/// ```
/// use stdblock::{BlockRule, PatternMatcher};
///
/// let matcher = PatternMatcher::new();
/// let rule = BlockRule::new("*.example.com", &[45, 12]);
///
/// assert!(rule.is_matching_host(&matcher, "www.example.com").unwrap());
/// assert_eq!(rule.to_data().s, vec![12, 45]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRule {
    pattern: String,
    standard_ids: Vec<u32>,
}

impl BlockRule {
    /// Create a rule from a pattern and a set of standard identifiers.
    ///
    /// The identifiers are copied; the caller's slice is not aliased.
    pub fn new(pattern: impl Into<String>, standard_ids: &[u32]) -> Self {
        Self {
            pattern: pattern.into(),
            standard_ids: standard_ids.to_vec(),
        }
    }

    /// The match pattern. Fixed for the lifetime of the rule.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The standard identifiers, as a defensive copy.
    ///
    /// Mutating the returned vec never affects the rule.
    pub fn standard_ids(&self) -> Vec<u32> {
        self.standard_ids.clone()
    }

    /// Replace the identifier set wholesale.
    ///
    /// No merge with the previous set, no deduplication.
    pub fn set_standard_ids(&mut self, ids: &[u32]) {
        self.standard_ids = ids.to_vec();
    }

    /// Check whether this rule's pattern matches `host`.
    pub fn is_matching_host(&self, matcher: &PatternMatcher, host: &str) -> Result<bool> {
        matcher.matches_host(&self.pattern, host)
    }

    /// Check whether this rule's pattern matches the host of `url`.
    pub fn is_matching_url(&self, matcher: &PatternMatcher, url: &str) -> Result<bool> {
        matcher.matches_url(&self.pattern, url)
    }

    /// The persisted form of this rule, identifiers sorted ascending.
    pub fn to_data(&self) -> RuleData {
        let mut s = self.standard_ids.clone();
        s.sort_unstable();
        RuleData {
            p: self.pattern.clone(),
            s,
        }
    }

    /// The JSON text encoding of [`to_data`](Self::to_data).
    pub fn to_serialized_string(&self) -> Result<String> {
        serde_json::to_string(&self.to_data()).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Reconstruct a rule from a persisted data object.
    ///
    /// Fails with [`Error::Format`] if `p` or `s` is absent, `p` is not a
    /// string, or `s` is not an array of non-negative integers.
    pub fn from_data(data: &Value) -> Result<Self> {
        let obj = data
            .as_object()
            .ok_or_else(|| Error::Format("rule data must be an object".to_string()))?;

        let pattern = obj
            .get("p")
            .ok_or_else(|| Error::Format("missing field `p`".to_string()))?
            .as_str()
            .ok_or_else(|| Error::Format("field `p` must be a string".to_string()))?;

        let ids = obj
            .get("s")
            .ok_or_else(|| Error::Format("missing field `s`".to_string()))?
            .as_array()
            .ok_or_else(|| Error::Format("field `s` must be an array".to_string()))?;

        let mut standard_ids = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_u64().and_then(|n| u32::try_from(n).ok()).ok_or_else(|| {
                Error::Format(format!("field `s` must contain non-negative integers, got {id}"))
            })?;
            standard_ids.push(id);
        }

        Ok(Self::new(pattern, &standard_ids))
    }

    /// Reconstruct a rule from its JSON text encoding.
    ///
    /// Fails with [`Error::Parse`] on malformed JSON, then validates the
    /// parsed value as in [`from_data`](Self::from_data).
    pub fn from_serialized_string(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
        Self::from_data(&value)
    }
}
