//! Host and URL matching against compiled patterns.

use std::sync::Arc;
use url::Url;

use crate::cache::PatternCache;
use crate::error::{Error, Result};
use crate::pattern::CompiledPattern;

/// PatternMatcher turns match patterns into predicates over hostnames and
/// URLs. Each matcher owns its compiled-pattern cache; construct one at
/// startup and share it across all rule evaluations.
///
/// # Examples
/// ```
/// use stdblock::PatternMatcher;
///
/// let matcher = PatternMatcher::new();
/// assert!(matcher.matches_host("*.example.com", "www.example.com").unwrap());
/// assert!(matcher.matches_host("*.example.com", "example.com").unwrap());
/// assert!(!matcher.matches_host("*.example.com", "example.org").unwrap());
/// ```
#[derive(Debug, Default)]
pub struct PatternMatcher {
    cache: PatternCache,
}

impl PatternMatcher {
    /// Create a matcher with an empty pattern cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher around an existing cache.
    pub fn with_cache(cache: PatternCache) -> Self {
        Self { cache }
    }

    /// Compile a pattern, or fetch it from the cache.
    pub fn compile(&self, pattern: &str) -> Result<Arc<CompiledPattern>> {
        self.cache.get_or_compile(pattern)
    }

    /// Check whether `pattern` matches `host`.
    ///
    /// A pattern of the form `*.example.com` also matches the bare parent
    /// domain `example.com`: users writing a subdomain wildcard expect it
    /// to cover the domain with no subdomain at all. A negated pattern
    /// matches exactly when the plain pattern (fallback included) does not.
    pub fn matches_host(&self, pattern: &str, host: &str) -> Result<bool> {
        let compiled = self.compile(pattern)?;
        Ok(host_matches_plain(&compiled, host) != compiled.is_negated())
    }

    /// Check whether `pattern` matches the host component of `url`.
    ///
    /// Fails with [`Error::Parse`] if `url` cannot be parsed or has no host
    /// component (e.g. `about:blank`).
    pub fn matches_url(&self, pattern: &str, url: &str) -> Result<bool> {
        let host = extract_host(url)?;
        self.matches_host(pattern, &host)
    }

    /// Number of distinct patterns compiled so far.
    pub fn cached_patterns(&self) -> usize {
        self.cache.len()
    }
}

/// Un-negated host match: the compiled body, or the `*.` parent fallback.
fn host_matches_plain(compiled: &CompiledPattern, host: &str) -> bool {
    if compiled.matches_body(host) {
        return true;
    }

    // "*.example.com" also covers bare "example.com"
    match compiled.body().strip_prefix("*.") {
        Some(parent) => parent.eq_ignore_ascii_case(host),
        None => false,
    }
}

/// Extract the host component of a URL string.
pub(crate) fn extract_host(url: &str) -> Result<String> {
    let parsed =
        Url::parse(url).map_err(|e| Error::Parse(format!("invalid URL {url:?}: {e}")))?;

    match parsed.host_str() {
        Some(host) => Ok(host.to_string()),
        None => Err(Error::Parse(format!("URL {url:?} has no host component"))),
    }
}
