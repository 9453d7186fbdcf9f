//! Compiled-pattern cache.
//!
//! Compiling a pattern costs a regex build; matching happens on every
//! navigation for every rule. The cache makes repeat compiles of an
//! identical pattern string free.

use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::Result;
use crate::pattern::CompiledPattern;

/// Cache of compiled patterns, keyed by exact pattern text.
///
/// The key includes any leading `!`. Entries are never evicted: the set of
/// distinct patterns is bounded by the user's rule collection, so the cache
/// stays small in practice. Safe for concurrent readers and writers.
#[derive(Debug, Default)]
pub struct PatternCache {
    inner: RwLock<AHashMap<String, Arc<CompiledPattern>>>,
}

impl PatternCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached compilation of `pattern`, compiling on first use.
    ///
    /// Repeat calls with an identical pattern string return the same
    /// `Arc` without recompiling.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<CompiledPattern>> {
        if let Some(hit) = self.inner.read().get(pattern) {
            return Ok(Arc::clone(hit));
        }

        let compiled = Arc::new(CompiledPattern::compile(pattern)?);

        // Racing writers converge on whichever entry landed first.
        let mut guard = self.inner.write();
        let entry = guard
            .entry(pattern.to_string())
            .or_insert_with(|| Arc::clone(&compiled));
        Ok(Arc::clone(entry))
    }

    /// Number of distinct patterns compiled so far.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
