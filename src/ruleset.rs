//! Rule collections and the per-navigation blocking query.
//!
//! `BlockRuleSet` holds the rules loaded from persisted settings and
//! answers "which standard ids are blocked on this host". It supports:
//! - Atomic hot replacement when the settings storage changes
//! - An LRU cache for per-host results (the same hosts repeat heavily
//!   across navigation events)

use arc_swap::ArcSwap;
use quick_cache::sync::Cache;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::matcher::{extract_host, PatternMatcher};
use crate::rule::{BlockRule, RuleData};

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Cache entry key for a host query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    hash: u64,
}

impl CacheKey {
    fn new(host: &str) -> Self {
        use std::hash::{Hash, Hasher};
        let mut hasher = ahash::AHasher::default();
        host.to_lowercase().hash(&mut hasher);
        Self {
            hash: hasher.finish(),
        }
    }
}

/// Configuration for a rule set's result cache.
#[derive(Debug, Clone)]
pub struct RuleSetConfig {
    /// Maximum number of entries in the cache.
    pub cache_capacity: usize,
    /// Whether to enable caching.
    pub cache_enabled: bool,
}

impl Default for RuleSetConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_enabled: true,
        }
    }
}

impl RuleSetConfig {
    /// Create a configuration with the specified cache capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache_capacity: capacity,
            cache_enabled: true,
        }
    }

    /// Create a configuration with caching disabled.
    pub fn no_cache() -> Self {
        Self {
            cache_capacity: 0,
            cache_enabled: false,
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    pub capacity: usize,
    pub len: usize,
    pub enabled: bool,
}

/// BlockRuleSet manages the loaded rule collection.
///
/// Pattern uniqueness within the collection is not enforced; duplicate
/// patterns are harmless because query results are unions.
///
/// # Examples
/// ```
/// use stdblock::{BlockRule, BlockRuleSet};
///
/// let ruleset = BlockRuleSet::new();
/// ruleset.replace_rules(vec![
///     BlockRule::new("*.example.com", &[12, 45]),
///     BlockRule::new("example.com", &[45, 100]),
/// ]);
///
/// assert_eq!(ruleset.blocked_ids_for_host("example.com"), vec![12, 45, 100]);
/// assert!(ruleset.blocked_ids_for_host("other.org").is_empty());
/// ```
#[derive(Debug)]
pub struct BlockRuleSet {
    matcher: PatternMatcher,
    /// Current rules, swapped atomically on settings change.
    rules: ArcSwap<Vec<BlockRule>>,
    /// LRU cache of per-host blocked-id unions.
    cache: Option<Cache<u64, Arc<Vec<u32>>>>,
    config: RuleSetConfig,
}

impl BlockRuleSet {
    /// Create an empty rule set with default configuration.
    pub fn new() -> Self {
        Self::with_config(RuleSetConfig::default())
    }

    /// Create an empty rule set with custom configuration.
    pub fn with_config(config: RuleSetConfig) -> Self {
        let cache = if config.cache_enabled && config.cache_capacity > 0 {
            Some(Cache::new(config.cache_capacity))
        } else {
            None
        };

        Self {
            matcher: PatternMatcher::new(),
            rules: ArcSwap::from_pointee(Vec::new()),
            cache,
            config,
        }
    }

    /// Load a rule set from a JSON array of rule objects.
    ///
    /// Fails with [`Error::Parse`] on malformed JSON, [`Error::Format`] if
    /// the document is not an array or any element is not a valid rule.
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_json_with_config(text, RuleSetConfig::default())
    }

    /// Load a rule set from JSON with custom configuration.
    pub fn from_json_with_config(text: &str, config: RuleSetConfig) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
        let items = value
            .as_array()
            .ok_or_else(|| Error::Format("rule collection must be an array".to_string()))?;

        let mut rules = Vec::with_capacity(items.len());
        for item in items {
            rules.push(BlockRule::from_data(item)?);
        }

        let ruleset = Self::with_config(config);
        ruleset.replace_rules(rules);
        Ok(ruleset)
    }

    /// Serialize the current rules to a deterministic JSON array.
    pub fn to_json(&self) -> Result<String> {
        let data: Vec<RuleData> = self.rules.load().iter().map(BlockRule::to_data).collect();
        serde_json::to_string(&data).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Snapshot of the current rules.
    pub fn rules(&self) -> Arc<Vec<BlockRule>> {
        self.rules.load_full()
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.load().len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.load().is_empty()
    }

    /// The matcher (and pattern cache) backing this rule set.
    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// Atomically replace the rule collection.
    ///
    /// In-flight queries complete with the old rules; new queries see the
    /// new ones. The result cache is cleared so it cannot serve stale
    /// unions.
    pub fn replace_rules(&self, rules: Vec<BlockRule>) {
        let count = rules.len();
        self.rules.store(Arc::new(rules));

        if let Some(ref cache) = self.cache {
            cache.clear();
        }

        log::debug!("Replaced rule set: {} rules", count);
    }

    /// Union of standard ids blocked on `host`, sorted ascending and
    /// deduplicated.
    ///
    /// Rules whose pattern no longer compiles are skipped with a warning;
    /// a broken rule must not take down the whole evaluation.
    pub fn blocked_ids_for_host(&self, host: &str) -> Vec<u32> {
        let key = CacheKey::new(host);

        if let Some(ref cache) = self.cache {
            if let Some(hit) = cache.get(&key.hash) {
                return hit.as_ref().clone();
            }
        }

        let result = Arc::new(self.compute_blocked_ids(host));

        if let Some(ref cache) = self.cache {
            cache.insert(key.hash, Arc::clone(&result));
        }

        result.as_ref().clone()
    }

    /// Union of standard ids blocked on the host of `url`.
    ///
    /// Fails with [`Error::Parse`] if `url` is malformed or has no host.
    pub fn blocked_ids_for_url(&self, url: &str) -> Result<Vec<u32>> {
        let host = extract_host(url)?;
        Ok(self.blocked_ids_for_host(&host))
    }

    /// Patterns of the rules matching `host`, in rule order. Uncached.
    pub fn matching_patterns_for_host(&self, host: &str) -> Vec<String> {
        let rules = self.rules.load();
        let mut patterns = Vec::new();

        for rule in rules.iter() {
            match rule.is_matching_host(&self.matcher, host) {
                Ok(true) => patterns.push(rule.pattern().to_string()),
                Ok(false) => {}
                Err(e) => log::warn!("Skipping rule {:?}: {}", rule.pattern(), e),
            }
        }

        patterns
    }

    /// Clear the result cache.
    pub fn clear_cache(&self) {
        if let Some(ref cache) = self.cache {
            cache.clear();
        }
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        match self.cache {
            Some(ref cache) => CacheStats {
                capacity: self.config.cache_capacity,
                len: cache.len(),
                enabled: true,
            },
            None => CacheStats {
                capacity: 0,
                len: 0,
                enabled: false,
            },
        }
    }

    fn compute_blocked_ids(&self, host: &str) -> Vec<u32> {
        let rules = self.rules.load();
        let mut ids = Vec::new();

        for rule in rules.iter() {
            match rule.is_matching_host(&self.matcher, host) {
                Ok(true) => ids.extend(rule.standard_ids()),
                Ok(false) => {}
                Err(e) => log::warn!("Skipping rule {:?}: {}", rule.pattern(), e),
            }
        }

        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

impl Default for BlockRuleSet {
    fn default() -> Self {
        Self::new()
    }
}
