//! stdblock - a domain-pattern rule engine for per-site web-standard blocking.
//!
//! This crate provides the matching core of a browser extension that lets a
//! user disable selected web platform standards (APIs) per domain: given a
//! navigated URL or host and a collection of block rules, it decides which
//! rules apply and which standard identifiers should be blocked on that
//! page.
//!
//! # Features
//!
//! - **Wildcard match patterns**: literal hostnames plus `*` wildcards,
//!   with optional leading `!` negation
//! - **Compiled-pattern caching**: each distinct pattern string is compiled
//!   once per matcher, then reused across navigation events
//! - **Serializable rules**: the compact `{"p": ..., "s": [...]}` JSON form,
//!   deterministic on output
//! - **Rule-set queries**: per-host blocked-id unions with an LRU result
//!   cache and atomic hot replacement of the rule collection
//! - **Thread-safe**: matchers and rule sets can be shared across threads
//!
//! # Quick Start
//!
//! ```
//! use stdblock::{BlockRule, BlockRuleSet, PatternMatcher};
//!
//! // Match a single rule
//! let matcher = PatternMatcher::new();
//! let rule = BlockRule::new("*.example.com", &[12, 45]);
//! assert!(rule.is_matching_url(&matcher, "https://www.example.com/").unwrap());
//!
//! // Or load a collection and query the blocked union per host
//! let ruleset = BlockRuleSet::from_json(
//!     r#"[{"p":"*.example.com","s":[12,45]},{"p":"example.com","s":[100]}]"#,
//! ).unwrap();
//! assert_eq!(ruleset.blocked_ids_for_host("example.com"), vec![12, 45, 100]);
//! ```
//!
//! # Pattern Syntax
//!
//! - `example.com` - matches exactly `example.com` (case-insensitive)
//! - `*.example.com` - matches any subdomain, and the bare parent domain
//! - `!*.example.com` - matches every host the plain pattern does not
//!
//! Patterns are not regular expressions: every character other than `*`
//! matches literally.
//!
//! # Errors
//!
//! All operations fail synchronously with a typed [`Error`]; malformed
//! persisted data is surfaced to the caller, which decides whether to
//! discard, repair, or alert.

mod cache;
mod error;
mod matcher;
mod pattern;
mod rule;
mod ruleset;

// Re-export core types
pub use cache::PatternCache;
pub use error::{Error, Result};
pub use matcher::PatternMatcher;
pub use pattern::CompiledPattern;
pub use rule::{BlockRule, RuleData};
pub use ruleset::{BlockRuleSet, CacheStats, RuleSetConfig};
