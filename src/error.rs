//! Error types for stdblock.

use thiserror::Error;

/// Error type for stdblock operations.
///
/// All failures are deterministic functions of their input and are raised
/// synchronously to the immediate caller. Callers recover by skipping or
/// dropping the offending pattern/rule.
#[derive(Error, Debug)]
pub enum Error {
    /// Match pattern rejected by the regex engine
    #[error("invalid match pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Deserialization input missing required fields or with wrong field types
    #[error("malformed rule data: {0}")]
    Format(String),

    /// Malformed JSON text or URL text
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type alias for stdblock operations.
pub type Result<T> = std::result::Result<T, Error>;
