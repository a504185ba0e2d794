//! Rule loading error types

use std::io;

use thiserror::Error;

/// Errors that can occur when loading naming rules
#[derive(Debug, Error)]
pub enum RuleError {
    /// Failed to read the rule file
    #[error("failed to read rule file '{path}': {source}")]
    Io {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Rule line is not valid JSON
    #[error("rule line is not a JSON array: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rule line has no name element
    #[error("rule line has no name as its first element")]
    MissingName,

    /// Predicate element is not a `key=pattern` string
    #[error("predicate '{predicate}' is not a key=pattern pair")]
    BadPredicate {
        /// The offending element, rendered as text
        predicate: String,
    },

    /// Predicate pattern failed to compile
    #[error("invalid pattern '{pattern}': {source}")]
    BadPattern {
        /// The pattern as written in the rule file
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },
}
