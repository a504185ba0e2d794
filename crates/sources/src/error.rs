//! Source error types

use std::io;

use thiserror::Error;

/// Errors from reading sources
#[derive(Debug, Error)]
pub enum SourceError {
    /// The receiver process could not be started
    #[error("failed to start receiver '{bin}': {source}")]
    Spawn {
        /// Binary path as configured
        bin: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The receiver's standard output was not captured
    #[error("receiver stdout was not captured")]
    NoStdout,
}
