//! Stdout sink - diagnostic JSON output
//!
//! Prints every measurement's full internal state as one compact JSON line.
//! For human inspection only; not intended to be machine-consumed.

use vane_protocol::Measurement;

use crate::{Sink, SinkError};

#[cfg(test)]
#[path = "stdout_test.rs"]
mod stdout_test;

/// Diagnostic sink that prints measurements to stdout
#[derive(Debug)]
pub struct StdoutSink {
    name: String,
}

impl StdoutSink {
    /// Create a new stdout sink
    pub fn new() -> Self {
        Self {
            name: "stdout".into(),
        }
    }
}

impl Sink for StdoutSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, measurement: &Measurement) -> Result<(), SinkError> {
        let line = serde_json::to_string(measurement)
            .map_err(|e| SinkError::Serialization(e.to_string()))?;
        println!("{}", line);
        Ok(())
    }
}
