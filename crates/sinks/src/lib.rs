//! Measurement sinks
//!
//! A sink is a consumer of valid measurements: one `emit` call per
//! measurement, invoked by the dispatcher in registration order. Sinks are
//! registered at startup and never change at runtime.
//!
//! Two sinks exist: `InfluxSink` forwards the line-protocol payload to an
//! InfluxDB write endpoint (fire-and-forget), `StdoutSink` prints the full
//! measurement as a JSON line for human inspection.

mod influx;
mod stdout;

use thiserror::Error;
use vane_protocol::Measurement;

pub use influx::{InfluxSink, InfluxSinkConfig, InfluxSinkMetrics, MetricsSnapshot};
pub use stdout::StdoutSink;

/// A consumer of valid measurements
///
/// `emit` must not block on network I/O - a sink that writes to the network
/// schedules the write as a detached task and returns. An `Err` from one
/// sink never prevents other sinks from running.
pub trait Sink: Send + Sync {
    /// Sink name for logging
    fn name(&self) -> &str;

    /// Consume one valid measurement
    fn emit(&self, measurement: &Measurement) -> Result<(), SinkError>;
}

/// Common sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// Sink initialization failed
    #[error("failed to initialize sink: {0}")]
    Init(String),

    /// Write endpoint URL did not parse
    #[error("invalid write endpoint '{url}': {message}")]
    Endpoint {
        /// The URL as configured
        url: String,
        /// Parser message
        message: String,
    },

    /// Measurement could not be serialized
    #[error("serialization error: {0}")]
    Serialization(String),
}
