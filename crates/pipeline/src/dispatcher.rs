//! Dispatcher - ordered fan-out of valid measurements

use std::sync::Arc;

use tokio::sync::mpsc;
use vane_protocol::MeasurementParser;
use vane_sinks::Sink;

use crate::metrics::PipelineMetrics;

#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod dispatcher_test;

/// Connects a line source to the registered sinks
///
/// Lines are handled strictly in arrival order; for each valid measurement
/// the sinks run in registration order before the next line is processed.
/// Sink registration is fixed before `run` starts and never changes.
pub struct Dispatcher {
    /// Line parser (holds the immutable name matcher)
    parser: MeasurementParser,

    /// Registered sinks, invoked in order
    sinks: Vec<Box<dyn Sink>>,

    /// Counters (Arc for sharing with the host after `run` consumes self)
    metrics: Arc<PipelineMetrics>,
}

impl Dispatcher {
    /// Create a dispatcher with no sinks
    pub fn new(parser: MeasurementParser) -> Self {
        Self {
            parser,
            sinks: Vec::new(),
            metrics: Arc::new(PipelineMetrics::default()),
        }
    }

    /// Register a sink
    ///
    /// Sinks run in registration order for every measurement.
    pub fn register_sink(&mut self, sink: Box<dyn Sink>) {
        tracing::debug!(sink = sink.name(), "registered sink");
        self.sinks.push(sink);
    }

    /// Number of registered sinks
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Get a metrics handle that stays valid after `run` consumes self
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Process one line
    ///
    /// Parses the line, drops invalid measurements with a diagnostic, and
    /// hands valid ones to every sink. A sink error is logged and counted;
    /// the remaining sinks still run.
    pub fn dispatch_line(&self, line: &str) {
        self.metrics.record_line();

        let measurement = self.parser.parse(line);
        if !measurement.is_valid() {
            self.metrics.record_invalid();
            tracing::debug!(raw = line, "dropping invalid measurement");
            return;
        }

        for sink in &self.sinks {
            if let Err(error) = sink.emit(&measurement) {
                self.metrics.record_sink_error();
                tracing::error!(sink = sink.name(), %error, "sink failed");
            }
        }
        self.metrics.record_dispatched();
    }

    /// Run the dispatcher, processing lines until the channel closes
    pub async fn run(self, mut lines: mpsc::Receiver<String>) {
        tracing::info!(sink_count = self.sink_count(), "dispatcher starting");

        while let Some(line) = lines.recv().await {
            self.dispatch_line(&line);
        }

        let snapshot = self.metrics.snapshot();
        tracing::info!(
            lines_received = snapshot.lines_received,
            lines_invalid = snapshot.lines_invalid,
            measurements_dispatched = snapshot.measurements_dispatched,
            sink_errors = snapshot.sink_errors,
            "dispatcher shutting down"
        );
    }
}
