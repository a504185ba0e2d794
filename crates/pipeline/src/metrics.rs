//! Pipeline metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the dispatcher
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    /// Total lines received from the source
    lines_received: AtomicU64,

    /// Lines dropped because they did not parse into a valid measurement
    lines_invalid: AtomicU64,

    /// Valid measurements handed to the sinks
    measurements_dispatched: AtomicU64,

    /// Individual sink invocations that returned an error
    sink_errors: AtomicU64,
}

impl PipelineMetrics {
    #[inline]
    pub(crate) fn record_line(&self) {
        self.lines_received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_invalid(&self) {
        self.lines_invalid.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_dispatched(&self) {
        self.measurements_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_sink_error(&self) {
        self.sink_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines_received: self.lines_received.load(Ordering::Relaxed),
            lines_invalid: self.lines_invalid.load(Ordering::Relaxed),
            measurements_dispatched: self.measurements_dispatched.load(Ordering::Relaxed),
            sink_errors: self.sink_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of pipeline metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub lines_received: u64,
    pub lines_invalid: u64,
    pub measurements_dispatched: u64,
    pub sink_errors: u64,
}
