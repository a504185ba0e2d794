//! Line dispatcher
//!
//! The `Dispatcher` connects a line source to the sinks: every completed
//! line is parsed into a measurement, invalid measurements are dropped with
//! a diagnostic, and valid ones are handed to each registered sink in
//! registration order. A failing sink is isolated - it is logged, the other
//! sinks still run, and the stream continues.

mod dispatcher;
mod metrics;

pub use dispatcher::Dispatcher;
pub use metrics::{MetricsSnapshot, PipelineMetrics};
