//! InfluxDB write sink - fire-and-forget line-protocol forwarding
//!
//! Each measurement becomes one POST of its line-protocol payload to the
//! configured write endpoint, with the precision query parameter fixed to
//! seconds. The request runs in a detached task: `emit` returns before the
//! write completes, a slow or unreachable endpoint never stalls ingestion,
//! and a failed write is logged and dropped - no retry, no buffering.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use vane_protocol::Measurement;

use crate::{Sink, SinkError};

#[cfg(test)]
#[path = "influx_test.rs"]
mod influx_test;

/// Default write endpoint
const DEFAULT_URL: &str = "http://localhost:8086/api/v2/write?bucket=weatherpi";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the InfluxDB write sink
#[derive(Debug, Clone)]
pub struct InfluxSinkConfig {
    /// Write endpoint URL (bucket etc. carried in its query string)
    pub url: String,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for InfluxSinkConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Metrics for the InfluxDB sink
#[derive(Debug, Default)]
pub struct InfluxSinkMetrics {
    /// Writes accepted by the endpoint
    writes_ok: AtomicU64,

    /// Writes that failed or were rejected
    writes_failed: AtomicU64,
}

impl InfluxSinkMetrics {
    #[inline]
    fn record_ok(&self) {
        self.writes_ok.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_failed(&self) {
        self.writes_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            writes_ok: self.writes_ok.load(Ordering::Relaxed),
            writes_failed: self.writes_failed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of sink metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub writes_ok: u64,
    pub writes_failed: u64,
}

/// Forwarding sink for an InfluxDB v2 write endpoint
pub struct InfluxSink {
    /// Write endpoint with `precision=s` already applied
    url: Url,

    /// Shared HTTP client
    client: reqwest::Client,

    /// Sink name for logging
    name: String,

    /// Metrics (Arc so the detached write tasks can record outcomes)
    metrics: Arc<InfluxSinkMetrics>,
}

impl InfluxSink {
    /// Create a new InfluxDB sink
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint URL does not parse or the HTTP
    /// client cannot be built.
    pub fn new(config: InfluxSinkConfig) -> Result<Self, SinkError> {
        let mut url = Url::parse(&config.url).map_err(|e| SinkError::Endpoint {
            url: config.url.clone(),
            message: e.to_string(),
        })?;
        url.query_pairs_mut().append_pair("precision", "s");

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SinkError::Init(e.to_string()))?;

        Ok(Self {
            url,
            client,
            name: "influx".into(),
            metrics: Arc::new(InfluxSinkMetrics::default()),
        })
    }

    /// The resolved write endpoint (including `precision=s`)
    pub fn endpoint(&self) -> &Url {
        &self.url
    }

    /// Get reference to metrics
    pub fn metrics(&self) -> &Arc<InfluxSinkMetrics> {
        &self.metrics
    }
}

impl Sink for InfluxSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, measurement: &Measurement) -> Result<(), SinkError> {
        let payload = measurement.line_protocol();
        let url = self.url.clone();
        let client = self.client.clone();
        let metrics = Arc::clone(&self.metrics);

        // Detached: the dispatcher moves on while the write is in flight
        tokio::spawn(async move {
            let result = client
                .post(url)
                .header("Content-Type", "text/plain; charset=utf-8")
                .body(payload)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    metrics.record_ok();
                    tracing::trace!(status = %response.status(), "measurement written");
                }
                Ok(response) => {
                    metrics.record_failed();
                    tracing::warn!(status = %response.status(), "write endpoint rejected measurement");
                }
                Err(error) => {
                    metrics.record_failed();
                    tracing::warn!(%error, "failed to write measurement");
                }
            }
        });

        Ok(())
    }
}
