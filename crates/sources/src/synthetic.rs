//! Synthetic source - fabricated readings for running without hardware

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::Utc;
use serde_json::json;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use vane_protocol::TIME_FORMAT;

#[cfg(test)]
#[path = "synthetic_test.rs"]
mod synthetic_test;

/// Synthetic source configuration
#[derive(Debug, Clone)]
pub struct SyntheticSourceConfig {
    /// Time between fabricated readings
    pub interval: Duration,
}

impl Default for SyntheticSourceConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
        }
    }
}

/// Source that fabricates one reading per interval
///
/// Readings carry the same shape as receiver output (`id`, `device`,
/// `channel`, `model`, `time`, `temperature_C`) so the rest of the pipeline
/// is exercised unchanged.
pub struct SyntheticSource {
    config: SyntheticSourceConfig,
    lines: mpsc::Sender<String>,
}

impl SyntheticSource {
    /// Create a new synthetic source
    pub fn new(config: SyntheticSourceConfig, lines: mpsc::Sender<String>) -> Self {
        Self { config, lines }
    }

    /// Run the source until cancelled
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            interval_ms = self.config.interval.as_millis() as u64,
            "synthetic source starting"
        );

        let mut jitter = Jitter::seeded();
        let mut tick = tokio::time::interval(self.config.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tick.tick() => {
                    let line = fabricate_reading(&mut jitter);
                    if self.lines.send(line).await.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::info!("synthetic source stopped");
    }
}

/// Build one reading line with the current UTC time
fn fabricate_reading(jitter: &mut Jitter) -> String {
    json!({
        "id": "1",
        "device": "synthetic",
        "channel": 42,
        "model": "synthetic",
        "time": Utc::now().format(TIME_FORMAT).to_string(),
        "temperature_C": 20.0 + 5.0 * jitter.unit(),
    })
    .to_string()
}

/// Tiny xorshift generator for temperature jitter
///
/// The fabricated values only need to vary between readings; no statistical
/// quality is required, so this avoids a dependency on a real RNG.
struct Jitter(u64);

impl Jitter {
    fn seeded() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9e37_79b9_7f4a_7c15);
        Self(seed | 1)
    }

    /// Next value in [0, 1)
    fn unit(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}
