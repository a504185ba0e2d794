//! Sink configuration - forwarding endpoint and diagnostics

use serde::Deserialize;

/// InfluxDB forwarding configuration
///
/// ```toml
/// [influx]
/// url = "http://localhost:8086/api/v2/write?bucket=weatherpi"
/// enabled = true
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InfluxConfig {
    /// Whether measurements are forwarded at all
    pub enabled: bool,

    /// Write endpoint URL (bucket etc. in its query string)
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "http://localhost:8086/api/v2/write?bucket=weatherpi".into(),
            timeout_secs: 10,
        }
    }
}

/// Diagnostics configuration
///
/// ```toml
/// [diagnostics]
/// enabled = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Print every measurement as a JSON line on stdout
    pub enabled: bool,
}
