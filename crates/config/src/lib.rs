//! Adapter configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! An empty config runs the radio receiver and forwards to a local
//! InfluxDB - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use vane_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[diagnostics]\nenabled = true").unwrap();
//! assert!(config.diagnostics.enabled);
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [radio]
//! bin = "/usr/local/bin/rtl_433"
//!
//! [naming]
//! rules = "naming_rules.txt"
//!
//! [influx]
//! url = "http://localhost:8086/api/v2/write?bucket=weatherpi"
//! ```

mod error;
mod logging;
mod naming;
mod sinks;
mod sources;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogLevel};
pub use naming::NamingConfig;
pub use sinks::{DiagnosticsConfig, InfluxConfig};
pub use sources::{RadioConfig, SyntheticConfig};

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Radio receiver process
    pub radio: RadioConfig,

    /// Synthetic reading generator (replaces the receiver when enabled)
    pub synthetic: SyntheticConfig,

    /// Naming rules
    pub naming: NamingConfig,

    /// InfluxDB forwarding
    pub influx: InfluxConfig,

    /// Diagnostic output
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Validate the configuration
    ///
    /// Called automatically by the parsing entry points; call again after
    /// mutating a loaded config (e.g. applying CLI overrides).
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
