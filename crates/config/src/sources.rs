//! Source configuration - the radio receiver and the synthetic generator

use serde::Deserialize;

/// Radio receiver configuration
///
/// ```toml
/// [radio]
/// bin = "rtl_433"
/// args = ["-M", "utc", "-C", "si", "-F", "json", "-T", "86400"]
/// restart_pause_ms = 0
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RadioConfig {
    /// Path to the receiver binary
    pub bin: String,

    /// Receiver arguments
    pub args: Vec<String>,

    /// Pause before restarting an exited receiver, in milliseconds
    /// Default: 0 (restart immediately)
    pub restart_pause_ms: u64,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            bin: "rtl_433".into(),
            args: ["-M", "utc", "-C", "si", "-F", "json", "-T", "86400"]
                .map(String::from)
                .to_vec(),
            restart_pause_ms: 0,
        }
    }
}

/// Synthetic generator configuration
///
/// When enabled, fabricated readings replace the radio receiver entirely.
///
/// ```toml
/// [synthetic]
/// enabled = true
/// interval_ms = 2000
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    /// Fabricate readings instead of running the receiver
    pub enabled: bool,

    /// Time between fabricated readings, in milliseconds
    pub interval_ms: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radio_defaults_match_the_production_receiver() {
        let config = RadioConfig::default();
        assert_eq!(config.bin, "rtl_433");
        assert!(config.args.contains(&"json".to_string()));
        assert_eq!(config.restart_pause_ms, 0);
    }

    #[test]
    fn test_synthetic_disabled_by_default() {
        let config = SyntheticConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.interval_ms, 2000);
    }

    #[test]
    fn test_partial_radio_section_keeps_other_defaults() {
        let config: RadioConfig = toml::from_str(r#"bin = "/opt/rtl_433/rtl_433""#).unwrap();
        assert_eq!(config.bin, "/opt/rtl_433/rtl_433");
        assert_eq!(config.args, RadioConfig::default().args);
    }
}
