//! Configuration validation

use crate::error::{ConfigError, Result};
use crate::Config;

/// Validate a parsed configuration
///
/// Checks for:
/// - At least one sink enabled
/// - A receiver binary when the synthetic source is off
/// - A non-empty forwarding URL when forwarding is enabled
/// - A positive synthetic interval
pub fn validate_config(config: &Config) -> Result<()> {
    if !config.influx.enabled && !config.diagnostics.enabled {
        return Err(ConfigError::NoSinksEnabled);
    }

    if !config.synthetic.enabled && config.radio.bin.trim().is_empty() {
        return Err(ConfigError::missing_field("radio", "bin"));
    }

    if config.influx.enabled && config.influx.url.trim().is_empty() {
        return Err(ConfigError::missing_field("influx", "url"));
    }

    if config.synthetic.enabled && config.synthetic.interval_ms == 0 {
        return Err(ConfigError::invalid_value(
            "synthetic",
            "interval_ms",
            "must be positive",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_all_sinks_disabled_is_rejected() {
        let config = Config::from_str(
            r#"
[influx]
enabled = false

[diagnostics]
enabled = false
"#,
        );
        assert!(matches!(config, Err(ConfigError::NoSinksEnabled)));
    }

    #[test]
    fn test_empty_receiver_bin_is_rejected() {
        let config = Config::from_str(
            r#"
[radio]
bin = ""
"#,
        );
        assert!(matches!(config, Err(ConfigError::MissingField { .. })));
    }

    #[test]
    fn test_empty_receiver_bin_is_fine_with_synthetic_source() {
        let config = Config::from_str(
            r#"
[radio]
bin = ""

[synthetic]
enabled = true
"#,
        );
        assert!(config.is_ok());
    }

    #[test]
    fn test_empty_influx_url_is_rejected() {
        let config = Config::from_str(
            r#"
[influx]
url = ""
"#,
        );
        assert!(matches!(config, Err(ConfigError::MissingField { .. })));
    }

    #[test]
    fn test_zero_synthetic_interval_is_rejected() {
        let config = Config::from_str(
            r#"
[synthetic]
enabled = true
interval_ms = 0
"#,
        );
        assert!(matches!(config, Err(ConfigError::InvalidValue { .. })));
    }
}
