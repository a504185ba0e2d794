//! Naming configuration

use std::path::PathBuf;

use serde::Deserialize;

/// Naming rules configuration
///
/// Without a rules path, readings are never assigned a name.
///
/// ```toml
/// [naming]
/// rules = "naming_rules.txt"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Path to the rule file (optional)
    pub rules: Option<PathBuf>,
}
