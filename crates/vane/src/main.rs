//! vane - radio sensor readings to InfluxDB adapter
//!
//! # Usage
//!
//! ```bash
//! # Run against the radio receiver (default)
//! vane
//! vane --config /etc/vane/vane.toml
//!
//! # Fabricate readings and print them instead of sending
//! vane --synthetic --no-send --verbose
//! ```

mod serve;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vane_config::Config;

/// Radio sensor readings to InfluxDB adapter
#[derive(Parser, Debug)]
#[command(name = "vane")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Path to the radio receiver binary
    #[arg(long)]
    radio_bin: Option<String>,

    /// InfluxDB write endpoint URL
    #[arg(long)]
    influx_url: Option<String>,

    /// Path to the naming rules file
    #[arg(long)]
    naming_rules: Option<PathBuf>,

    /// Fabricate readings instead of running the receiver
    #[arg(long)]
    synthetic: bool,

    /// Do not forward measurements to the write endpoint
    #[arg(long)]
    no_send: bool,

    /// Print every measurement as a JSON line
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_logging(config.log.level.as_str())?;

    serve::run(config).await
}

/// Load the config file (or defaults) and apply CLI overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(level) = &cli.log_level {
        config.log.level = level
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;
    }
    if let Some(bin) = &cli.radio_bin {
        config.radio.bin = bin.clone();
    }
    if let Some(url) = &cli.influx_url {
        config.influx.url = url.clone();
    }
    if let Some(rules) = &cli.naming_rules {
        config.naming.rules = Some(rules.clone());
    }
    if cli.synthetic {
        config.synthetic.enabled = true;
    }
    if cli.no_send {
        config.influx.enabled = false;
    }
    if cli.verbose {
        config.diagnostics.enabled = true;
    }

    config.validate()?;
    Ok(config)
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
