//! Component wiring and the run loop

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use vane_config::Config;
use vane_naming::NameMatcher;
use vane_pipeline::Dispatcher;
use vane_protocol::MeasurementParser;
use vane_sinks::{InfluxSink, InfluxSinkConfig, StdoutSink};
use vane_sources::{RadioSource, RadioSourceConfig, SyntheticSource, SyntheticSourceConfig};

/// Line channel depth between the source and the dispatcher
const LINE_QUEUE_SIZE: usize = 1024;

/// Build all components from the configuration and run until ctrl-c
pub async fn run(config: Config) -> Result<()> {
    let matcher = match &config.naming.rules {
        Some(path) => NameMatcher::from_file(path)
            .with_context(|| format!("loading naming rules from '{}'", path.display()))?,
        None => NameMatcher::empty(),
    };

    let parser = MeasurementParser::new(Arc::new(matcher));
    let mut dispatcher = Dispatcher::new(parser);

    if config.influx.enabled {
        let sink = InfluxSink::new(InfluxSinkConfig {
            url: config.influx.url.clone(),
            timeout: Duration::from_secs(config.influx.timeout_secs),
        })
        .context("initializing influx sink")?;
        tracing::info!(endpoint = %sink.endpoint(), "forwarding measurements");
        dispatcher.register_sink(Box::new(sink));
    }
    if config.diagnostics.enabled {
        dispatcher.register_sink(Box::new(StdoutSink::new()));
    }

    let (lines_tx, lines_rx) = mpsc::channel(LINE_QUEUE_SIZE);
    let cancel = CancellationToken::new();

    let pipeline = tokio::spawn(dispatcher.run(lines_rx));

    let source = if config.synthetic.enabled {
        let source = SyntheticSource::new(
            SyntheticSourceConfig {
                interval: Duration::from_millis(config.synthetic.interval_ms),
            },
            lines_tx,
        );
        tokio::spawn(source.run(cancel.clone()))
    } else {
        let source = RadioSource::new(
            RadioSourceConfig {
                bin: config.radio.bin.clone(),
                args: config.radio.args.clone(),
                restart_pause: Duration::from_millis(config.radio.restart_pause_ms),
            },
            lines_tx,
        );
        tokio::spawn(source.run(cancel.clone()))
    };

    tokio::signal::ctrl_c()
        .await
        .context("listening for shutdown signal")?;
    tracing::info!("shutdown requested");
    cancel.cancel();

    // The source drops its sender on exit, which closes the line channel
    // and lets the dispatcher drain and report its totals.
    source.await.context("source task panicked")?;
    pipeline.await.context("pipeline task panicked")?;

    Ok(())
}
