//! Radio source - receiver subprocess lifecycle and stdout pump
//!
//! Owns the external radio-receiver process. Its standard output is an
//! opaque byte stream fed through a `LineAssembler`; completed lines go to
//! the dispatcher's channel. The process is restarted forever when it
//! exits or fails to start - this is a long-running service with no
//! retry cutoff. The lifecycle is an explicit state machine
//! {Starting -> Running -> Exited -> Starting...} so a backoff or
//! max-retry policy can be added without restructuring.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::SourceError;
use crate::line::LineAssembler;

#[cfg(test)]
#[path = "radio_test.rs"]
mod radio_test;

/// Read buffer size for the receiver's stdout pipe
const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Radio source configuration
#[derive(Debug, Clone)]
pub struct RadioSourceConfig {
    /// Path to the receiver binary
    pub bin: String,

    /// Receiver arguments
    pub args: Vec<String>,

    /// Pause before restarting an exited receiver (zero = immediate)
    pub restart_pause: Duration,
}

impl Default for RadioSourceConfig {
    fn default() -> Self {
        Self {
            bin: "rtl_433".into(),
            args: ["-M", "utc", "-C", "si", "-F", "json", "-T", "86400"]
                .map(String::from)
                .to_vec(),
            restart_pause: Duration::ZERO,
        }
    }
}

/// Lifecycle states of the receiver process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioState {
    /// About to spawn the receiver
    Starting,
    /// Receiver is up, stdout is being pumped
    Running,
    /// Receiver ended or failed to start; a restart follows
    Exited,
}

impl RadioState {
    /// The state that follows this one in the restart cycle
    pub fn next(self) -> Self {
        match self {
            Self::Starting => Self::Running,
            Self::Running => Self::Exited,
            Self::Exited => Self::Starting,
        }
    }
}

/// Source that pumps the radio receiver's stdout into the line channel
pub struct RadioSource {
    config: RadioSourceConfig,

    /// Completed lines go here, in arrival order
    lines: mpsc::Sender<String>,
}

impl RadioSource {
    /// Create a new radio source
    pub fn new(config: RadioSourceConfig, lines: mpsc::Sender<String>) -> Self {
        Self { config, lines }
    }

    /// Run the source until cancelled
    ///
    /// Cycles the receiver through its lifecycle states forever. A spawn
    /// failure counts as an immediate exit and is retried like any other;
    /// nothing here is fatal to the service.
    pub async fn run(self, cancel: CancellationToken) {
        let mut state = RadioState::Starting;
        let mut child: Option<Child> = None;

        while !cancel.is_cancelled() {
            state = match state {
                RadioState::Starting => match self.spawn() {
                    Ok(spawned) => {
                        child = Some(spawned);
                        state.next()
                    }
                    Err(error) => {
                        tracing::error!(%error, "receiver failed to start");
                        RadioState::Exited
                    }
                },
                RadioState::Running => {
                    if let Some(child) = child.take() {
                        self.pump(child, &cancel).await;
                    }
                    state.next()
                }
                RadioState::Exited => {
                    if !self.config.restart_pause.is_zero() {
                        tokio::select! {
                            _ = cancel.cancelled() => break,
                            _ = tokio::time::sleep(self.config.restart_pause) => {}
                        }
                    }
                    tracing::info!(bin = %self.config.bin, "restarting receiver");
                    state.next()
                }
            };
        }

        tracing::info!("radio source stopped");
    }

    /// Spawn the receiver with stdout piped, stdin and stderr discarded
    fn spawn(&self) -> Result<Child, SourceError> {
        tracing::info!(
            bin = %self.config.bin,
            args = ?self.config.args,
            "starting receiver"
        );

        Command::new(&self.config.bin)
            .args(&self.config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SourceError::Spawn {
                bin: self.config.bin.clone(),
                source,
            })
    }

    /// Pump stdout until EOF or cancellation
    ///
    /// A trailing partial line at EOF is dropped, like the receiver dying
    /// mid-write would drop it.
    async fn pump(&self, mut child: Child, cancel: &CancellationToken) {
        let Some(mut stdout) = child.stdout.take() else {
            tracing::error!("{}", SourceError::NoStdout);
            return;
        };

        let mut assembler = LineAssembler::new();
        let mut buf = vec![0u8; READ_BUFFER_SIZE];

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    if let Err(error) = child.kill().await {
                        tracing::debug!(%error, "failed to kill receiver on shutdown");
                    }
                    return;
                }
                read = stdout.read(&mut buf) => match read {
                    Ok(0) => break,
                    Ok(n) => {
                        for line in assembler.feed(&buf[..n]) {
                            if self.lines.send(line).await.is_err() {
                                // dispatcher is gone; nothing left to feed
                                let _ = child.kill().await;
                                return;
                            }
                        }
                    }
                    Err(error) => {
                        tracing::warn!(%error, "reading receiver stdout failed");
                        break;
                    }
                }
            }
        }

        match child.wait().await {
            Ok(status) => tracing::warn!(%status, "receiver exited"),
            Err(error) => tracing::warn!(%error, "failed to reap receiver"),
        }
    }
}
