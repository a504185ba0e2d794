//! Reading sources
//!
//! A source delivers newline-delimited JSON readings, one per line, into
//! the dispatcher's line channel. `RadioSource` runs the external
//! radio-receiver process and pumps its standard output, restarting it
//! forever when it exits. `SyntheticSource` fabricates readings on an
//! interval for running without radio hardware.
//!
//! `LineAssembler` is the shared framing piece: it turns an arbitrary
//! sequence of byte chunks into complete lines, preserving a trailing
//! partial line across chunk boundaries.

mod error;
mod line;
mod radio;
mod synthetic;

pub use error::SourceError;
pub use line::LineAssembler;
pub use radio::{RadioSource, RadioSourceConfig, RadioState};
pub use synthetic::{SyntheticSource, SyntheticSourceConfig};
