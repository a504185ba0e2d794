//! Measurement data model and reading parser.
//!
//! A radio reading arrives as one line of JSON. `MeasurementParser` turns
//! that line into a `Measurement`: tag fields, numeric metric values and a
//! UTC epoch timestamp. Parsing never fails - a line that cannot be
//! understood yields an invalid Measurement (no timestamp), which callers
//! must not forward.

mod measurement;
mod parser;

pub use measurement::{Measurement, TIME_FORMAT};
pub use parser::MeasurementParser;
