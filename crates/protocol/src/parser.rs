//! Reading parser - one JSON line in, one Measurement out

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use vane_naming::{scalar_text, NameMatcher};

use crate::measurement::{Measurement, TIME_FORMAT};

#[cfg(test)]
#[path = "parser_test.rs"]
mod parser_test;

/// Tag attributes copied verbatim from a reading, in payload order
const FIELD_KEYS: [&str; 4] = ["model", "id", "device", "channel"];

/// Converts raw reading lines into measurements
///
/// Stateless apart from the immutable name matcher; parsing the same line
/// twice yields identical measurements. `parse` never fails - anything the
/// parser cannot understand produces an invalid measurement and a
/// diagnostic log line.
pub struct MeasurementParser {
    matcher: Arc<NameMatcher>,
}

impl MeasurementParser {
    /// Create a parser using the given name matcher
    pub fn new(matcher: Arc<NameMatcher>) -> Self {
        Self { matcher }
    }

    /// Parse one raw line into a measurement
    pub fn parse(&self, line: &str) -> Measurement {
        let mut measurement = Measurement::new(line.to_string());

        let reading: Map<String, Value> = match serde_json::from_str(line) {
            Ok(reading) => reading,
            Err(error) => {
                tracing::error!(%error, raw = line, "invalid json reading");
                return measurement;
            }
        };

        if let Some(celsius) = reading.get("temperature_C").and_then(Value::as_f64) {
            measurement.push_value("temperature_C", celsius);
        }
        if let Some(humidity) = reading.get("humidity").and_then(Value::as_f64) {
            measurement.push_value("humidity", humidity);
        }
        if let Some(state) = reading.get("battery") {
            let ok = scalar_text(state).eq_ignore_ascii_case("ok");
            measurement.push_value("battery", if ok { 1.0 } else { 0.0 });
        }

        if let Some(name) = self.matcher.name(&reading) {
            measurement.push_field("name", name.to_string());
        }
        for key in FIELD_KEYS {
            if let Some(value) = reading.get(key) {
                measurement.push_field(key, scalar_text(value));
            }
        }

        match reading.get("time").and_then(Value::as_str) {
            Some(text) => match parse_reading_time(text) {
                Ok(timestamp) => measurement.set_timestamp(timestamp),
                Err(error) => {
                    tracing::warn!(%error, raw = line, "reading has malformed time");
                }
            },
            None => {
                tracing::warn!(raw = line, "reading has no usable time attribute");
            }
        }

        measurement
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp as UTC epoch seconds
fn parse_reading_time(text: &str) -> Result<i64, chrono::ParseError> {
    Ok(NaiveDateTime::parse_from_str(text, TIME_FORMAT)?
        .and_utc()
        .timestamp())
}
