//! Measurement - the normalized record derived from one reading

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

#[cfg(test)]
#[path = "measurement_test.rs"]
mod measurement_test;

/// Timestamp format of the `time` attribute in readings, interpreted as UTC
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One normalized sensor measurement
///
/// Built once per input line by `MeasurementParser` and immutable
/// thereafter. A measurement without a timestamp is invalid: the line could
/// not be fully understood and must not be forwarded to sinks.
///
/// `fields` and `values` keep insertion order, which is also the order they
/// appear in the line-protocol payload.
#[derive(Debug)]
pub struct Measurement {
    /// Original line text, kept for diagnostics
    raw: String,

    /// Seconds since the Unix epoch (UTC); `None` marks an invalid parse
    timestamp: Option<i64>,

    /// Tag pairs: at most `name`, `model`, `id`, `device`, `channel`
    fields: Vec<(&'static str, String)>,

    /// Metric pairs: at most `temperature_C`, `humidity`, `battery`
    values: Vec<(&'static str, f64)>,
}

impl Measurement {
    /// Create an empty, invalid measurement for a raw line
    pub(crate) fn new(raw: String) -> Self {
        Self {
            raw,
            timestamp: None,
            fields: Vec::new(),
            values: Vec::new(),
        }
    }

    pub(crate) fn push_field(&mut self, key: &'static str, value: String) {
        self.fields.push((key, value));
    }

    pub(crate) fn push_value(&mut self, key: &'static str, value: f64) {
        self.values.push((key, value));
    }

    pub(crate) fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = Some(timestamp);
    }

    /// True when the reading parsed completely
    pub fn is_valid(&self) -> bool {
        self.timestamp.is_some()
    }

    /// The original line text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Seconds since the Unix epoch, `None` for invalid measurements
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    /// Tag pairs in insertion order
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    /// Metric pairs in insertion order
    pub fn values(&self) -> &[(&'static str, f64)] {
        &self.values
    }

    /// Look up a single tag value
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a single metric value
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// Render the InfluxDB line-protocol payload
    ///
    /// ```text
    /// measure,model=x temperature_C=21.5 1000
    /// ```
    ///
    /// Metric values render minimally (`60`, not `60.0`). Only meaningful
    /// for valid measurements; an invalid one renders with timestamp 0.
    pub fn line_protocol(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",");
        let values = self
            .values
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "measure,{} {} {}",
            fields,
            values,
            self.timestamp.unwrap_or_default()
        )
    }
}

/// Serializes as a JSON object with `fields`/`values` as ordered maps,
/// matching what the diagnostic sink prints.
impl Serialize for Measurement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Pairs<'a, V>(&'a [(&'static str, V)]);

        impl<V: Serialize> Serialize for Pairs<'_, V> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (key, value) in self.0 {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }

        let mut state = serializer.serialize_struct("Measurement", 4)?;
        state.serialize_field("raw", &self.raw)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("fields", &Pairs(&self.fields))?;
        state.serialize_field("values", &Pairs(&self.values))?;
        state.end()
    }
}
