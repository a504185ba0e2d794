//! Dispatcher tests

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use vane_naming::NameMatcher;
use vane_protocol::{Measurement, MeasurementParser};
use vane_sinks::{Sink, SinkError};

use super::Dispatcher;

/// Sink that records every payload it receives
struct RecordingSink {
    payloads: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let payloads = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                payloads: Arc::clone(&payloads),
            },
            payloads,
        )
    }
}

impl Sink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn emit(&self, measurement: &Measurement) -> Result<(), SinkError> {
        self.payloads
            .lock()
            .unwrap()
            .push(measurement.line_protocol());
        Ok(())
    }
}

/// Sink that fails on every call
struct FailingSink;

impl Sink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    fn emit(&self, _measurement: &Measurement) -> Result<(), SinkError> {
        Err(SinkError::Init("this sink always fails".into()))
    }
}

fn dispatcher() -> Dispatcher {
    Dispatcher::new(MeasurementParser::new(Arc::new(NameMatcher::empty())))
}

const VALID_LINE: &str = r#"{"time": "1970-01-01 00:16:40", "model": "x", "temperature_C": 21.5}"#;

#[test]
fn test_valid_line_reaches_sink() {
    let mut dispatcher = dispatcher();
    let (sink, payloads) = RecordingSink::new();
    dispatcher.register_sink(Box::new(sink));

    dispatcher.dispatch_line(VALID_LINE);

    assert_eq!(
        payloads.lock().unwrap().as_slice(),
        ["measure,model=x temperature_C=21.5 1000"]
    );
}

#[test]
fn test_invalid_lines_never_reach_sinks() {
    let mut dispatcher = dispatcher();
    let (sink, payloads) = RecordingSink::new();
    dispatcher.register_sink(Box::new(sink));

    dispatcher.dispatch_line("not json at all");
    dispatcher.dispatch_line(r#"{"model": "x"}"#); // no time attribute
    dispatcher.dispatch_line(r#"{"time": "not a time"}"#);

    assert!(payloads.lock().unwrap().is_empty());

    let snapshot = dispatcher.metrics().snapshot();
    assert_eq!(snapshot.lines_received, 3);
    assert_eq!(snapshot.lines_invalid, 3);
    assert_eq!(snapshot.measurements_dispatched, 0);
}

#[test]
fn test_failing_sink_is_isolated() {
    let mut dispatcher = dispatcher();
    let (recording, payloads) = RecordingSink::new();
    // The failing sink is registered first; the second sink must still
    // receive every measurement in order.
    dispatcher.register_sink(Box::new(FailingSink));
    dispatcher.register_sink(Box::new(recording));

    dispatcher.dispatch_line(VALID_LINE);
    dispatcher.dispatch_line(
        r#"{"time": "1970-01-01 00:16:41", "model": "y", "temperature_C": 22.0}"#,
    );

    assert_eq!(
        payloads.lock().unwrap().as_slice(),
        [
            "measure,model=x temperature_C=21.5 1000",
            "measure,model=y temperature_C=22 1001",
        ]
    );

    let snapshot = dispatcher.metrics().snapshot();
    assert_eq!(snapshot.sink_errors, 2);
    assert_eq!(snapshot.measurements_dispatched, 2);
}

#[test]
fn test_sinks_run_in_registration_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    struct OrderSink {
        tag: &'static str,
        order: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Sink for OrderSink {
        fn name(&self) -> &str {
            self.tag
        }

        fn emit(&self, _measurement: &Measurement) -> Result<(), SinkError> {
            self.order.lock().unwrap().push(self.tag);
            Ok(())
        }
    }

    let mut dispatcher = dispatcher();
    dispatcher.register_sink(Box::new(OrderSink {
        tag: "first",
        order: Arc::clone(&order),
    }));
    dispatcher.register_sink(Box::new(OrderSink {
        tag: "second",
        order: Arc::clone(&order),
    }));

    dispatcher.dispatch_line(VALID_LINE);

    assert_eq!(order.lock().unwrap().as_slice(), ["first", "second"]);
}

#[tokio::test]
async fn test_run_drains_channel_in_order() {
    let mut dispatcher = dispatcher();
    let (sink, payloads) = RecordingSink::new();
    dispatcher.register_sink(Box::new(sink));
    let metrics = dispatcher.metrics();

    let (tx, rx) = mpsc::channel(16);
    for second in 40..45 {
        let line = format!(r#"{{"time": "1970-01-01 00:16:{}", "model": "x"}}"#, second);
        tx.send(line).await.unwrap();
    }
    tx.send("garbage".to_string()).await.unwrap();
    drop(tx);

    dispatcher.run(rx).await;

    let payloads = payloads.lock().unwrap();
    assert_eq!(payloads.len(), 5);
    assert_eq!(payloads[0], "measure,model=x  1000");
    assert_eq!(payloads[4], "measure,model=x  1004");

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.lines_received, 6);
    assert_eq!(snapshot.lines_invalid, 1);
    assert_eq!(snapshot.measurements_dispatched, 5);
}
