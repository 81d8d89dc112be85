//! Shared fixtures for integration tests.

#![allow(dead_code)]

use lightstore::{State, StateChange};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

/// The canonical two-section fixture used across the reducer tests.
pub fn initial_state() -> State {
    State::from_object(json!({
        "test": {
            "value": 0,
            "text": "test",
            "obj": { "x": 1, "y": 2 },
        },
        "other": {},
    }))
    .expect("fixture state is a valid object")
}

/// Build a `StateChange` from a JSON object literal.
pub fn change(value: Value) -> StateChange {
    value
        .as_object()
        .cloned()
        .expect("change fixture must be an object")
}

/// Route library tracing through the test harness. Idempotent.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
