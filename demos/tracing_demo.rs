//! Demonstrates tracing integration with chain execution.
//!
//! Run with: cargo run --example tracing_demo --features tracing

use serde_json::json;
use verdict::{chain, Schema};

fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    tracing::info!("Starting tracing demo");

    let validation = chain().schema(
        Schema::new()
            .field("id", chain().number().positive())
            .field("code", chain().string().pattern("^[A-Z]{3}-[0-9]{4}$")),
    );

    tracing::info!("Validating a passing payload");
    let ok = validation.test(&json!({"id": 7, "code": "ABC-1234"}));
    tracing::info!(ok, "verdict");

    tracing::info!("Validating a failing payload");
    match validation.check(&json!({"id": -1, "code": "nope"})) {
        Ok(()) => tracing::info!("unexpected pass"),
        Err(err) => tracing::warn!(%err, "validation failed"),
    }

    tracing::info!("Each rule of a longer chain emits its own event");
    let password = chain().string().min_length(8).not().lowercase();
    let _ = password.test_all(&json!("letmein"));
}
