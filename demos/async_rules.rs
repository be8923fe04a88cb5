//! Asynchronous predicates: sequential evaluation and short-circuiting.
//!
//! Run with: cargo run --example async_rules

use std::time::Duration;

use serde_json::json;
use verdict::{Predicate, Registry};

/// Pretend to ask a datastore whether a username is still free.
fn username_available() -> Predicate {
    Predicate::from_future(|value| async move {
        tokio::time::sleep(Duration::from_millis(25)).await;
        let taken = ["ada", "grace", "edsger"];
        Ok(value.as_str().is_some_and(|name| !taken.contains(&name)))
    })
}

#[tokio::main]
async fn main() {
    println!("=== Asynchronous Rules ===\n");

    let mut registry = Registry::new();
    registry.register("available", |_| Ok(username_available()));

    let validation = registry
        .chain()
        .string()
        .min_length(3)
        .rule("available", vec![]);

    println!("Test 1: All rules pass");
    match validation.test_async(json!("lovelace")).await {
        Ok(value) => println!("✓ accepted {}", value),
        Err(err) => println!("✗ {}", err),
    }

    println!("\nTest 2: The async rule rejects");
    match validation.test_async(json!("ada")).await {
        Ok(value) => println!("✓ unexpected acceptance of {}", value),
        Err(err) => println!("✗ {}", err),
    }

    println!("\nTest 3: An early sync failure stops the lookup");
    match validation.test_async(json!("ab")).await {
        Ok(value) => println!("✓ unexpected acceptance of {}", value),
        Err(err) => println!("✗ {} (no lookup was made)", err),
    }

    println!("\nTest 4: Quantified async rules check one element at a time");
    let all_available = registry.chain().every().rule("available", vec![]);
    match all_available.test_async(json!(["tango", "whisky"])).await {
        Ok(_) => println!("✓ every name is available"),
        Err(err) => println!("✗ {}", err),
    }
    match all_available.test_async(json!(["tango", "grace"])).await {
        Ok(_) => println!("✓ unexpected acceptance"),
        Err(err) => println!("✗ {}", err),
    }

    println!("\nTest 5: Async-only rules fault under test()");
    let sync_attempt = registry.chain().rule("available", vec![]);
    println!("  test() verdict: {}", sync_attempt.test(&json!("zelda")));
    if let Err(err) = sync_attempt.check(&json!("zelda")) {
        println!("  check() fault: {}", err);
    }
}
