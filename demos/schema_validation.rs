//! Validating a nested signup payload with schema chains.
//!
//! Run with: cargo run --example schema_validation

use serde_json::json;
use verdict::{chain, Schema};

fn main() {
    println!("=== Signup Payload Validation ===\n");

    let address = Schema::new()
        .field("street", chain().string().min_length(1))
        .field("zip", chain().string().pattern("^[0-9]{5}$"));

    let signup = Schema::new()
        .field("username", chain().string().min_length(3).not().includes(" "))
        .field("age", chain().number().between(13, 120))
        .field("nickname", chain().optional(chain().string().min_length(2)))
        .field("address", chain().schema(address));

    let validation = chain().schema(signup);

    println!("Test 1: Valid payload");
    let valid = json!({
        "username": "ada_l",
        "age": 36,
        "address": {"street": "Analytical Way 1", "zip": "12345"}
    });
    match validation.check(&valid) {
        Ok(()) => println!("✓ payload accepted"),
        Err(err) => println!("✗ unexpected failure: {}", err),
    }

    println!("\n---\n");

    println!("Test 2: Several fields wrong at once");
    let invalid = json!({
        "username": "a b",
        "age": 7,
        "nickname": "x",
        "address": {"street": "", "zip": "abc"}
    });
    let failures = validation.test_all(&invalid);
    for failure in &failures {
        println!("✗ {}", failure);
    }
    if let Some(first) = failures.first() {
        println!(
            "\n{} field failure(s) under the schema rule",
            first.nested().len()
        );
    }

    println!("\n---\n");

    println!("Test 3: Missing fields validate null");
    match validation.check(&json!({"username": "ada_l"})) {
        Ok(()) => println!("✓ unexpected success"),
        Err(err) => {
            for field_failure in err.nested() {
                println!(
                    "✗ {}: rule {}",
                    field_failure.target().unwrap_or("?"),
                    field_failure.rule()
                );
            }
        }
    }
}
