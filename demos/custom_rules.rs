//! Registering custom rules and composing them like built-ins.
//!
//! Run with: cargo run --example custom_rules

use serde_json::json;
use verdict::{chain, Cause, Predicate, Registry};

fn main() {
    println!("=== Custom Rules ===\n");

    let mut registry = Registry::new();

    // A parameterized rule: the factory validates its own arguments.
    registry.register("divisible_by", |args| {
        let divisor = args
            .first()
            .and_then(|v| v.as_i64())
            .filter(|d| *d != 0)
            .ok_or_else(|| Cause::fault("divisible_by: non-zero integer argument required"))?;
        Ok(Predicate::from_fn(move |value| {
            value.as_i64().map_or(false, |n| n % divisor == 0)
        }))
    });

    // A niladic rule.
    registry.register("ascii", |_| {
        Ok(Predicate::from_fn(|value| {
            value.as_str().map_or(false, |s| s.is_ascii())
        }))
    });

    println!("Test 1: Custom rules compose with modifiers");
    let thirds = registry.chain().every().rule("divisible_by", vec![json!(3)]);
    println!("  [3, 6, 9] every divisible_by(3): {}", thirds.test(&json!([3, 6, 9])));
    println!("  [3, 7]    every divisible_by(3): {}", thirds.test(&json!([3, 7])));

    let plain = registry.chain().string().rule("ascii", vec![]);
    println!("  \"hello\" ascii: {}", plain.test(&json!("hello")));
    println!("  \"héllo\" ascii: {}", plain.test(&json!("héllo")));

    println!("\n---\n");

    println!("Test 2: Factory errors surface at execution time");
    let broken = registry.chain().rule("divisible_by", vec![json!(0)]);
    match broken.check(&json!(9)) {
        Ok(()) => println!("✓ unexpected success"),
        Err(err) => println!("✗ {}", err),
    }

    println!("\n---\n");

    println!("Test 3: Chains snapshot the registry");
    let before = registry.chain().rule("ascii", vec![]);
    registry.clear_custom();
    let after = registry.chain().rule("ascii", vec![]);
    println!("  chain built before clear_custom: {}", before.test(&json!("ok")));
    println!("  chain built after clear_custom: {}", after.test(&json!("ok")));

    println!("\n---\n");

    println!("Test 4: Custom rules shadow built-ins");
    let mut shadowed = Registry::new();
    shadowed.register("even", |_| {
        Ok(Predicate::from_fn(|value| {
            // Redefine evenness over string length for this registry.
            value.as_str().map_or(false, |s| s.len() % 2 == 0)
        }))
    });
    println!("  \"door\" even (shadowed): {}", shadowed.chain().even().test(&json!("door")));
    println!("  \"door\" even (built-in): {}", chain().even().test(&json!("door")));
}
