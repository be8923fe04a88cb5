//! Integration tests for synchronous chain building and execution.

use serde::Serialize;
use serde_json::json;
use verdict::{chain, Cause, Predicate, Registry, Schema};

// ---- fluent building and immutability -----------------------------------

#[test]
fn test_shared_prefix_branches_independently() {
    let a = chain().number();
    let b = a.not().equal(10);

    assert!(a.test(&json!(10)));
    assert!(!b.test(&json!(10)));
    assert!(b.test(&json!(9)));

    // The original chain still has exactly one rule.
    assert_eq!(a.rules().len(), 1);
    assert_eq!(b.rules().len(), 2);
}

#[test]
fn test_long_chain_requires_every_rule() {
    let validation = chain()
        .string()
        .min_length(3)
        .max_length(10)
        .not()
        .includes(" ");

    assert!(validation.test(&json!("verdict")));
    assert!(!validation.test(&json!("hi")));
    assert!(!validation.test(&json!("has space")));
    assert!(!validation.test(&json!(12345)));
}

#[test]
fn test_pending_modifier_is_inert_until_a_rule_follows() {
    let armed = chain().number().not();
    assert!(armed.test(&json!(7)));

    let finished = armed.equal(7);
    assert!(!finished.test(&json!(7)));
    assert!(finished.test(&json!(8)));
}

// ---- modifier composition ------------------------------------------------

#[test]
fn test_modifier_order_is_significant() {
    // not(every(even)): at least one element is odd.
    let not_every = chain().not().every().even();
    assert!(not_every.test(&json!([2, 3, 4])));
    assert!(!not_every.test(&json!([2, 4, 6])));

    // every(not(even)): every element is odd.
    let every_not = chain().every().not().even();
    assert!(every_not.test(&json!([1, 3, 5])));
    assert!(!every_not.test(&json!([1, 2, 3])));

    // some(not(exact(2))): at least one element differs from 2.
    let some_not = chain().some().not().exact(2);
    assert!(some_not.test(&json!([2, 2, 3])));
    assert!(!some_not.test(&json!([2, 2, 2])));

    // not(some(exact(2))): no element equals 2.
    let not_some = chain().not().some().exact(2);
    assert!(!not_some.test(&json!([2, 3, 3])));
    assert!(not_some.test(&json!([3, 3, 3])));
}

#[test]
fn test_quantifiers_fail_cleanly_on_non_sequences() {
    assert!(!chain().some().even().test(&json!(4)));
    assert!(!chain().every().even().test(&json!(4)));
    assert!(!chain().some().even().test(&json!(null)));
    assert!(!chain().every().even().test(&json!({"a": [2]})));

    // An outer `not` observes the quantifier's false and inverts it.
    assert!(chain().not().some().even().test(&json!(4)));
    assert!(chain().not().every().even().test(&json!(null)));
}

#[test]
fn test_strings_are_character_sequences() {
    assert!(chain().every().consonant().test(&json!("rhythm")));
    assert!(!chain().every().consonant().test(&json!("rust")));
    assert!(chain().some().vowel().test(&json!("rust")));
    assert!(chain().not().some().equal("z").test(&json!("verdict")));
}

#[test]
fn test_every_propagates_element_faults_and_some_skips_them() {
    let mut registry = Registry::new();
    registry.register("strict_even", |_| {
        Ok(Predicate::from_try_fn(|value| {
            value
                .as_i64()
                .map(|n| n % 2 == 0)
                .ok_or_else(|| Cause::fault("strict_even: integer required"))
        }))
    });

    // `some` tolerates the faulting "x" because another element passes.
    let some = registry.chain().some().rule("strict_even", vec![]);
    assert!(some.test(&json!(["x", 4])));
    assert!(!some.test(&json!(["x", 5])));

    // `every` surfaces the element fault as the rule's cause.
    let every = registry.chain().every().rule("strict_even", vec![]);
    let err = every.check(&json!([2, "x", 4])).unwrap_err();
    let fault = err.cause().and_then(Cause::as_fault).unwrap();
    assert!(fault.contains("integer required"));
}

// ---- execution strategies ------------------------------------------------

#[test]
fn test_strategies_agree_on_the_verdict() {
    let validation = chain().number().positive().not().equal(13);
    for value in [json!(7), json!(13), json!(-1), json!("7"), json!(null)] {
        let passed = validation.test(&value);
        assert_eq!(validation.check(&value).is_ok(), passed);
        assert_eq!(validation.test_all(&value).is_empty(), passed);
    }
}

#[test]
fn test_check_stops_at_the_first_failure() {
    let err = chain()
        .string()
        .min_length(3)
        .lowercase()
        .check(&json!(42))
        .unwrap_err();
    assert_eq!(err.rule().name(), "string");
    assert_eq!(err.value(), &json!(42));
    assert!(err.cause().is_none());
}

#[test]
fn test_test_all_collects_in_rule_order() {
    let failures = chain()
        .string()
        .min_length(3)
        .lowercase()
        .test_all(&json!(42));
    let names: Vec<&str> = failures.iter().map(|f| f.rule().name()).collect();
    assert_eq!(names, ["string", "min_length", "lowercase"]);
}

#[test]
fn test_failure_records_carry_rule_args() {
    let err = chain().between(1, 5).check(&json!(9)).unwrap_err();
    assert_eq!(err.rule().name(), "between");
    assert_eq!(err.rule().args(), &[json!(1), json!(5)]);
    assert_eq!(err.rule().to_string(), "between(1, 5)");
}

#[test]
fn test_modified_rule_failure_names_its_modifiers() {
    let err = chain().not().every().even().check(&json!([2, 4])).unwrap_err();
    let modifiers: Vec<&str> = err.rule().modifiers().iter().map(|m| m.name()).collect();
    assert_eq!(modifiers, ["not", "every"]);
    assert_eq!(err.rule().to_string(), "not.every.even()");
}

// ---- nested schema validation -------------------------------------------

#[test]
fn test_schema_failure_nests_under_the_schema_rule() {
    let validation = chain().schema(Schema::new().field("one", chain().equal("Hello")));

    assert!(validation.test(&json!({"one": "Hello"})));

    let failures = validation.test_all(&json!({"one": "Hi"}));
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].rule().name(), "schema");

    let nested = failures[0].nested();
    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0].rule().name(), "equal");
    assert_eq!(nested[0].target(), Some("one"));
    assert_eq!(nested[0].value(), &json!("Hi"));
}

#[test]
fn test_schema_collects_across_fields_in_declaration_order() {
    let validation = chain().schema(
        Schema::new()
            .field("id", chain().number().positive())
            .field("name", chain().string().min_length(1)),
    );

    let err = validation.check(&json!({"id": -2, "name": ""})).unwrap_err();
    let nested = err.nested();
    assert_eq!(nested.len(), 2);
    assert_eq!(nested[0].target(), Some("id"));
    assert_eq!(nested[0].rule().name(), "positive");
    assert_eq!(nested[1].target(), Some("name"));
    assert_eq!(nested[1].rule().name(), "min_length");
}

#[test]
fn test_schema_missing_field_validates_null() {
    let validation = chain().schema(Schema::new().field("id", chain().number()));

    let err = validation.check(&json!({})).unwrap_err();
    assert_eq!(err.nested()[0].value(), &json!(null));

    // A chain that tolerates null tolerates the absent field.
    let lax = chain().schema(Schema::new().field("id", chain().optional(chain().number())));
    assert!(lax.test(&json!({})));
    assert!(lax.test(&json!({"id": 3})));
    assert!(!lax.test(&json!({"id": "3"})));
}

#[test]
fn test_schema_rejects_non_objects_field_by_field() {
    let validation = chain().schema(
        Schema::new()
            .field("a", chain().number())
            .field("b", chain().number()),
    );
    let failures = validation.test_all(&json!("scalar"));
    assert_eq!(failures[0].nested().len(), 2);
}

#[test]
fn test_schemas_nest_recursively() {
    let address = Schema::new()
        .field("street", chain().string().min_length(1))
        .field("zip", chain().string().pattern("^[0-9]{5}$"));
    let person = Schema::new()
        .field("name", chain().string())
        .field("address", chain().schema(address));

    let validation = chain().schema(person);
    assert!(validation.test(&json!({
        "name": "Ada",
        "address": {"street": "Analytical Way 1", "zip": "12345"}
    })));

    let err = validation
        .check(&json!({"name": "Ada", "address": {"street": "", "zip": "abc"}}))
        .unwrap_err();
    let address_failure = &err.nested()[0];
    assert_eq!(address_failure.target(), Some("address"));
    assert_eq!(address_failure.rule().name(), "schema");

    let leaves: Vec<Option<&str>> = address_failure
        .nested()
        .iter()
        .map(|f| f.target())
        .collect();
    assert_eq!(leaves, [Some("street"), Some("zip")]);
    assert_eq!(err.total_count(), 4);
}

#[test]
fn test_flat_and_nested_failures_aggregate_in_field_order() {
    let inner = Schema::new().field("word", chain().string().lowercase());
    let validation = chain().schema(
        Schema::new()
            .field("one", chain().equal(1))
            .field("two", chain().schema(inner)),
    );

    let err = validation.check(&json!({"one": "Hello"})).unwrap_err();
    let nested = err.nested();
    assert_eq!(nested.len(), 2);
    assert_eq!(nested[0].rule().name(), "equal");
    assert_eq!(nested[0].target(), Some("one"));
    assert_eq!(nested[1].rule().name(), "schema");
    assert_eq!(nested[1].target(), Some("two"));
    // The missing "two" object fails each inner rule against null.
    assert_eq!(nested[1].nested().len(), 2);
}

#[test]
fn test_schema_validates_serialized_structs() {
    #[derive(Serialize)]
    struct Signup {
        username: String,
        age: u8,
    }

    let validation = chain().schema(
        Schema::new()
            .field("username", chain().string().min_length(3))
            .field("age", chain().number().between(13, 120)),
    );

    let ok = serde_json::to_value(Signup {
        username: "ada".into(),
        age: 36,
    })
    .unwrap();
    assert!(validation.test(&ok));

    let too_young = serde_json::to_value(Signup {
        username: "ada".into(),
        age: 9,
    })
    .unwrap();
    let err = validation.check(&too_young).unwrap_err();
    assert_eq!(err.nested()[0].target(), Some("age"));
}

// ---- optional and alternatives ------------------------------------------

#[test]
fn test_optional_tolerates_null_only() {
    let validation = chain().optional(chain().string().min_length(2));
    assert!(validation.test(&json!(null)));
    assert!(validation.test(&json!("ok")));
    assert!(!validation.test(&json!("x")));
    assert!(!validation.test(&json!("")));
}

#[test]
fn test_optional_or_blank_also_tolerates_blank_strings() {
    let validation = chain().optional_or_blank(chain().numeric());
    assert!(validation.test(&json!(null)));
    assert!(validation.test(&json!("")));
    assert!(validation.test(&json!("   ")));
    assert!(validation.test(&json!("42")));
    assert!(!validation.test(&json!("forty-two")));
}

#[test]
fn test_passes_any_of_accepts_any_alternative() {
    let id = chain().passes_any_of(vec![
        chain().number().positive(),
        chain().string().pattern("^[0-9a-f]{8}$"),
    ]);
    assert!(id.test(&json!(17)));
    assert!(id.test(&json!("deadbeef")));
    assert!(!id.test(&json!(-17)));
    assert!(!id.test(&json!("nope")));
}

// ---- custom rules --------------------------------------------------------

#[test]
fn test_registry_rules_compose_with_modifiers() {
    let mut registry = Registry::new();
    registry.register("divisible_by", |args| {
        let divisor = args
            .first()
            .and_then(|v| v.as_i64())
            .filter(|d| *d != 0)
            .ok_or_else(|| Cause::fault("divisible_by: non-zero integer required"))?;
        Ok(Predicate::from_fn(move |value| {
            value.as_i64().map_or(false, |n| n % divisor == 0)
        }))
    });

    let validation = registry.chain().every().rule("divisible_by", vec![json!(3)]);
    assert!(validation.test(&json!([3, 6, 9])));
    assert!(!validation.test(&json!([3, 7])));

    let negated = registry.chain().not().rule("divisible_by", vec![json!(3)]);
    assert!(negated.test(&json!(4)));
}

#[test]
fn test_registry_mutation_does_not_reach_existing_chains() {
    let mut registry = Registry::new();
    registry.register("flag", |_| Ok(Predicate::from_fn(|_| true)));

    let old = registry.chain().rule("flag", vec![]);
    registry.register("flag", |_| Ok(Predicate::from_fn(|_| false)));
    let new = registry.chain().rule("flag", vec![]);

    assert!(old.test(&json!(0)));
    assert!(!new.test(&json!(0)));
}

#[test]
fn test_clear_custom_restores_builtins_for_new_chains() {
    let mut registry = Registry::new();
    registry.register("even", |_| Ok(Predicate::from_fn(|_| true)));
    assert!(registry.chain().even().test(&json!(3)));

    registry.clear_custom();
    assert!(!registry.chain().even().test(&json!(3)));
    assert!(registry.chain().even().test(&json!(2)));
}

#[test]
fn test_unknown_rule_is_a_deferred_fault() {
    let broken = chain().rule("does_not_exist", vec![json!(1)]);
    assert!(!broken.test(&json!(1)));

    let err = broken.check(&json!(1)).unwrap_err();
    assert_eq!(err.rule().name(), "does_not_exist");
    let fault = err.cause().and_then(Cause::as_fault).unwrap();
    assert!(fault.contains("does_not_exist"));
}

#[test]
fn test_factory_rejection_is_a_deferred_fault() {
    // `between` without its second bound cannot build a predicate.
    let broken = chain().rule("between", vec![json!(1)]);
    assert!(!broken.test(&json!(3)));
    let err = broken.check(&json!(3)).unwrap_err();
    assert!(err.cause().is_some());
}

// ---- rendering -----------------------------------------------------------

#[test]
fn test_chain_display_reads_like_the_builder() {
    let validation = chain().number().not().between(1, 5).some().even();
    assert_eq!(
        validation.to_string(),
        "number().not.between(1, 5).some.even()"
    );
}

#[test]
fn test_error_display_is_self_describing() {
    let err = chain().equal("Hello").check(&json!("Hi")).unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("equal(\"Hello\")"));
    assert!(rendered.contains("\"Hi\""));
}
