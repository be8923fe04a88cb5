//! Value comparison rules: equality and membership.

use serde_json::Value;

use super::{loosely_equal, require_arg};
use crate::error::Cause;
use crate::predicate::Predicate;

/// Loose equality against the expected value.
pub(crate) fn equal(args: &[Value]) -> Result<Predicate, Cause> {
    let expected = require_arg("equal", args, 0)?.clone();
    Ok(Predicate::from_fn(move |value| {
        loosely_equal(value, &expected)
    }))
}

/// Strict structural equality against the expected value.
pub(crate) fn exact(args: &[Value]) -> Result<Predicate, Cause> {
    let expected = require_arg("exact", args, 0)?.clone();
    Ok(Predicate::from_fn(move |value| value == &expected))
}

/// The first element of an array, or the first character of a string,
/// loosely equals the expected value.
pub(crate) fn first(args: &[Value]) -> Result<Predicate, Cause> {
    let expected = require_arg("first", args, 0)?.clone();
    Ok(Predicate::from_fn(move |value| match value {
        Value::Array(items) => items
            .first()
            .is_some_and(|item| loosely_equal(item, &expected)),
        Value::String(text) => text
            .chars()
            .next()
            .is_some_and(|c| loosely_equal(&Value::String(c.to_string()), &expected)),
        _ => false,
    }))
}

/// The last element of an array, or the last character of a string,
/// loosely equals the expected value.
pub(crate) fn last(args: &[Value]) -> Result<Predicate, Cause> {
    let expected = require_arg("last", args, 0)?.clone();
    Ok(Predicate::from_fn(move |value| match value {
        Value::Array(items) => items
            .last()
            .is_some_and(|item| loosely_equal(item, &expected)),
        Value::String(text) => text
            .chars()
            .next_back()
            .is_some_and(|c| loosely_equal(&Value::String(c.to_string()), &expected)),
        _ => false,
    }))
}

/// An array contains a loosely equal element, or a string contains the
/// expected substring.
pub(crate) fn includes(args: &[Value]) -> Result<Predicate, Cause> {
    let expected = require_arg("includes", args, 0)?.clone();
    Ok(Predicate::from_fn(move |value| match value {
        Value::Array(items) => items.iter().any(|item| loosely_equal(item, &expected)),
        Value::String(text) => expected
            .as_str()
            .is_some_and(|needle| text.contains(needle)),
        _ => false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn passes(factory: super::super::BuiltinFactory, arg: Value, value: Value) -> bool {
        factory(&[arg]).unwrap().eval(&value).unwrap()
    }

    #[test]
    fn test_equal_is_loose_on_numbers_only() {
        assert!(passes(equal, json!(1), json!(1.0)));
        assert!(!passes(equal, json!("1"), json!(1)));
        assert!(passes(equal, json!([1, 2]), json!([1, 2])));
    }

    #[test]
    fn test_exact_is_structural() {
        assert!(passes(exact, json!("hi"), json!("hi")));
        assert!(!passes(exact, json!(10), json!("10")));
    }

    #[test]
    fn test_first_and_last_on_arrays() {
        assert!(passes(first, json!(1), json!([1, 2, 3])));
        assert!(!passes(first, json!(2), json!([1, 2, 3])));
        assert!(passes(last, json!(3), json!([1, 2, 3])));
        assert!(!passes(last, json!(3), json!([])));
    }

    #[test]
    fn test_first_and_last_on_strings() {
        assert!(passes(first, json!("h"), json!("hello")));
        assert!(passes(last, json!("o"), json!("hello")));
        assert!(!passes(first, json!("e"), json!("hello")));
    }

    #[test]
    fn test_first_rejects_non_sequences() {
        assert!(!passes(first, json!(1), json!(1)));
        assert!(!passes(last, json!(1), json!({"0": 1})));
    }

    #[test]
    fn test_includes_membership_and_substring() {
        assert!(passes(includes, json!(2), json!([1, 2, 3])));
        assert!(passes(includes, json!(2.0), json!([1, 2, 3])));
        assert!(!passes(includes, json!(4), json!([1, 2, 3])));
        assert!(passes(includes, json!("ell"), json!("hello")));
        assert!(!passes(includes, json!(1), json!("hello")));
        assert!(!passes(includes, json!(1), json!(12)));
    }

    #[test]
    fn test_missing_argument_faults() {
        assert!(equal(&[]).is_err());
        assert!(includes(&[]).is_err());
    }
}
