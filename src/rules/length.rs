//! Length rules over strings and arrays.
//!
//! String length counts characters, not bytes. Values with no length
//! (numbers, booleans, null, objects) fail every length rule.

use serde_json::Value;

use super::usize_arg;
use crate::error::Cause;
use crate::predicate::Predicate;

fn measured_len(value: &Value) -> Option<usize> {
    match value {
        Value::String(text) => Some(text.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

pub(crate) fn empty(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(|value| measured_len(value) == Some(0)))
}

/// With one argument, an exact length; with two, an inclusive range.
pub(crate) fn length(args: &[Value]) -> Result<Predicate, Cause> {
    let min = usize_arg("length", args, 0)?;
    let max = if args.len() > 1 {
        usize_arg("length", args, 1)?
    } else {
        min
    };
    Ok(Predicate::from_fn(move |value| {
        measured_len(value).is_some_and(|len| len >= min && len <= max)
    }))
}

pub(crate) fn min_length(args: &[Value]) -> Result<Predicate, Cause> {
    let min = usize_arg("min_length", args, 0)?;
    Ok(Predicate::from_fn(move |value| {
        measured_len(value).is_some_and(|len| len >= min)
    }))
}

pub(crate) fn max_length(args: &[Value]) -> Result<Predicate, Cause> {
    let max = usize_arg("max_length", args, 0)?;
    Ok(Predicate::from_fn(move |value| {
        measured_len(value).is_some_and(|len| len <= max)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn passes(factory: super::super::BuiltinFactory, args: &[Value], value: Value) -> bool {
        factory(args).unwrap().eval(&value).unwrap()
    }

    #[test]
    fn test_empty_matches_zero_length_sequences() {
        assert!(passes(empty, &[], json!("")));
        assert!(passes(empty, &[], json!([])));
        assert!(!passes(empty, &[], json!("a")));
        assert!(!passes(empty, &[], json!(null)));
        assert!(!passes(empty, &[], json!({})));
    }

    #[test]
    fn test_length_exact_and_range() {
        assert!(passes(length, &[json!(3)], json!("abc")));
        assert!(!passes(length, &[json!(3)], json!("ab")));
        assert!(passes(length, &[json!(2), json!(4)], json!([1, 2, 3])));
        assert!(!passes(length, &[json!(2), json!(4)], json!([1])));
        assert!(!passes(length, &[json!(2), json!(4)], json!([1, 2, 3, 4, 5])));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(passes(length, &[json!(2)], json!("héllo".get(0..3).unwrap())));
        assert!(passes(length, &[json!(5)], json!("héllo")));
    }

    #[test]
    fn test_min_and_max_length() {
        assert!(passes(min_length, &[json!(2)], json!("ab")));
        assert!(!passes(min_length, &[json!(2)], json!("a")));
        assert!(passes(max_length, &[json!(2)], json!([1, 2])));
        assert!(!passes(max_length, &[json!(2)], json!([1, 2, 3])));
    }

    #[test]
    fn test_valueless_shapes_fail() {
        assert!(!passes(min_length, &[json!(0)], json!(42)));
        assert!(!passes(max_length, &[json!(9)], json!(true)));
    }

    #[test]
    fn test_bad_argument_faults() {
        assert!(length(&[json!("three")]).is_err());
        assert!(min_length(&[]).is_err());
    }
}
