//! Ordering rules: sign, bounds, and ranges.
//!
//! Numbers compare numerically and strings compare lexicographically; a
//! value and bound of different kinds are unordered and fail the rule.

use std::cmp::Ordering;

use serde_json::Value;

use super::require_arg;
use crate::error::Cause;
use crate::predicate::Predicate;

fn compare(value: &Value, bound: &Value) -> Option<Ordering> {
    match (value, bound) {
        (Value::Number(_), Value::Number(_)) => {
            let left = value.as_f64()?;
            let right = bound.as_f64()?;
            left.partial_cmp(&right)
        }
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

pub(crate) fn negative(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(|value| {
        value.as_f64().is_some_and(|n| n < 0.0)
    }))
}

/// Zero counts as positive.
pub(crate) fn positive(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(|value| {
        value.as_f64().is_some_and(|n| n >= 0.0)
    }))
}

/// Inclusive on both bounds.
pub(crate) fn between(args: &[Value]) -> Result<Predicate, Cause> {
    bounded("between", args)
}

/// Same as `between`; kept as a separate name for diagnostics.
pub(crate) fn range(args: &[Value]) -> Result<Predicate, Cause> {
    bounded("range", args)
}

fn bounded(rule: &str, args: &[Value]) -> Result<Predicate, Cause> {
    let lower = require_arg(rule, args, 0)?.clone();
    let upper = require_arg(rule, args, 1)?.clone();
    Ok(Predicate::from_fn(move |value| {
        matches!(
            compare(value, &lower),
            Some(Ordering::Greater | Ordering::Equal)
        ) && matches!(compare(value, &upper), Some(Ordering::Less | Ordering::Equal))
    }))
}

pub(crate) fn less_than(args: &[Value]) -> Result<Predicate, Cause> {
    let bound = require_arg("less_than", args, 0)?.clone();
    Ok(Predicate::from_fn(move |value| {
        matches!(compare(value, &bound), Some(Ordering::Less))
    }))
}

pub(crate) fn less_than_or_equal(args: &[Value]) -> Result<Predicate, Cause> {
    let bound = require_arg("less_than_or_equal", args, 0)?.clone();
    Ok(Predicate::from_fn(move |value| {
        matches!(
            compare(value, &bound),
            Some(Ordering::Less | Ordering::Equal)
        )
    }))
}

pub(crate) fn greater_than(args: &[Value]) -> Result<Predicate, Cause> {
    let bound = require_arg("greater_than", args, 0)?.clone();
    Ok(Predicate::from_fn(move |value| {
        matches!(compare(value, &bound), Some(Ordering::Greater))
    }))
}

pub(crate) fn greater_than_or_equal(args: &[Value]) -> Result<Predicate, Cause> {
    let bound = require_arg("greater_than_or_equal", args, 0)?.clone();
    Ok(Predicate::from_fn(move |value| {
        matches!(
            compare(value, &bound),
            Some(Ordering::Greater | Ordering::Equal)
        )
    }))
}
