//! Parity rules.
//!
//! Parity is defined for whole numbers only; fractional numbers and
//! non-numbers fail both rules. Negative numbers carry the parity of their
//! magnitude, so `-3` is odd.

use serde_json::Value;

use crate::error::Cause;
use crate::predicate::Predicate;

fn parity(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n % 2);
    }
    if let Some(n) = value.as_i64() {
        return Some(n.rem_euclid(2) as u64);
    }
    let n = value.as_f64()?;
    if n.fract() != 0.0 {
        return None;
    }
    Some((n.abs() % 2.0) as u64)
}

pub(crate) fn even(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(|value| parity(value) == Some(0)))
}

pub(crate) fn odd(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(|value| parity(value) == Some(1)))
}
