//! Type-shape rules: what kind of JSON value is this?

use serde_json::Value;

use crate::error::Cause;
use crate::predicate::Predicate;

pub(crate) fn string(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(Value::is_string))
}

pub(crate) fn number(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(Value::is_number))
}

pub(crate) fn boolean(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(Value::is_boolean))
}

pub(crate) fn null(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(Value::is_null))
}

pub(crate) fn array(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(Value::is_array))
}

pub(crate) fn object(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(Value::is_object))
}

/// A number with no fractional part. `2.0` counts; `2.5` does not.
pub(crate) fn integer(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(|value| {
        value.as_f64().is_some_and(|n| n.fract() == 0.0)
    }))
}

/// A number, or a string that parses as a finite number.
pub(crate) fn numeric(_args: &[Value]) -> Result<Predicate, Cause> {
    Ok(Predicate::from_fn(|value| {
        value.is_number()
            || value
                .as_str()
                .is_some_and(|s| s.trim().parse::<f64>().is_ok_and(f64::is_finite))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn passes(factory: super::super::BuiltinFactory, value: Value) -> bool {
        factory(&[]).unwrap().eval(&value).unwrap()
    }

    #[test]
    fn test_shape_rules_match_their_shape_only() {
        assert!(passes(string, json!("hi")));
        assert!(!passes(string, json!(1)));
        assert!(passes(number, json!(1.5)));
        assert!(!passes(number, json!("1.5")));
        assert!(passes(boolean, json!(false)));
        assert!(passes(null, json!(null)));
        assert!(!passes(null, json!(0)));
        assert!(passes(array, json!([])));
        assert!(passes(object, json!({})));
        assert!(!passes(object, json!([])));
    }

    #[test]
    fn test_integer_accepts_whole_floats() {
        assert!(passes(integer, json!(2)));
        assert!(passes(integer, json!(2.0)));
        assert!(passes(integer, json!(-7)));
        assert!(!passes(integer, json!(2.5)));
        assert!(!passes(integer, json!("2")));
    }

    #[test]
    fn test_numeric_accepts_number_like_strings() {
        assert!(passes(numeric, json!(10)));
        assert!(passes(numeric, json!("10")));
        assert!(passes(numeric, json!(" -3.5 ")));
        assert!(passes(numeric, json!("1e3")));
        assert!(!passes(numeric, json!("ten")));
        assert!(!passes(numeric, json!("")));
        assert!(!passes(numeric, json!("Infinity")));
        assert!(!passes(numeric, json!(null)));
    }
}
