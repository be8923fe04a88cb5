//! Pattern rules over strings.
//!
//! Non-string values fail every pattern rule. A malformed user-supplied
//! pattern is reported as a construction fault, which the chain defers to
//! execution time.

use regex::Regex;
use serde_json::Value;

use super::require_arg;
use crate::error::Cause;
use crate::predicate::Predicate;

fn match_pattern(source: &str) -> Result<Predicate, Cause> {
    let re = Regex::new(source)
        .map_err(|err| Cause::fault(format!("pattern: invalid regular expression: {}", err)))?;
    Ok(Predicate::from_fn(move |value| {
        value.as_str().is_some_and(|s| re.is_match(s))
    }))
}

pub(crate) fn pattern(args: &[Value]) -> Result<Predicate, Cause> {
    let source = require_arg("pattern", args, 0)?
        .as_str()
        .ok_or_else(|| Cause::fault("pattern: argument must be a string"))?
        .to_owned();
    match_pattern(&source)
}

/// Lowercase words separated by optional whitespace.
pub(crate) fn lowercase(_args: &[Value]) -> Result<Predicate, Cause> {
    match_pattern(r"^([a-z]+\s*)+$")
}

/// Uppercase words separated by optional whitespace.
pub(crate) fn uppercase(_args: &[Value]) -> Result<Predicate, Cause> {
    match_pattern(r"^([A-Z]+\s*)+$")
}

/// Entirely vowels, case-insensitive.
pub(crate) fn vowel(_args: &[Value]) -> Result<Predicate, Cause> {
    match_pattern(r"^(?i)[aeiou]+$")
}

/// Entirely consonants, case-insensitive.
pub(crate) fn consonant(_args: &[Value]) -> Result<Predicate, Cause> {
    match_pattern(r"^(?i)[b-df-hj-np-tv-z]+$")
}
