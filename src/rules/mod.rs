//! Built-in rule vocabulary
//!
//! Each built-in rule is a factory: given the arguments the chain was
//! called with, it produces the rule's base [`Predicate`] or a [`Cause`]
//! describing why it could not (a missing argument, a malformed pattern).
//! Factory errors never escape the builder; the chain bakes them into an
//! always-faulting predicate so they surface at execution time instead.
//!
//! The chain-parameterized rules (`schema`, `optional`, `passes_any_of`)
//! live in [`schema`] and are wired directly by their typed builder
//! methods rather than through the name table.

mod divisibility;
mod length;
mod pattern;
mod range;
mod schema;
mod types;
mod value;

pub use schema::Schema;

pub(crate) use schema::{optional_predicate, passes_any_of_predicate, schema_predicate};

use serde_json::Value;

use crate::error::Cause;
use crate::predicate::Predicate;

/// A built-in rule factory: arguments in, base predicate out.
pub(crate) type BuiltinFactory = fn(&[Value]) -> Result<Predicate, Cause>;

/// Look up a built-in rule factory by name.
pub(crate) fn builtin(name: &str) -> Option<BuiltinFactory> {
    Some(match name {
        "string" => types::string,
        "number" => types::number,
        "boolean" => types::boolean,
        "null" => types::null,
        "array" => types::array,
        "object" => types::object,
        "integer" => types::integer,
        "numeric" => types::numeric,
        "equal" => value::equal,
        "exact" => value::exact,
        "first" => value::first,
        "last" => value::last,
        "includes" => value::includes,
        "empty" => length::empty,
        "length" => length::length,
        "min_length" => length::min_length,
        "max_length" => length::max_length,
        "negative" => range::negative,
        "positive" => range::positive,
        "between" => range::between,
        "range" => range::range,
        "less_than" => range::less_than,
        "less_than_or_equal" => range::less_than_or_equal,
        "greater_than" => range::greater_than,
        "greater_than_or_equal" => range::greater_than_or_equal,
        "pattern" => pattern::pattern,
        "lowercase" => pattern::lowercase,
        "uppercase" => pattern::uppercase,
        "vowel" => pattern::vowel,
        "consonant" => pattern::consonant,
        "even" => divisibility::even,
        "odd" => divisibility::odd,
        _ => return None,
    })
}

/// Fetch a required argument, faulting with the rule's name when absent.
fn require_arg<'a>(rule: &str, args: &'a [Value], index: usize) -> Result<&'a Value, Cause> {
    args.get(index)
        .ok_or_else(|| Cause::fault(format!("{}: missing argument {}", rule, index)))
}

/// Fetch a required non-negative integer argument.
fn usize_arg(rule: &str, args: &[Value], index: usize) -> Result<usize, Cause> {
    require_arg(rule, args, index)?
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| {
            Cause::fault(format!(
                "{}: argument {} must be a non-negative integer",
                rule, index
            ))
        })
}

/// Loose equality: numbers compare by numeric value regardless of their
/// JSON representation, everything else compares structurally.
pub(crate) fn loosely_equal(left: &Value, right: &Value) -> bool {
    if left.is_number() && right.is_number() {
        left.as_f64() == right.as_f64()
    } else {
        left == right
    }
}
