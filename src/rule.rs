//! Rule records
//!
//! A [`Rule`] is one appended entry of a chain: the rule's name, the
//! arguments it was built with, the modifiers that were pending when it was
//! appended, and the fully composed predicate those modifiers produced.
//! Rules are immutable once built; execution strategies only read them.

use std::fmt;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::Cause;
use crate::modifier::{compose, Modifier};
use crate::predicate::Predicate;

/// One named, parameterized validation step of a chain.
///
/// The stored predicate is already wrapped by the rule's modifiers, so
/// evaluating a rule never needs to consult the modifier list again. The
/// name, arguments, and modifiers are kept purely for diagnostics: they are
/// what failure records and [`fmt::Display`] render.
///
/// # Examples
///
/// ```
/// use verdict::chain;
/// use serde_json::json;
///
/// let validation = chain().not().every().even();
/// let rule = &validation.rules()[0];
///
/// assert_eq!(rule.name(), "even");
/// assert!(rule.args().is_empty());
/// assert_eq!(rule.modifiers().len(), 2);
/// assert_eq!(rule.modifiers()[0].name(), "not");
/// assert_eq!(rule.to_string(), "not.every.even()");
/// ```
#[derive(Clone, Debug)]
pub struct Rule {
    name: String,
    args: Vec<Value>,
    predicate: Predicate,
    modifiers: Vec<&'static Modifier>,
}

impl Rule {
    /// Build a rule by composing the pending modifiers around a base
    /// predicate, first-chained modifier outermost.
    pub(crate) fn new(
        name: String,
        args: Vec<Value>,
        base: Predicate,
        modifiers: Vec<&'static Modifier>,
    ) -> Self {
        let predicate = compose(base, &modifiers);
        Rule {
            name,
            args,
            predicate,
            modifiers,
        }
    }

    /// The rule's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The arguments the rule was parameterized with.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// The modifiers applied to this rule, in the order they were chained.
    pub fn modifiers(&self) -> &[&'static Modifier] {
        &self.modifiers
    }

    /// The fully composed predicate, modifiers included.
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub(crate) fn eval(&self, value: &Value) -> Result<bool, Cause> {
        self.predicate.eval(value)
    }

    pub(crate) fn eval_future(&self, value: &Value) -> BoxFuture<'static, Result<bool, Cause>> {
        self.predicate.eval_future(value.clone())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}.", modifier.name())?;
        }
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{EVERY, NOT};
    use serde_json::json;

    fn even() -> Predicate {
        Predicate::from_fn(|v| v.as_i64().map_or(false, |n| n % 2 == 0))
    }

    #[test]
    fn test_rule_composes_modifiers_at_construction() {
        let rule = Rule::new("even".into(), vec![], even(), vec![&NOT, &EVERY]);
        assert!(rule.eval(&json!([2, 3, 4])).unwrap());
        assert!(!rule.eval(&json!([2, 4, 6])).unwrap());
    }

    #[test]
    fn test_display_without_modifiers_or_args() {
        let rule = Rule::new("even".into(), vec![], even(), vec![]);
        assert_eq!(rule.to_string(), "even()");
    }

    #[test]
    fn test_display_renders_args_as_json() {
        let rule = Rule::new(
            "between".into(),
            vec![json!(1), json!("five")],
            even(),
            vec![],
        );
        assert_eq!(rule.to_string(), "between(1, \"five\")");
    }

    #[test]
    fn test_display_prefixes_modifiers_in_chained_order() {
        let rule = Rule::new("even".into(), vec![], even(), vec![&NOT, &EVERY]);
        assert_eq!(rule.to_string(), "not.every.even()");
    }

    #[test]
    fn test_future_channel_survives_composition() {
        let rule = Rule::new("even".into(), vec![], even(), vec![&NOT]);
        let verdict = tokio_test::block_on(rule.eval_future(&json!(3)));
        assert!(verdict.unwrap());
    }
}
