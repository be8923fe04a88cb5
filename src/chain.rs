//! Fluent validation chains
//!
//! A [`Chain`] is an immutable sequence of finalized rules plus the
//! modifiers still waiting for the next rule. Every builder method returns
//! a new chain and leaves the receiver untouched, so partially built
//! chains can be shared and extended in different directions without
//! interference.
//!
//! Chains execute under four strategies: [`Chain::test`] for a boolean
//! verdict, [`Chain::check`] for the first failure, [`Chain::test_all`]
//! for every failure, and [`Chain::test_async`] for chains containing
//! asynchronous rules.
//!
//! # Examples
//!
//! ```
//! use verdict::chain;
//! use serde_json::json;
//!
//! let username = chain()
//!     .string()
//!     .min_length(3)
//!     .max_length(12)
//!     .not().includes(" ");
//!
//! assert!(username.test(&json!("ada_lovelace")));
//! assert!(!username.test(&json!("ada lovelace")));
//! assert!(!username.test(&json!("ab")));
//! ```
//!
//! Branching from a shared prefix:
//!
//! ```
//! use verdict::chain;
//! use serde_json::json;
//!
//! let base = chain().number();
//! let small = base.less_than(10);
//! let large = base.greater_than_or_equal(10);
//!
//! assert!(small.test(&json!(5)));
//! assert!(large.test(&json!(50)));
//! assert!(base.test(&json!(5)) && base.test(&json!(50)));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Cause, ValidationError};
use crate::modifier::{EVERY, Modifier, NOT, SOME};
use crate::predicate::Predicate;
use crate::registry::RuleFactory;
use crate::rule::Rule;
use crate::rules::{self, Schema};

/// Create a chain with no custom rules.
///
/// This is the usual entry point; use [`Registry::chain`] when custom
/// rules are in play.
///
/// [`Registry::chain`]: crate::Registry::chain
///
/// # Examples
///
/// ```
/// use verdict::chain;
/// use serde_json::json;
///
/// assert!(chain().number().between(0, 10).test(&json!(7)));
/// ```
pub fn chain() -> Chain {
    Chain::new()
}

/// An immutable, copy-on-write chain of validation rules.
///
/// A chain holds finalized rules and a queue of pending modifiers. A
/// modifier method (`not`, `some`, `every`) only queues; the next rule
/// method consumes the whole queue and composes it around that rule's
/// predicate, first-queued modifier outermost. Pending modifiers that are
/// never followed by a rule have no effect on execution.
#[derive(Clone, Default)]
pub struct Chain {
    rules: Vec<Rule>,
    pending: Vec<&'static Modifier>,
    custom: Arc<HashMap<String, RuleFactory>>,
}

impl Chain {
    /// An empty chain with no custom rules. An empty chain passes every
    /// value.
    pub fn new() -> Self {
        Chain {
            rules: Vec::new(),
            pending: Vec::new(),
            custom: Arc::new(HashMap::new()),
        }
    }

    pub(crate) fn with_custom(custom: Arc<HashMap<String, RuleFactory>>) -> Self {
        Chain {
            rules: Vec::new(),
            pending: Vec::new(),
            custom,
        }
    }

    /// The finalized rules of this chain, in application order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    // ---- modifiers -------------------------------------------------------

    /// Queue a modifier for the next rule.
    pub fn with_modifier(&self, modifier: &'static Modifier) -> Chain {
        let mut next = self.clone();
        next.pending.push(modifier);
        next
    }

    /// Invert the next rule's verdict.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::chain;
    /// use serde_json::json;
    ///
    /// let validation = chain().not().equal(10);
    /// assert!(validation.test(&json!(9)));
    /// assert!(!validation.test(&json!(10)));
    /// ```
    pub fn not(&self) -> Chain {
        self.with_modifier(&NOT)
    }

    /// Require at least one element of a sequence to satisfy the next
    /// rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::chain;
    /// use serde_json::json;
    ///
    /// let validation = chain().some().positive();
    /// assert!(validation.test(&json!([-1, -2, 3])));
    /// assert!(!validation.test(&json!([-1, -2])));
    /// assert!(!validation.test(&json!(3)));
    /// ```
    pub fn some(&self) -> Chain {
        self.with_modifier(&SOME)
    }

    /// Require every element of a sequence to satisfy the next rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::chain;
    /// use serde_json::json;
    ///
    /// let validation = chain().every().positive();
    /// assert!(validation.test(&json!([1, 2, 3])));
    /// assert!(!validation.test(&json!([1, -2, 3])));
    /// ```
    pub fn every(&self) -> Chain {
        self.with_modifier(&EVERY)
    }

    // ---- rule construction ----------------------------------------------

    /// Append a rule by name, resolving custom rules first and built-ins
    /// second.
    ///
    /// An unknown name, or a factory that rejects its arguments, does not
    /// interrupt the builder: the appended rule faults on every
    /// evaluation, so `test` yields false and the error-reporting
    /// strategies record a fault naming the problem.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::chain;
    /// use serde_json::json;
    ///
    /// let validation = chain().rule("between", vec![json!(1), json!(5)]);
    /// assert!(validation.test(&json!(3)));
    ///
    /// let broken = chain().rule("no_such_rule", vec![]);
    /// assert!(!broken.test(&json!(3)));
    /// assert!(broken.check(&json!(3)).unwrap_err().cause().is_some());
    /// ```
    pub fn rule(&self, name: impl Into<String>, args: Vec<Value>) -> Chain {
        let name = name.into();
        let base = self.resolve(&name, &args);
        self.append(name, args, base)
    }

    fn resolve(&self, name: &str, args: &[Value]) -> Predicate {
        let produced = match self.custom.get(name) {
            Some(factory) => factory(args),
            None => match rules::builtin(name) {
                Some(factory) => factory(args),
                None => Err(Cause::fault(format!("unknown rule `{}`", name))),
            },
        };
        produced.unwrap_or_else(Predicate::always_fault)
    }

    fn append(&self, name: String, args: Vec<Value>, base: Predicate) -> Chain {
        let mut next = self.clone();
        let pending = std::mem::take(&mut next.pending);
        next.rules.push(Rule::new(name, args, base, pending));
        next
    }

    /// Append a rule from an explicit predicate, bypassing name
    /// resolution. The queued modifiers apply as usual.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{chain, Predicate};
    /// use serde_json::json;
    ///
    /// let ascii = Predicate::from_fn(|v| v.as_str().map_or(false, |s| s.is_ascii()));
    /// let validation = chain().passes("ascii", vec![], ascii);
    ///
    /// assert!(validation.test(&json!("plain")));
    /// assert!(!validation.test(&json!("héllo")));
    /// ```
    pub fn passes(&self, name: impl Into<String>, args: Vec<Value>, predicate: Predicate) -> Chain {
        self.append(name.into(), args, predicate)
    }

    // ---- type-shape rules -----------------------------------------------

    /// The value is a string.
    pub fn string(&self) -> Chain {
        self.rule("string", vec![])
    }

    /// The value is a number.
    pub fn number(&self) -> Chain {
        self.rule("number", vec![])
    }

    /// The value is a boolean.
    pub fn boolean(&self) -> Chain {
        self.rule("boolean", vec![])
    }

    /// The value is null.
    pub fn null(&self) -> Chain {
        self.rule("null", vec![])
    }

    /// The value is an array.
    pub fn array(&self) -> Chain {
        self.rule("array", vec![])
    }

    /// The value is an object.
    pub fn object(&self) -> Chain {
        self.rule("object", vec![])
    }

    /// The value is a number with no fractional part.
    pub fn integer(&self) -> Chain {
        self.rule("integer", vec![])
    }

    /// The value is a number, or a string that parses as a finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::chain;
    /// use serde_json::json;
    ///
    /// assert!(chain().numeric().test(&json!("12.5")));
    /// assert!(!chain().numeric().test(&json!("twelve")));
    /// ```
    pub fn numeric(&self) -> Chain {
        self.rule("numeric", vec![])
    }

    // ---- value rules -----------------------------------------------------

    /// The value loosely equals the expected one: numbers compare by
    /// numeric value, everything else structurally.
    pub fn equal(&self, expected: impl Into<Value>) -> Chain {
        self.rule("equal", vec![expected.into()])
    }

    /// The value exactly equals the expected one.
    pub fn exact(&self, expected: impl Into<Value>) -> Chain {
        self.rule("exact", vec![expected.into()])
    }

    /// The first element or character equals the expected value.
    pub fn first(&self, expected: impl Into<Value>) -> Chain {
        self.rule("first", vec![expected.into()])
    }

    /// The last element or character equals the expected value.
    pub fn last(&self, expected: impl Into<Value>) -> Chain {
        self.rule("last", vec![expected.into()])
    }

    /// An array contains the expected element, or a string contains the
    /// expected substring.
    pub fn includes(&self, expected: impl Into<Value>) -> Chain {
        self.rule("includes", vec![expected.into()])
    }

    // ---- length rules ----------------------------------------------------

    /// The string or array has length zero.
    pub fn empty(&self) -> Chain {
        self.rule("empty", vec![])
    }

    /// The string or array has exactly this length. String length counts
    /// characters.
    pub fn length(&self, len: usize) -> Chain {
        self.rule("length", vec![len.into()])
    }

    /// The string or array length falls in an inclusive range.
    pub fn length_between(&self, min: usize, max: usize) -> Chain {
        self.rule("length", vec![min.into(), max.into()])
    }

    /// The string or array has at least this length.
    pub fn min_length(&self, min: usize) -> Chain {
        self.rule("min_length", vec![min.into()])
    }

    /// The string or array has at most this length.
    pub fn max_length(&self, max: usize) -> Chain {
        self.rule("max_length", vec![max.into()])
    }

    // ---- ordering rules --------------------------------------------------

    /// The number is strictly negative.
    pub fn negative(&self) -> Chain {
        self.rule("negative", vec![])
    }

    /// The number is zero or greater.
    pub fn positive(&self) -> Chain {
        self.rule("positive", vec![])
    }

    /// The value falls in an inclusive range. Numbers compare numerically,
    /// strings lexicographically.
    pub fn between(&self, lower: impl Into<Value>, upper: impl Into<Value>) -> Chain {
        self.rule("between", vec![lower.into(), upper.into()])
    }

    /// Same as [`Chain::between`], recorded under the name `range`.
    pub fn range(&self, lower: impl Into<Value>, upper: impl Into<Value>) -> Chain {
        self.rule("range", vec![lower.into(), upper.into()])
    }

    /// The value is strictly less than the bound.
    pub fn less_than(&self, bound: impl Into<Value>) -> Chain {
        self.rule("less_than", vec![bound.into()])
    }

    /// The value is less than or equal to the bound.
    pub fn less_than_or_equal(&self, bound: impl Into<Value>) -> Chain {
        self.rule("less_than_or_equal", vec![bound.into()])
    }

    /// The value is strictly greater than the bound.
    pub fn greater_than(&self, bound: impl Into<Value>) -> Chain {
        self.rule("greater_than", vec![bound.into()])
    }

    /// The value is greater than or equal to the bound.
    pub fn greater_than_or_equal(&self, bound: impl Into<Value>) -> Chain {
        self.rule("greater_than_or_equal", vec![bound.into()])
    }

    // ---- pattern rules ---------------------------------------------------

    /// The string matches a regular expression. A malformed pattern makes
    /// the rule fault at execution time.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::chain;
    /// use serde_json::json;
    ///
    /// let hex = chain().pattern("^[0-9a-f]+$");
    /// assert!(hex.test(&json!("deadbeef")));
    /// assert!(!hex.test(&json!("nope!")));
    /// ```
    pub fn pattern(&self, source: impl Into<String>) -> Chain {
        self.rule("pattern", vec![Value::String(source.into())])
    }

    /// The string is lowercase words.
    pub fn lowercase(&self) -> Chain {
        self.rule("lowercase", vec![])
    }

    /// The string is uppercase words.
    pub fn uppercase(&self) -> Chain {
        self.rule("uppercase", vec![])
    }

    /// The string is entirely vowels.
    pub fn vowel(&self) -> Chain {
        self.rule("vowel", vec![])
    }

    /// The string is entirely consonants.
    pub fn consonant(&self) -> Chain {
        self.rule("consonant", vec![])
    }

    // ---- parity rules ----------------------------------------------------

    /// The whole number is even.
    pub fn even(&self) -> Chain {
        self.rule("even", vec![])
    }

    /// The whole number is odd.
    pub fn odd(&self) -> Chain {
        self.rule("odd", vec![])
    }

    // ---- nested validation ----------------------------------------------

    /// The object satisfies a schema of per-field chains.
    ///
    /// Every field's chain runs in collect-all mode against the field's
    /// value (null when the field is missing or the value is not an
    /// object). Each failure is annotated with its field name, and the
    /// collected failures, in field-declaration order, become this rule's
    /// nested cause.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{chain, Schema};
    /// use serde_json::json;
    ///
    /// let validation = chain().schema(
    ///     Schema::new()
    ///         .field("id", chain().number().positive())
    ///         .field("name", chain().string().min_length(1)),
    /// );
    ///
    /// assert!(validation.test(&json!({"id": 1, "name": "Ada"})));
    ///
    /// let err = validation.check(&json!({"id": -1, "name": ""})).unwrap_err();
    /// assert_eq!(err.nested().len(), 2);
    /// assert_eq!(err.nested()[0].target(), Some("id"));
    /// assert_eq!(err.nested()[1].target(), Some("name"));
    /// ```
    pub fn schema(&self, schema: Schema) -> Chain {
        let args = vec![schema.summary()];
        let base = rules::schema_predicate(&schema);
        self.append("schema".into(), args, base)
    }

    /// The value satisfies the inner chain, or is null.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::chain;
    /// use serde_json::json;
    ///
    /// let validation = chain().optional(chain().number().positive());
    /// assert!(validation.test(&json!(null)));
    /// assert!(validation.test(&json!(3)));
    /// assert!(!validation.test(&json!(-3)));
    /// ```
    pub fn optional(&self, inner: Chain) -> Chain {
        let args = vec![Value::String(inner.to_string())];
        let base = rules::optional_predicate(&inner, false);
        self.append("optional".into(), args, base)
    }

    /// The value satisfies the inner chain, or is null, or is a blank
    /// string.
    pub fn optional_or_blank(&self, inner: Chain) -> Chain {
        let args = vec![Value::String(inner.to_string()), Value::Bool(true)];
        let base = rules::optional_predicate(&inner, true);
        self.append("optional".into(), args, base)
    }

    /// The value satisfies at least one of the alternative chains, tried
    /// in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::chain;
    /// use serde_json::json;
    ///
    /// let id = chain().passes_any_of(vec![
    ///     chain().number().positive(),
    ///     chain().string().pattern("^[0-9a-f]{8}$"),
    /// ]);
    ///
    /// assert!(id.test(&json!(42)));
    /// assert!(id.test(&json!("deadbeef")));
    /// assert!(!id.test(&json!(true)));
    /// ```
    pub fn passes_any_of(&self, alternatives: Vec<Chain>) -> Chain {
        let args = alternatives
            .iter()
            .map(|chain| Value::String(chain.to_string()))
            .collect();
        let base = rules::passes_any_of_predicate(&alternatives);
        self.append("passes_any_of".into(), args, base)
    }

    // ---- execution strategies -------------------------------------------

    /// Evaluate every rule and report whether all passed.
    ///
    /// Rules that fault count as failed; `test` never panics and never
    /// distinguishes a fault from a clean false.
    pub fn test(&self, value: &Value) -> bool {
        self.rules.iter().all(|rule| {
            let outcome = rule.eval(value);
            trace_outcome(rule, &outcome);
            matches!(outcome, Ok(true))
        })
    }

    /// Evaluate rules in order and stop at the first failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::chain;
    /// use serde_json::json;
    ///
    /// let validation = chain().number().between(0, 10);
    ///
    /// assert!(validation.check(&json!(7)).is_ok());
    ///
    /// let err = validation.check(&json!(11)).unwrap_err();
    /// assert_eq!(err.rule().name(), "between");
    /// assert_eq!(err.value(), &json!(11));
    /// ```
    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        for rule in &self.rules {
            let outcome = rule.eval(value);
            trace_outcome(rule, &outcome);
            match outcome {
                Ok(true) => {}
                Ok(false) => return Err(ValidationError::new(rule.clone(), value.clone())),
                Err(cause) => {
                    return Err(ValidationError::new(rule.clone(), value.clone()).with_cause(cause))
                }
            }
        }
        Ok(())
    }

    /// Evaluate every rule and collect every failure, in rule order.
    ///
    /// An empty result means the value passed. Unlike [`Chain::check`],
    /// later rules still run after an earlier one fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::chain;
    /// use serde_json::json;
    ///
    /// let validation = chain().string().min_length(3);
    /// let failures = validation.test_all(&json!(7));
    ///
    /// assert_eq!(failures.len(), 2);
    /// assert_eq!(failures[0].rule().name(), "string");
    /// assert_eq!(failures[1].rule().name(), "min_length");
    /// ```
    pub fn test_all(&self, value: &Value) -> Vec<ValidationError> {
        let mut failures = Vec::new();
        for rule in &self.rules {
            let outcome = rule.eval(value);
            trace_outcome(rule, &outcome);
            match outcome {
                Ok(true) => {}
                Ok(false) => failures.push(ValidationError::new(rule.clone(), value.clone())),
                Err(cause) => failures
                    .push(ValidationError::new(rule.clone(), value.clone()).with_cause(cause)),
            }
        }
        failures
    }

    /// Evaluate rules strictly one at a time, awaiting each verdict before
    /// starting the next rule, and stop at the first failure.
    ///
    /// On success the original value is returned, which makes the result
    /// convenient to feed onward. Synchronous rules participate through
    /// their lifted futures, so mixed chains run under this strategy
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{chain, Predicate};
    /// use serde_json::json;
    ///
    /// let validation = chain().number().passes(
    ///     "registered",
    ///     vec![],
    ///     Predicate::from_future(|value| async move {
    ///         Ok(value.as_i64() == Some(42))
    ///     }),
    /// );
    ///
    /// tokio_test::block_on(async {
    ///     assert_eq!(validation.test_async(json!(42)).await.unwrap(), json!(42));
    ///
    ///     let err = validation.test_async(json!(41)).await.unwrap_err();
    ///     assert_eq!(err.rule().name(), "registered");
    /// });
    /// ```
    pub async fn test_async(&self, value: Value) -> Result<Value, ValidationError> {
        for rule in &self.rules {
            let outcome = rule.eval_future(&value).await;
            trace_outcome(rule, &outcome);
            match outcome {
                Ok(true) => {}
                Ok(false) => return Err(ValidationError::new(rule.clone(), value)),
                Err(cause) => {
                    return Err(ValidationError::new(rule.clone(), value).with_cause(cause))
                }
            }
        }
        Ok(value)
    }

    /// Collect every failure through the asynchronous channel, one rule at
    /// a time. Used by nested validation under `test_async`.
    pub(crate) async fn collect_failures_future(&self, value: &Value) -> Vec<ValidationError> {
        let mut failures = Vec::new();
        for rule in &self.rules {
            let outcome = rule.eval_future(value).await;
            trace_outcome(rule, &outcome);
            match outcome {
                Ok(true) => {}
                Ok(false) => failures.push(ValidationError::new(rule.clone(), value.clone())),
                Err(cause) => failures
                    .push(ValidationError::new(rule.clone(), value.clone()).with_cause(cause)),
            }
        }
        failures
    }
}

impl fmt::Display for Chain {
    /// Renders the chain the way it was built, e.g.
    /// `number().not.equal(10)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("rules", &self.rules)
            .field("pending", &self.pending)
            .field("custom", &self.custom.len())
            .finish()
    }
}

#[cfg(feature = "tracing")]
fn trace_outcome(rule: &Rule, outcome: &Result<bool, Cause>) {
    match outcome {
        Ok(true) => tracing::trace!(rule = %rule, "rule passed"),
        Ok(false) => tracing::debug!(rule = %rule, "rule failed"),
        Err(cause) => tracing::debug!(rule = %rule, %cause, "rule faulted"),
    }
}

#[cfg(not(feature = "tracing"))]
fn trace_outcome(_rule: &Rule, _outcome: &Result<bool, Cause>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_chain_passes_everything() {
        assert!(chain().test(&json!(null)));
        assert!(chain().check(&json!([1, 2])).is_ok());
        assert!(chain().test_all(&json!("x")).is_empty());
    }

    #[test]
    fn test_builder_leaves_receiver_untouched() {
        let a = chain().number();
        let b = a.not().equal(10);

        assert_eq!(a.rules().len(), 1);
        assert_eq!(b.rules().len(), 2);
        assert!(a.test(&json!(10)));
        assert!(!b.test(&json!(10)));
    }

    #[test]
    fn test_pending_modifier_without_rule_is_inert() {
        let armed = chain().number().not();
        assert_eq!(armed.rules().len(), 1);
        assert!(armed.test(&json!(5)));
        // The queued modifier still applies to the next rule.
        assert!(!armed.equal(5).test(&json!(5)));
    }

    #[test]
    fn test_modifier_queue_drains_per_rule() {
        let validation = chain().not().even().odd();
        // `not` applies to `even` only; `odd` is unmodified.
        assert!(validation.test(&json!(3)));
        assert!(!validation.test(&json!(2)));
    }

    #[test]
    fn test_rules_apply_in_order() {
        let failures = chain().string().lowercase().test_all(&json!(5));
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].rule().name(), "string");
        assert_eq!(failures[1].rule().name(), "lowercase");
    }

    #[test]
    fn test_check_reports_first_failure_only() {
        let err = chain().string().lowercase().check(&json!(5)).unwrap_err();
        assert_eq!(err.rule().name(), "string");
    }

    #[test]
    fn test_quantifier_truth_table() {
        assert!(chain().not().every().even().test(&json!([2, 3, 4])));
        assert!(!chain().not().every().even().test(&json!([2, 4, 6])));

        assert!(chain().every().not().even().test(&json!([1, 3, 5])));
        assert!(!chain().every().not().even().test(&json!([1, 2, 3])));

        assert!(chain().some().not().exact(2).test(&json!([2, 2, 3])));
        assert!(!chain().some().not().exact(2).test(&json!([2, 2, 2])));

        assert!(!chain().not().some().exact(2).test(&json!([2, 3, 3])));
        assert!(chain().not().some().exact(2).test(&json!([3, 3, 3])));
    }

    #[test]
    fn test_double_negation() {
        let validation = chain().not().not().equal(5);
        assert!(validation.test(&json!(5)));
        assert!(!validation.test(&json!(6)));
    }

    #[test]
    fn test_quantifier_on_scalar_with_outer_not() {
        // The quantifier itself yields false on a non-sequence; the outer
        // `not` then inverts it.
        assert!(!chain().some().even().test(&json!(4)));
        assert!(chain().not().some().even().test(&json!(4)));
    }

    #[test]
    fn test_unknown_rule_faults_at_execution() {
        let broken = chain().rule("nope", vec![]);
        assert!(!broken.test(&json!(1)));
        let err = broken.check(&json!(1)).unwrap_err();
        assert_eq!(err.rule().name(), "nope");
        let fault = err.cause().and_then(Cause::as_fault).unwrap();
        assert!(fault.contains("unknown rule"));
    }

    #[test]
    fn test_invalid_pattern_faults_at_execution() {
        let broken = chain().pattern("(unclosed");
        assert!(!broken.test(&json!("x")));
        let failures = broken.test_all(&json!("x"));
        assert!(failures[0].cause().is_some());
    }

    #[test]
    fn test_async_rule_faults_under_sync_strategies() {
        let validation = chain().passes(
            "deferred",
            vec![],
            Predicate::from_future(|_| async move { Ok(true) }),
        );
        assert!(!validation.test(&json!(1)));
        let err = validation.check(&json!(1)).unwrap_err();
        let fault = err.cause().and_then(Cause::as_fault).unwrap();
        assert!(fault.contains("test_async"));
    }

    #[test]
    fn test_check_value_is_the_root_value() {
        let err = chain().every().even().check(&json!([2, 3])).unwrap_err();
        assert_eq!(err.value(), &json!([2, 3]));
        assert_eq!(err.rule().to_string(), "every.even()");
    }

    #[test]
    fn test_display_round_trips_structure() {
        let validation = chain().number().not().between(1, 5);
        assert_eq!(validation.to_string(), "number().not.between(1, 5)");
    }

    #[test]
    fn test_strings_quantify_over_characters() {
        assert!(chain().every().vowel().test(&json!("aeiou")));
        assert!(!chain().every().vowel().test(&json!("aeix")));
        assert!(chain().some().vowel().test(&json!("xyz a")));
    }

    #[test]
    fn test_passes_appends_inline_predicate() {
        let validation = chain()
            .not()
            .passes("always", vec![], Predicate::from_fn(|_| true));
        assert!(!validation.test(&json!(1)));
        assert_eq!(validation.rules()[0].to_string(), "not.always()");
    }

    #[test]
    fn test_async_matches_sync_for_lifted_chains() {
        let validation = chain().number().not().equal(10);
        for value in [json!(9), json!(10), json!("x")] {
            let sync_verdict = validation.test(&value);
            let async_verdict =
                tokio_test::block_on(validation.test_async(value.clone())).is_ok();
            assert_eq!(sync_verdict, async_verdict);
        }
    }

    #[test]
    fn test_test_async_returns_original_value() {
        let outcome = tokio_test::block_on(chain().number().test_async(json!(5)));
        assert_eq!(outcome.unwrap(), json!(5));
    }
}
