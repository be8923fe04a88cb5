//! Validation failure records
//!
//! This module provides [`ValidationError`], the structured record produced
//! when a rule does not pass, and [`Cause`], which distinguishes a predicate
//! that faulted while evaluating from a nested-schema validation that
//! collected child failures.
//!
//! # Examples
//!
//! ```
//! use verdict::chain;
//! use serde_json::json;
//!
//! let errors = chain().number().positive().test_all(&json!("nope"));
//!
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors[0].rule().name(), "number");
//! assert_eq!(errors[0].value(), &json!("nope"));
//! assert!(errors[0].cause().is_none());
//! ```

use std::error::Error as StdError;
use std::fmt;

use serde_json::Value;

use crate::rule::Rule;

/// Why a rule did not produce a clean pass.
///
/// A plain rule failure (the predicate evaluated to false) carries no cause
/// at all; `Cause` only appears when something richer happened while the
/// predicate was running.
///
/// # Examples
///
/// ```
/// use verdict::{chain, Cause};
/// use serde_json::json;
///
/// // An invalid pattern surfaces as a fault at execution time.
/// let errors = chain().pattern("(unclosed").test_all(&json!("abc"));
/// assert!(matches!(errors[0].cause(), Some(Cause::Fault(_))));
/// ```
#[derive(Clone, Debug)]
pub enum Cause {
    /// The predicate raised while evaluating: a malformed pattern, an
    /// async-only predicate invoked by a synchronous strategy, an unknown
    /// rule name, or an error reported by a custom predicate.
    Fault(String),
    /// A nested-schema predicate collected one or more child failures, in
    /// field-declaration order, each annotated with the field that produced
    /// it.
    Nested(Vec<ValidationError>),
}

impl Cause {
    /// Build a fault cause from a message.
    ///
    /// Custom predicates use this to report that they could not evaluate
    /// the value at all, as opposed to evaluating it to false.
    pub fn fault(message: impl Into<String>) -> Self {
        Cause::Fault(message.into())
    }

    /// The fault message, if this cause is a fault.
    pub fn as_fault(&self) -> Option<&str> {
        match self {
            Cause::Fault(message) => Some(message),
            Cause::Nested(_) => None,
        }
    }

    /// The child failures, if this cause aggregates a nested validation.
    pub fn as_nested(&self) -> Option<&[ValidationError]> {
        match self {
            Cause::Fault(_) => None,
            Cause::Nested(errors) => Some(errors),
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Fault(message) => write!(f, "{}", message),
            Cause::Nested(errors) => write!(f, "{} nested failure(s)", errors.len()),
        }
    }
}

/// The failure record produced when a rule does not pass.
///
/// A `ValidationError` binds the failing [`Rule`], the exact value the
/// failing predicate received (for nested validation this is the field
/// value, not the root), an optional [`Cause`], and an optional `target`
/// naming the schema field that produced it.
///
/// Errors are constructed by the execution strategies at the moment a rule
/// is determined to have failed or faulted, and are never mutated after
/// construction.
///
/// # Examples
///
/// ```
/// use verdict::chain;
/// use serde_json::json;
///
/// let err = chain().equal(1).check(&json!(2)).unwrap_err();
///
/// assert_eq!(err.rule().name(), "equal");
/// assert_eq!(err.rule().args(), &[json!(1)]);
/// assert_eq!(err.value(), &json!(2));
/// assert!(err.cause().is_none());
/// assert!(err.target().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ValidationError {
    rule: Rule,
    value: Value,
    cause: Option<Cause>,
    target: Option<String>,
}

impl ValidationError {
    pub(crate) fn new(rule: Rule, value: Value) -> Self {
        ValidationError {
            rule,
            value,
            cause: None,
            target: None,
        }
    }

    pub(crate) fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    pub(crate) fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// The rule that failed.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// The exact input the failing predicate received.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The fault or nested failures behind this error, when the rule did
    /// not simply evaluate to false.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// The schema field this failure was collected under, when the error
    /// was produced inside a nested validation.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// The child failures of a nested validation, or an empty slice when
    /// this error carries none.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{chain, Schema};
    /// use serde_json::json;
    ///
    /// let validation = chain().schema(Schema::new().field("id", chain().number()));
    /// let err = validation.check(&json!({"id": "x"})).unwrap_err();
    ///
    /// assert_eq!(err.nested().len(), 1);
    /// assert_eq!(err.nested()[0].target(), Some("id"));
    /// ```
    pub fn nested(&self) -> &[ValidationError] {
        match &self.cause {
            Some(Cause::Nested(errors)) => errors,
            _ => &[],
        }
    }

    /// Total number of failures in this record, counting itself and every
    /// nested failure recursively.
    pub fn total_count(&self) -> usize {
        1 + self
            .nested()
            .iter()
            .map(ValidationError::total_count)
            .sum::<usize>()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule `{}` failed", self.rule)?;
        if let Some(target) = &self.target {
            write!(f, " at `{}`", target)?;
        }
        write!(f, " for value {}", self.value)?;
        match &self.cause {
            Some(Cause::Fault(message)) => write!(f, " (fault: {})", message)?,
            Some(Cause::Nested(errors)) => {
                for (i, error) in errors.iter().enumerate() {
                    write!(f, "\n  {}. {}", i + 1, error)?;
                }
            }
            None => {}
        }
        Ok(())
    }
}

impl StdError for ValidationError {}
