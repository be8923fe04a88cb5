//! Predicate evaluation channels
//!
//! A [`Predicate`] is the evaluatable core of a rule. Every predicate can
//! be driven by the asynchronous strategy; predicates built from plain
//! functions can additionally be driven synchronously. The two channels are
//! kept side by side so that modifiers can wrap both of them and a chain
//! stays executable under every strategy it supports.
//!
//! # Examples
//!
//! ```
//! use verdict::Predicate;
//! use serde_json::json;
//!
//! let even = Predicate::from_fn(|value| {
//!     value.as_i64().map_or(false, |n| n % 2 == 0)
//! });
//!
//! assert!(!even.is_async());
//! assert!(even.eval(&json!(4)).unwrap());
//! assert!(!even.eval(&json!(3)).unwrap());
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::Cause;

/// The synchronous evaluation channel: borrows the value, returns a verdict
/// or a fault.
pub type SimpleFn = Arc<dyn Fn(&Value) -> Result<bool, Cause> + Send + Sync>;

/// The asynchronous evaluation channel: takes the value by ownership and
/// returns a boxed future resolving to a verdict or a fault.
pub type FutureFn = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<bool, Cause>> + Send + Sync>;

/// An evaluatable predicate with a mandatory asynchronous channel and an
/// optional synchronous one.
///
/// Predicates built with [`Predicate::from_fn`] or
/// [`Predicate::from_try_fn`] carry both channels; the asynchronous one is
/// derived by lifting the synchronous function into an immediately-ready
/// future. Predicates built with [`Predicate::from_future`] carry only the
/// asynchronous channel, and fault when a synchronous strategy reaches
/// them.
///
/// Cloning a predicate is cheap: both channels are reference counted.
#[derive(Clone)]
pub struct Predicate {
    pub(crate) simple: Option<SimpleFn>,
    pub(crate) future: FutureFn,
}

impl Predicate {
    /// Build a predicate from an infallible function.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Predicate;
    /// use serde_json::json;
    ///
    /// let null = Predicate::from_fn(|value| value.is_null());
    /// assert!(null.eval(&json!(null)).unwrap());
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::from_try_fn(move |value| Ok(f(value)))
    }

    /// Build a predicate from a function that can fault.
    ///
    /// Returning [`Cause::Fault`] marks the evaluation as an execution
    /// error rather than a clean false, which every strategy records
    /// distinctly from a plain failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{Cause, Predicate};
    /// use serde_json::json;
    ///
    /// let strict_int = Predicate::from_try_fn(|value| {
    ///     value
    ///         .as_i64()
    ///         .map(|n| n > 0)
    ///         .ok_or_else(|| Cause::fault("not an integer"))
    /// });
    ///
    /// assert!(strict_int.eval(&json!(3)).unwrap());
    /// assert!(strict_int.eval(&json!("3")).is_err());
    /// ```
    pub fn from_try_fn<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, Cause> + Send + Sync + 'static,
    {
        let simple: SimpleFn = Arc::new(f);
        let lifted = Arc::clone(&simple);
        let future: FutureFn = Arc::new(move |value| {
            let outcome = lifted(&value);
            Box::pin(async move { outcome })
        });
        Predicate {
            simple: Some(simple),
            future,
        }
    }

    /// Build an asynchronous-only predicate from a future-returning
    /// function.
    ///
    /// The resulting predicate evaluates under [`Chain::test_async`] only;
    /// the synchronous strategies record a fault when they reach it.
    ///
    /// [`Chain::test_async`]: crate::Chain::test_async
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Predicate;
    /// use serde_json::json;
    ///
    /// let lookup = Predicate::from_future(|value| async move {
    ///     Ok(value.as_str() == Some("known"))
    /// });
    ///
    /// assert!(lookup.is_async());
    /// let verdict = tokio_test::block_on(lookup.eval_future(json!("known")));
    /// assert!(verdict.unwrap());
    /// ```
    pub fn from_future<F, Fut>(f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, Cause>> + Send + 'static,
    {
        let future: FutureFn = Arc::new(move |value| Box::pin(f(value)));
        Predicate {
            simple: None,
            future,
        }
    }

    /// Build a predicate from explicit channels.
    ///
    /// This is the low-level constructor used by predicates whose two
    /// channels genuinely differ, such as nested-schema evaluation where
    /// the asynchronous channel must await child rules.
    pub fn from_channels(simple: SimpleFn, future: FutureFn) -> Self {
        Predicate {
            simple: Some(simple),
            future,
        }
    }

    /// Build a predicate that faults with the given cause on every
    /// evaluation.
    ///
    /// Chains use this to defer construction-time errors, such as an
    /// unknown rule name, to execution time without breaking the fluent
    /// builder.
    pub fn always_fault(cause: Cause) -> Self {
        Self::from_try_fn(move |_| Err(cause.clone()))
    }

    /// Whether this predicate carries only the asynchronous channel.
    pub fn is_async(&self) -> bool {
        self.simple.is_none()
    }

    /// Evaluate the synchronous channel.
    ///
    /// Faults when this predicate is asynchronous-only.
    pub fn eval(&self, value: &Value) -> Result<bool, Cause> {
        match &self.simple {
            Some(f) => f(value),
            None => Err(Cause::fault(
                "asynchronous predicate reached by a synchronous strategy; use test_async",
            )),
        }
    }

    /// Evaluate the asynchronous channel.
    ///
    /// Always available: synchronous predicates are lifted into
    /// immediately-ready futures at construction time.
    pub fn eval_future(&self, value: Value) -> BoxFuture<'static, Result<bool, Cause>> {
        (self.future)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("simple", &self.simple.as_ref().map(|_| "<fn>"))
            .field("future", &"<fn>")
            .finish()
    }
}
