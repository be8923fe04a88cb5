//! Predicate modifiers
//!
//! A [`Modifier`] is a named transformation applied to a predicate at the
//! moment a rule is appended to a chain. Modifiers queue up in the order
//! they were chained and wrap the rule's predicate from the inside out, so
//! the first modifier named becomes the outermost layer:
//! `not().every().even()` means "not (every element even)", while
//! `every().not().even()` means "every element (not even)".
//!
//! # Examples
//!
//! ```
//! use verdict::chain;
//! use serde_json::json;
//!
//! assert!(chain().not().every().even().test(&json!([2, 3, 4])));
//! assert!(!chain().every().not().even().test(&json!([2, 3, 4])));
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::predicate::{FutureFn, Predicate, SimpleFn};

/// A named transformation over both evaluation channels of a predicate.
///
/// The three built-in modifiers are exposed as the statics [`NOT`],
/// [`SOME`], and [`EVERY`]; chains refer to them by reference, so modifier
/// identity is stable and cheap to store.
pub struct Modifier {
    name: &'static str,
    wrap_simple: fn(SimpleFn) -> SimpleFn,
    wrap_future: fn(FutureFn) -> FutureFn,
}

impl Modifier {
    /// The modifier's name as it appears in rule diagnostics, e.g. the
    /// `not` in `not.even()`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Look up a built-in modifier by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Modifier;
    ///
    /// assert_eq!(Modifier::by_name("some").unwrap().name(), "some");
    /// assert!(Modifier::by_name("maybe").is_none());
    /// ```
    pub fn by_name(name: &str) -> Option<&'static Modifier> {
        match name {
            "not" => Some(&NOT),
            "some" => Some(&SOME),
            "every" => Some(&EVERY),
            _ => None,
        }
    }

    /// Wrap a predicate, transforming both of its channels.
    pub(crate) fn wrap(&self, predicate: Predicate) -> Predicate {
        Predicate {
            simple: predicate.simple.map(self.wrap_simple),
            future: (self.wrap_future)(predicate.future),
        }
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modifier").field("name", &self.name).finish()
    }
}

/// Inverts the wrapped predicate's verdict. Faults pass through unchanged.
pub static NOT: Modifier = Modifier {
    name: "not",
    wrap_simple: not_simple,
    wrap_future: not_future,
};

/// Passes when at least one element of a sequence satisfies the wrapped
/// predicate. Elements that fault or fail are skipped; a non-sequence value
/// yields false.
pub static SOME: Modifier = Modifier {
    name: "some",
    wrap_simple: some_simple,
    wrap_future: some_future,
};

/// Passes when every element of a sequence satisfies the wrapped
/// predicate. An element fault propagates; a non-sequence value yields
/// false.
pub static EVERY: Modifier = Modifier {
    name: "every",
    wrap_simple: every_simple,
    wrap_future: every_future,
};

/// Fold a modifier stack around a base predicate, innermost last, so that
/// the first modifier chained ends up outermost.
pub(crate) fn compose(base: Predicate, modifiers: &[&'static Modifier]) -> Predicate {
    modifiers
        .iter()
        .rev()
        .fold(base, |inner, modifier| modifier.wrap(inner))
}

/// Split a value into the elements the quantifying modifiers iterate.
///
/// Arrays iterate their elements; strings iterate their characters as
/// one-character strings. Anything else is not a sequence.
pub(crate) fn split_sequence(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items.clone()),
        Value::String(text) => Some(
            text.chars()
                .map(|c| Value::String(c.to_string()))
                .collect(),
        ),
        _ => None,
    }
}

fn not_simple(inner: SimpleFn) -> SimpleFn {
    Arc::new(move |value| inner(value).map(|satisfied| !satisfied))
}

fn not_future(inner: FutureFn) -> FutureFn {
    Arc::new(move |value| {
        let pending = inner(value);
        Box::pin(async move { pending.await.map(|satisfied| !satisfied) })
    })
}

fn some_simple(inner: SimpleFn) -> SimpleFn {
    Arc::new(move |value| {
        let Some(items) = split_sequence(value) else {
            return Ok(false);
        };
        for item in &items {
            if let Ok(true) = inner(item) {
                return Ok(true);
            }
        }
        Ok(false)
    })
}

fn some_future(inner: FutureFn) -> FutureFn {
    Arc::new(move |value| {
        let inner = Arc::clone(&inner);
        Box::pin(async move {
            let Some(items) = split_sequence(&value) else {
                return Ok(false);
            };
            for item in items {
                if let Ok(true) = inner(item).await {
                    return Ok(true);
                }
            }
            Ok(false)
        })
    })
}

fn every_simple(inner: SimpleFn) -> SimpleFn {
    Arc::new(move |value| {
        let Some(items) = split_sequence(value) else {
            return Ok(false);
        };
        for item in &items {
            if !inner(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

fn every_future(inner: FutureFn) -> FutureFn {
    Arc::new(move |value| {
        let inner = Arc::clone(&inner);
        Box::pin(async move {
            let Some(items) = split_sequence(&value) else {
                return Ok(false);
            };
            for item in items {
                if !inner(item).await? {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    })
}
