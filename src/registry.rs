//! Custom rule registration
//!
//! A [`Registry`] owns a table of custom rule factories and mints chains
//! that can use them by name. Each chain snapshots the table at creation,
//! so registering or clearing rules afterwards never changes the behavior
//! of chains already handed out.
//!
//! # Examples
//!
//! ```
//! use verdict::{Cause, Predicate, Registry};
//! use serde_json::json;
//!
//! let mut registry = Registry::new();
//! registry.register("divisible_by", |args| {
//!     let divisor = args
//!         .first()
//!         .and_then(|v| v.as_i64())
//!         .ok_or_else(|| Cause::fault("divisible_by: integer argument required"))?;
//!     Ok(Predicate::from_fn(move |value| {
//!         value.as_i64().map_or(false, |n| n % divisor == 0)
//!     }))
//! });
//!
//! let validation = registry.chain().rule("divisible_by", vec![json!(3)]);
//! assert!(validation.test(&json!(9)));
//! assert!(!validation.test(&json!(10)));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::chain::Chain;
use crate::error::Cause;
use crate::predicate::Predicate;
use crate::rules;

/// A shareable custom rule factory: arguments in, base predicate out.
pub type RuleFactory = Arc<dyn Fn(&[Value]) -> Result<Predicate, Cause> + Send + Sync>;

/// A table of custom rule factories and the entry point for chains that
/// use them.
///
/// Custom rules shadow built-ins of the same name. Chains created by
/// [`Registry::chain`] keep working with the rules they were created with,
/// even if the registry is mutated or dropped afterwards.
#[derive(Default)]
pub struct Registry {
    custom: HashMap<String, RuleFactory>,
}

impl Registry {
    /// An empty registry. Its chains resolve built-in rules only.
    pub fn new() -> Self {
        Registry {
            custom: HashMap::new(),
        }
    }

    /// Register a custom rule factory under a name, replacing any previous
    /// factory with that name.
    ///
    /// The factory receives the arguments each chain call supplies and
    /// returns the rule's base predicate, or a [`Cause`] when the
    /// arguments are unusable. Factory errors do not interrupt the fluent
    /// builder; they surface as faults when the chain executes.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&[Value]) -> Result<Predicate, Cause> + Send + Sync + 'static,
    {
        self.custom.insert(name.into(), Arc::new(factory));
    }

    /// Register every factory of an iterator, replacing on name collision.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{Predicate, Registry, RuleFactory};
    /// use std::sync::Arc;
    /// use serde_json::json;
    ///
    /// let truthy: RuleFactory =
    ///     Arc::new(|_| Ok(Predicate::from_fn(|v| v.as_bool() == Some(true))));
    ///
    /// let mut registry = Registry::new();
    /// registry.extend([("truthy".to_string(), truthy)]);
    /// assert!(registry.chain().rule("truthy", vec![]).test(&json!(true)));
    /// ```
    pub fn extend(&mut self, entries: impl IntoIterator<Item = (String, RuleFactory)>) {
        self.custom.extend(entries);
    }

    /// Remove every custom rule. Built-ins are unaffected, as are chains
    /// already created.
    pub fn clear_custom(&mut self) {
        self.custom.clear();
    }

    /// Whether a rule name currently resolves, either to a custom rule or
    /// to a built-in.
    pub fn is_registered(&self, name: &str) -> bool {
        self.custom.contains_key(name) || rules::builtin(name).is_some()
    }

    /// Number of registered custom rules.
    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    /// Create a chain backed by a snapshot of the current custom rules.
    pub fn chain(&self) -> Chain {
        Chain::with_custom(Arc::new(self.custom.clone()))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.custom.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("custom", &names).finish()
    }
}
