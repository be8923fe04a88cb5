//! Nested object validation.
//!
//! A [`Schema`] maps field names to sub-chains. The schema predicate runs
//! every field's chain in collect-all mode against the field's value,
//! annotates each resulting failure with the field name, and concatenates
//! the failures in field-declaration order. A non-empty collection becomes
//! the rule's nested cause, so schema failures aggregate recursively
//! through arbitrarily deep object graphs.
//!
//! Missing fields, and any field access on a non-object root, validate the
//! null value. A sub-chain that tolerates null therefore tolerates an
//! absent field.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::chain::Chain;
use crate::error::{Cause, ValidationError};
use crate::predicate::Predicate;

/// An ordered set of named fields, each validated by its own chain.
///
/// # Examples
///
/// ```
/// use verdict::{chain, Schema};
/// use serde_json::json;
///
/// let person = Schema::new()
///     .field("name", chain().string().min_length(1))
///     .field("age", chain().number().between(0, 150));
///
/// let validation = chain().schema(person);
/// assert!(validation.test(&json!({"name": "Ada", "age": 36})));
/// assert!(!validation.test(&json!({"name": "", "age": 36})));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Schema {
    fields: Vec<(String, Chain)>,
}

impl Schema {
    /// An empty schema. With no fields it validates anything.
    pub fn new() -> Self {
        Schema { fields: Vec::new() }
    }

    /// Add a field validated by the given chain. Fields are checked in the
    /// order they were added.
    pub fn field(mut self, name: impl Into<String>, chain: Chain) -> Self {
        self.fields.push((name.into(), chain));
        self
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A JSON summary of the schema, used as the rule's recorded argument.
    pub(crate) fn summary(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (name, chain) in &self.fields {
            map.insert(name.clone(), Value::String(chain.to_string()));
        }
        Value::Object(map)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

fn field_value(value: &Value, name: &str) -> Value {
    value
        .as_object()
        .and_then(|map| map.get(name))
        .cloned()
        .unwrap_or(Value::Null)
}

fn collect(fields: &[(String, Chain)], value: &Value) -> Vec<ValidationError> {
    let mut failures = Vec::new();
    for (name, chain) in fields {
        let nested_value = field_value(value, name);
        for failure in chain.test_all(&nested_value) {
            failures.push(failure.with_target(name.clone()));
        }
    }
    failures
}

async fn collect_future(fields: &[(String, Chain)], value: &Value) -> Vec<ValidationError> {
    let mut failures = Vec::new();
    for (name, chain) in fields {
        let nested_value = field_value(value, name);
        for failure in chain.collect_failures_future(&nested_value).await {
            failures.push(failure.with_target(name.clone()));
        }
    }
    failures
}

fn verdict_from(failures: Vec<ValidationError>) -> Result<bool, Cause> {
    if failures.is_empty() {
        Ok(true)
    } else {
        Err(Cause::Nested(failures))
    }
}

/// The base predicate behind `Chain::schema`.
pub(crate) fn schema_predicate(schema: &Schema) -> Predicate {
    let fields: Arc<Vec<(String, Chain)>> = Arc::new(schema.fields.clone());
    let fields_future = Arc::clone(&fields);
    Predicate::from_channels(
        Arc::new(move |value: &Value| verdict_from(collect(&fields, value))),
        Arc::new(move |value: Value| {
            let fields = Arc::clone(&fields_future);
            Box::pin(async move { verdict_from(collect_future(&fields, &value).await) })
        }),
    )
}

fn is_absent(value: &Value, allow_blank: bool) -> bool {
    value.is_null() || (allow_blank && value.as_str().is_some_and(|s| s.trim().is_empty()))
}

/// The base predicate behind `Chain::optional` and
/// `Chain::optional_or_blank`: absent values pass outright, present values
/// must satisfy the inner chain in full.
pub(crate) fn optional_predicate(inner: &Chain, allow_blank: bool) -> Predicate {
    let chain = inner.clone();
    let chain_future = inner.clone();
    Predicate::from_channels(
        Arc::new(move |value: &Value| {
            if is_absent(value, allow_blank) {
                return Ok(true);
            }
            verdict_from(chain.test_all(value))
        }),
        Arc::new(move |value: Value| {
            let chain = chain_future.clone();
            Box::pin(async move {
                if is_absent(&value, allow_blank) {
                    return Ok(true);
                }
                verdict_from(chain.collect_failures_future(&value).await)
            })
        }),
    )
}

/// The base predicate behind `Chain::passes_any_of`: passes when any of
/// the alternative chains passes, trying them in order.
pub(crate) fn passes_any_of_predicate(alternatives: &[Chain]) -> Predicate {
    let chains: Arc<Vec<Chain>> = Arc::new(alternatives.to_vec());
    let chains_future = Arc::clone(&chains);
    Predicate::from_channels(
        Arc::new(move |value: &Value| Ok(chains.iter().any(|chain| chain.test(value)))),
        Arc::new(move |value: Value| {
            let chains = Arc::clone(&chains_future);
            Box::pin(async move {
                for chain in chains.iter() {
                    if chain.test_async(value.clone()).await.is_ok() {
                        return Ok(true);
                    }
                }
                Ok(false)
            })
        }),
    )
}
