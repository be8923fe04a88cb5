//! # Verdict
//!
//! A fluent validation library: compose named rules into immutable
//! chains, bend them with modifiers, and execute them under the strategy
//! that fits the call site.
//!
//! ## Core Ideas
//!
//! - **Chain** = an immutable sequence of rules built fluently; every
//!   builder call returns a new chain, so prefixes can be shared and
//!   extended in different directions
//! - **Modifier** = `not`, `some`, and `every` transform the next rule's
//!   predicate, and their order matters: `not().every()` negates the
//!   quantifier while `every().not()` quantifies the negation
//! - **Strategy** = [`Chain::test`] answers yes or no, [`Chain::check`]
//!   stops at the first failure, [`Chain::test_all`] collects every
//!   failure, and [`Chain::test_async`] awaits asynchronous rules one at
//!   a time
//!
//! Values are [`serde_json::Value`], so one chain validates data from any
//! source that deserializes to JSON.
//!
//! ## Quick Example
//!
//! ```rust
//! use verdict::chain;
//! use serde_json::json;
//!
//! let password = chain()
//!     .string()
//!     .min_length(8)
//!     .not().lowercase()
//!     .not().includes(" ");
//!
//! assert!(password.test(&json!("s3cretPass")));
//! assert!(!password.test(&json!("weak")));
//!
//! // Collect everything that went wrong, in rule order.
//! let failures = password.test_all(&json!("nope"));
//! assert_eq!(failures.len(), 2);
//! for failure in &failures {
//!     println!("{}", failure);
//! }
//! ```
//!
//! ## Nested Objects
//!
//! ```rust
//! use verdict::{chain, Schema};
//! use serde_json::json;
//!
//! let address = Schema::new()
//!     .field("street", chain().string().min_length(1))
//!     .field("zip", chain().string().pattern("^[0-9]{5}$"));
//!
//! let person = Schema::new()
//!     .field("name", chain().string())
//!     .field("address", chain().schema(address));
//!
//! let err = chain()
//!     .schema(person)
//!     .check(&json!({"name": "Ada", "address": {"street": "", "zip": "x"}}))
//!     .unwrap_err();
//!
//! // Failures nest: the address entry carries its own field failures.
//! assert_eq!(err.nested()[0].target(), Some("address"));
//! assert_eq!(err.nested()[0].nested().len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod chain;
pub mod error;
pub mod modifier;
pub mod predicate;
pub mod registry;
pub mod rule;

mod rules;

// Re-exports
pub use chain::{chain, Chain};
pub use error::{Cause, ValidationError};
pub use modifier::{EVERY, Modifier, NOT, SOME};
pub use predicate::{FutureFn, Predicate, SimpleFn};
pub use registry::{Registry, RuleFactory};
pub use rule::Rule;
pub use rules::Schema;
pub use serde_json::Value;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::chain::{chain, Chain};
    pub use crate::error::{Cause, ValidationError};
    pub use crate::predicate::Predicate;
    pub use crate::registry::Registry;
    pub use crate::rules::Schema;
    pub use serde_json::Value;
}
