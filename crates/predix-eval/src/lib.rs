//! Predix Evaluation
//!
//! Runs expression trees against concrete values. Composition never needs
//! this crate; it exists so that a composed predicate can be checked
//! against the predicates it was built from.
//!
//! ## Usage
//!
//! ```
//! use predix_eval::Evaluator;
//! use predix_expr::{Expr, Lambda, Parameter, Value, ValueType};
//!
//! let x = Parameter::new("x", ValueType::Int);
//! let positive = Lambda::new(vec![x.clone()], Expr::gt(Expr::parameter(&x), Expr::int(0)).unwrap()).unwrap();
//!
//! let evaluator = Evaluator::default();
//! assert_eq!(evaluator.evaluate(&positive, &[Value::Int(3)]).unwrap(), Value::Bool(true));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod error;
pub mod evaluator;

// Re-exports for convenience
pub use config::EvalConfig;
pub use context::{EvalContext, HostFn};
pub use error::EvalError;
pub use evaluator::Evaluator;
