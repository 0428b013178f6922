//! Predix Composition
//!
//! Combines two predicates into one by unifying their parameters and joining
//! their bodies under a boolean connective, and extracts member names from
//! selector lambdas.
//!
//! ## Key Concepts
//!
//! - **Unification**: the second predicate's parameter references are
//!   rewritten, by identity, to the first predicate's parameters
//! - **Connective**: `And` and `Or` evaluate both sides, `AndAlso`
//!   short-circuits
//! - **Member extraction**: `|p| p.age` yields `"age"`
//!
//! Inputs are never modified; every operation returns a new tree.
//!
//! ## Usage
//!
//! ```
//! use predix_compose::{ComposeExt, Connective};
//! use predix_expr::{Expr, Lambda, Parameter, ValueType};
//!
//! let x = Parameter::new("x", ValueType::Int);
//! let y = Parameter::new("y", ValueType::Int);
//! let positive = Lambda::new(vec![x.clone()], Expr::gt(Expr::parameter(&x), Expr::int(0)).unwrap()).unwrap();
//! let small = Lambda::new(vec![y.clone()], Expr::lt(Expr::parameter(&y), Expr::int(10)).unwrap()).unwrap();
//!
//! let both = positive.compose(&small, Connective::Or).unwrap();
//! assert_eq!(both.to_string(), "|x: Int| ((x > 0) | (x < 10))");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compose;
pub mod connective;
pub mod error;
pub mod member_name;
pub mod substitute;

// Re-exports for convenience
pub use compose::{compose_lambdas, ComposeExt};
pub use connective::Connective;
pub use error::ComposeError;
pub use member_name::member_name;
pub use substitute::{replace_parameters, ParameterSubstitutor, SubstitutionMap};
