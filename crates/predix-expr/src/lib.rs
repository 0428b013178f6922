//! Predix Expression Model
//!
//! Predicates represented as data: immutable trees of typed nodes that can
//! be inspected, rewritten and composed before anything evaluates them.
//! This crate is the leaf of the workspace and knows nothing about
//! composition or evaluation.
//!
//! ## Key Concepts
//!
//! - **Expr**: a closed set of node kinds (parameter, constant, member,
//!   unary, binary, call, lambda), each reporting its static type
//! - **Parameter identity**: UUIDv7 tokens; references bind by identity,
//!   never by display name
//! - **Lambda**: declared parameters plus a body with no free variables
//! - **Predicate<T>**: a one-parameter `Bool` lambda over a host [`Record`]
//! - **ExprVisitor**: structural rebuild with per-node overrides
//!
//! ## Construction
//!
//! Composite nodes are built through checked constructors that reject
//! ill-typed operands with [`ExprError::TypeMismatch`]. Trees read from JSON
//! bypass those constructors and are re-checked with [`Lambda::validate`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod display;
pub mod error;
pub mod expr;
pub mod lambda;
pub mod member;
pub mod parameter;
pub mod predicate;
pub mod record;
pub mod types;
pub mod visitor;

// Re-exports for convenience
pub use error::ExprError;
pub use expr::{BinaryOp, Expr, UnaryOp};
pub use lambda::Lambda;
pub use member::{MemberDescriptor, MemberKind, MethodDescriptor};
pub use parameter::{Parameter, ParameterId};
pub use predicate::Predicate;
pub use record::Record;
pub use types::{RecordValue, Value, ValueType};
pub use visitor::{parameter_references, walk_expr, walk_lambda, ExprVisitor};
