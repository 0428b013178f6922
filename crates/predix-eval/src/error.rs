//! Error types for predicate evaluation

use thiserror::Error;

/// Errors that can occur while evaluating an expression tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Wrong number of arguments for a lambda or function
    #[error("Argument count mismatch: expected {expected}, got {found}")]
    ArgumentCount {
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        found: usize,
    },

    /// Parameter reference with no value in scope
    #[error("Unbound parameter: {0}")]
    UnboundParameter(String),

    /// Record field or static member without a value
    #[error("Unknown member: {0}")]
    UnknownMember(String),

    /// Call to a function that is neither built in nor registered
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// A runtime value does not have the type the node requires
    #[error("Type mismatch in {context}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Node being evaluated
        context: String,
        /// Required type
        expected: String,
        /// Kind of the value found
        found: String,
    },

    /// Integer division or remainder by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Checked integer arithmetic overflowed
    #[error("Integer overflow in {0}")]
    Overflow(String),

    /// Tree nesting exceeded the configured maximum
    #[error("Maximum evaluation depth {0} exceeded")]
    DepthExceeded(usize),

    /// Node kind that cannot be evaluated in this position
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// A registered function reported a failure
    #[error("Function '{name}' failed: {message}")]
    Function {
        /// Registered function name
        name: String,
        /// Failure description
        message: String,
    },
}

impl EvalError {
    pub(crate) fn type_mismatch(
        context: impl Into<String>,
        expected: impl Into<String>,
        found: &predix_expr::Value,
    ) -> Self {
        Self::TypeMismatch {
            context: context.into(),
            expected: expected.into(),
            found: found.kind().to_string(),
        }
    }
}
