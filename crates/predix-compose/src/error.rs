//! Error types for composition and member extraction

use predix_expr::ExprError;
use thiserror::Error;

/// Errors that can occur while composing predicates or extracting members
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposeError {
    /// The two lambdas declare different numbers of parameters
    #[error("Arity mismatch: first declares {first} parameter(s), second declares {second}")]
    ArityMismatch {
        /// Parameter count of the first lambda
        first: usize,
        /// Parameter count of the second lambda
        second: usize,
    },

    /// Member extraction on a body that is not a member access
    #[error("Not a member access: {0}")]
    NotAMemberAccess(String),

    /// Member extraction on a member without an instance receiver
    #[error("Static member not supported: {0}")]
    StaticMemberNotSupported(String),

    /// A required expression argument is absent
    #[error("Expression '{0}' is absent")]
    NullExpression(String),

    /// Tree construction failed (type mismatch, dangling reference)
    #[error(transparent)]
    Expr(#[from] ExprError),
}
