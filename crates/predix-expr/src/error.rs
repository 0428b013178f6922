//! Error types for expression construction

use crate::{ParameterId, ValueType};
use thiserror::Error;

/// Errors raised while building or validating an expression tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Operands or arguments of a node have incompatible types
    #[error("Type mismatch in {context}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Where the mismatch was detected (operator, member, call)
        context: String,
        /// What the construction required
        expected: String,
        /// What it was given
        found: ValueType,
    },

    /// Receiver presence does not match the member's kind
    #[error("Receiver mismatch for member '{member}': {reason}")]
    ReceiverMismatch {
        /// Member or method name
        member: String,
        /// Description of the issue
        reason: String,
    },

    /// A parameter reference does not resolve to a declared parameter
    #[error("Unbound parameter '{name}' ({id})")]
    UnboundParameter {
        /// Display name of the dangling reference
        name: String,
        /// Identity of the dangling reference
        id: ParameterId,
    },

    /// A lambda declares the wrong number of parameters
    #[error("Arity mismatch: expected {expected} parameter(s), found {found}")]
    ArityMismatch {
        /// Required parameter count
        expected: usize,
        /// Declared parameter count
        found: usize,
    },
}

impl ExprError {
    pub(crate) fn type_mismatch(
        context: impl Into<String>,
        expected: impl Into<String>,
        found: &ValueType,
    ) -> Self {
        Self::TypeMismatch {
            context: context.into(),
            expected: expected.into(),
            found: found.clone(),
        }
    }
}
