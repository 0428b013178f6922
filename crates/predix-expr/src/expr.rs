//! Expression nodes and their checked constructors

use crate::{ExprError, Lambda, MemberDescriptor, MethodDescriptor, Parameter, Value, ValueType};
use serde::{Deserialize, Serialize};

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// Logical negation
    Not,
    /// Arithmetic negation
    Negate,
}

impl UnaryOp {
    /// Operator symbol used when rendering
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Negate => "-",
        }
    }

    /// Result type for an operand of type `operand`
    pub fn result_type(self, operand: &ValueType) -> Result<ValueType, ExprError> {
        let context = format!("operator {}", self.symbol());
        match self {
            UnaryOp::Not if *operand == ValueType::Bool => Ok(ValueType::Bool),
            UnaryOp::Not => Err(ExprError::type_mismatch(context, "Bool", operand)),
            UnaryOp::Negate if operand.is_numeric() => Ok(operand.clone()),
            UnaryOp::Negate => Err(ExprError::type_mismatch(context, "Int or Float", operand)),
        }
    }
}

/// Binary operators
///
/// `And` and `Or` evaluate both operands (bitwise style, also defined on
/// integers). `AndAlso` and `OrElse` short-circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&`, both sides always evaluated
    And,
    /// `&&`, right side skipped when left is false
    AndAlso,
    /// `|`, both sides always evaluated
    Or,
    /// `||`, right side skipped when left is true
    OrElse,
}

impl BinaryOp {
    /// Operator symbol used when rendering
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&",
            BinaryOp::AndAlso => "&&",
            BinaryOp::Or => "|",
            BinaryOp::OrElse => "||",
        }
    }

    /// Whether the right operand may be skipped
    pub fn is_short_circuit(self) -> bool {
        matches!(self, BinaryOp::AndAlso | BinaryOp::OrElse)
    }

    /// Result type for operands of the given types
    ///
    /// Both operands must have the same type; there is no implicit widening.
    pub fn result_type(self, left: &ValueType, right: &ValueType) -> Result<ValueType, ExprError> {
        let context = format!("operator {}", self.symbol());
        if left != right {
            return Err(ExprError::type_mismatch(context, left.to_string(), right));
        }

        match self {
            BinaryOp::And | BinaryOp::Or => match left {
                ValueType::Bool | ValueType::Int => Ok(left.clone()),
                other => Err(ExprError::type_mismatch(context, "Bool or Int", other)),
            },
            BinaryOp::AndAlso | BinaryOp::OrElse => match left {
                ValueType::Bool => Ok(ValueType::Bool),
                other => Err(ExprError::type_mismatch(context, "Bool", other)),
            },
            BinaryOp::Eq | BinaryOp::Ne => match left {
                ValueType::Lambda { .. } => {
                    Err(ExprError::type_mismatch(context, "comparable type", left))
                }
                _ => Ok(ValueType::Bool),
            },
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                if left.is_ordered() {
                    Ok(ValueType::Bool)
                } else {
                    Err(ExprError::type_mismatch(context, "Int, Float or Str", left))
                }
            }
            BinaryOp::Add => {
                if left.is_numeric() || *left == ValueType::Str {
                    Ok(left.clone())
                } else {
                    Err(ExprError::type_mismatch(context, "Int, Float or Str", left))
                }
            }
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
                if left.is_numeric() {
                    Ok(left.clone())
                } else {
                    Err(ExprError::type_mismatch(context, "Int or Float", left))
                }
            }
        }
    }
}

/// A node of an expression tree
///
/// Trees are immutable values: every transformation produces a new tree and
/// leaves its input untouched. Children are owned through `Box`, so two
/// trees never share a subtree implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Reference to a declared parameter
    Parameter(Parameter),

    /// Typed constant
    Constant {
        /// The value
        value: Value,
        /// Its declared type
        ty: ValueType,
    },

    /// Field or property read
    Member {
        /// Instance receiver, `None` for static members
        #[serde(default, skip_serializing_if = "Option::is_none")]
        receiver: Option<Box<Expr>>,
        /// Member being read
        member: MemberDescriptor,
    },

    /// Unary operator application
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
    },

    /// Binary operator application
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },

    /// Function or method call
    Call {
        /// Receiver for methods, `None` for free functions
        #[serde(default, skip_serializing_if = "Option::is_none")]
        receiver: Option<Box<Expr>>,
        /// Callee signature
        method: MethodDescriptor,
        /// Arguments, in order
        args: Vec<Expr>,
    },

    /// Nested lambda (call argument)
    Lambda(Lambda),
}

impl Expr {
    /// Reference a declared parameter
    pub fn parameter(parameter: &Parameter) -> Self {
        Expr::Parameter(parameter.clone())
    }

    /// Boolean constant
    pub fn bool(value: bool) -> Self {
        Expr::Constant {
            value: Value::Bool(value),
            ty: ValueType::Bool,
        }
    }

    /// Integer constant
    pub fn int(value: i64) -> Self {
        Expr::Constant {
            value: Value::Int(value),
            ty: ValueType::Int,
        }
    }

    /// Float constant
    ///
    /// # Errors
    /// `TypeMismatch` for NaN and infinities, which have no JSON encoding
    pub fn float(value: f64) -> Result<Self, ExprError> {
        Self::constant(Value::Float(value), ValueType::Float)
    }

    /// String constant
    pub fn str(value: impl Into<String>) -> Self {
        Expr::Constant {
            value: Value::Str(value.into()),
            ty: ValueType::Str,
        }
    }

    /// Constant with an explicit type
    ///
    /// # Errors
    /// `TypeMismatch` if `value` does not conform to `ty`
    pub fn constant(value: Value, ty: ValueType) -> Result<Self, ExprError> {
        check_constant(&value, &ty)?;
        Ok(Expr::Constant { value, ty })
    }

    /// Read an instance member of `receiver`
    pub fn member(receiver: Expr, member: MemberDescriptor) -> Result<Self, ExprError> {
        check_member(Some(&receiver.value_type()), &member)?;
        Ok(Expr::Member {
            receiver: Some(Box::new(receiver)),
            member,
        })
    }

    /// Read a static member
    pub fn static_member(member: MemberDescriptor) -> Result<Self, ExprError> {
        check_member(None, &member)?;
        Ok(Expr::Member {
            receiver: None,
            member,
        })
    }

    /// Apply a unary operator
    pub fn unary(op: UnaryOp, operand: Expr) -> Result<Self, ExprError> {
        op.result_type(&operand.value_type())?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// Logical negation
    pub fn not(operand: Expr) -> Result<Self, ExprError> {
        Self::unary(UnaryOp::Not, operand)
    }

    /// Apply a binary operator
    ///
    /// # Errors
    /// `TypeMismatch` if the operand types are not accepted by `op`
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Result<Self, ExprError> {
        op.result_type(&left.value_type(), &right.value_type())?;
        Ok(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// `left == right`
    pub fn eq(left: Expr, right: Expr) -> Result<Self, ExprError> {
        Self::binary(BinaryOp::Eq, left, right)
    }

    /// `left < right`
    pub fn lt(left: Expr, right: Expr) -> Result<Self, ExprError> {
        Self::binary(BinaryOp::Lt, left, right)
    }

    /// `left > right`
    pub fn gt(left: Expr, right: Expr) -> Result<Self, ExprError> {
        Self::binary(BinaryOp::Gt, left, right)
    }

    /// `left >= right`
    pub fn ge(left: Expr, right: Expr) -> Result<Self, ExprError> {
        Self::binary(BinaryOp::Ge, left, right)
    }

    /// Call a function or method
    pub fn call(
        receiver: Option<Expr>,
        method: MethodDescriptor,
        args: Vec<Expr>,
    ) -> Result<Self, ExprError> {
        let receiver_ty = receiver.as_ref().map(Expr::value_type);
        let arg_tys: Vec<ValueType> = args.iter().map(Expr::value_type).collect();
        check_call(receiver_ty.as_ref(), &method, &arg_tys)?;
        Ok(Expr::Call {
            receiver: receiver.map(Box::new),
            method,
            args,
        })
    }

    /// Static type of this node
    ///
    /// Assumes the tree was built through the checked constructors (or has
    /// passed [`Expr::typecheck`]).
    pub fn value_type(&self) -> ValueType {
        match self {
            Expr::Parameter(p) => p.ty.clone(),
            Expr::Constant { ty, .. } => ty.clone(),
            Expr::Member { member, .. } => member.ty.clone(),
            Expr::Unary { op, operand } => match op {
                UnaryOp::Not => ValueType::Bool,
                UnaryOp::Negate => operand.value_type(),
            },
            Expr::Binary { op, left, .. } => match op {
                BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
                | BinaryOp::AndAlso
                | BinaryOp::OrElse => ValueType::Bool,
                BinaryOp::And
                | BinaryOp::Or
                | BinaryOp::Add
                | BinaryOp::Sub
                | BinaryOp::Mul
                | BinaryOp::Div
                | BinaryOp::Rem => left.value_type(),
            },
            Expr::Call { method, .. } => method.returns.clone(),
            Expr::Lambda(lambda) => lambda.value_type(),
        }
    }

    /// Re-run every construction check over the whole tree
    ///
    /// Trees that arrive through deserialization skip the checked
    /// constructors; this restores the guarantee.
    pub fn typecheck(&self) -> Result<ValueType, ExprError> {
        match self {
            Expr::Parameter(p) => Ok(p.ty.clone()),
            Expr::Constant { value, ty } => {
                check_constant(value, ty)?;
                Ok(ty.clone())
            }
            Expr::Member { receiver, member } => {
                let receiver_ty = receiver.as_deref().map(Expr::typecheck).transpose()?;
                check_member(receiver_ty.as_ref(), member)?;
                Ok(member.ty.clone())
            }
            Expr::Unary { op, operand } => op.result_type(&operand.typecheck()?),
            Expr::Binary { op, left, right } => {
                op.result_type(&left.typecheck()?, &right.typecheck()?)
            }
            Expr::Call {
                receiver,
                method,
                args,
            } => {
                let receiver_ty = receiver.as_deref().map(Expr::typecheck).transpose()?;
                let arg_tys = args
                    .iter()
                    .map(Expr::typecheck)
                    .collect::<Result<Vec<_>, _>>()?;
                check_call(receiver_ty.as_ref(), method, &arg_tys)?;
                Ok(method.returns.clone())
            }
            Expr::Lambda(lambda) => {
                let returns = lambda.body().typecheck()?;
                let params = lambda.params().iter().map(|p| p.ty.clone()).collect();
                Ok(ValueType::lambda(params, returns))
            }
        }
    }

    /// Number of nodes in the tree, nested lambda bodies included
    pub fn node_count(&self) -> usize {
        1 + match self {
            Expr::Parameter(_) | Expr::Constant { .. } => 0,
            Expr::Member { receiver, .. } => receiver.as_ref().map_or(0, |r| r.node_count()),
            Expr::Unary { operand, .. } => operand.node_count(),
            Expr::Binary { left, right, .. } => left.node_count() + right.node_count(),
            Expr::Call { receiver, args, .. } => {
                receiver.as_ref().map_or(0, |r| r.node_count())
                    + args.iter().map(Expr::node_count).sum::<usize>()
            }
            Expr::Lambda(lambda) => lambda.body().node_count(),
        }
    }
}

fn check_constant(value: &Value, ty: &ValueType) -> Result<(), ExprError> {
    if !value.conforms_to(ty) {
        return Err(ExprError::TypeMismatch {
            context: "constant".to_string(),
            expected: ty.to_string(),
            found: infer_shallow(value, ty),
        });
    }
    if has_non_finite(value) {
        return Err(ExprError::type_mismatch(
            "constant",
            "finite Float",
            &ValueType::Float,
        ));
    }
    Ok(())
}

fn has_non_finite(value: &Value) -> bool {
    match value {
        Value::Float(x) => !x.is_finite(),
        Value::List(items) => items.iter().any(has_non_finite),
        Value::Record(record) => record.fields.values().any(has_non_finite),
        Value::Bool(_) | Value::Int(_) | Value::Str(_) => false,
    }
}

/// Best-effort type of a value for error reporting; empty lists borrow `hint`
fn infer_shallow(value: &Value, hint: &ValueType) -> ValueType {
    match value {
        Value::Bool(_) => ValueType::Bool,
        Value::Int(_) => ValueType::Int,
        Value::Float(_) => ValueType::Float,
        Value::Str(_) => ValueType::Str,
        Value::List(items) => ValueType::list(
            items
                .first()
                .map(|item| infer_shallow(item, hint))
                .unwrap_or_else(|| hint.clone()),
        ),
        Value::Record(record) => ValueType::Record(record.type_name.clone()),
    }
}

fn check_member(receiver: Option<&ValueType>, member: &MemberDescriptor) -> Result<(), ExprError> {
    match (receiver, member.is_instance()) {
        (Some(receiver), true) => {
            let expected = ValueType::Record(member.owner.clone());
            if *receiver == expected {
                Ok(())
            } else {
                Err(ExprError::type_mismatch(
                    format!("member {}", member.name),
                    expected.to_string(),
                    receiver,
                ))
            }
        }
        (None, false) => Ok(()),
        (None, true) => Err(ExprError::ReceiverMismatch {
            member: member.name.clone(),
            reason: "instance member requires a receiver".to_string(),
        }),
        (Some(_), false) => Err(ExprError::ReceiverMismatch {
            member: member.name.clone(),
            reason: "static member takes no receiver".to_string(),
        }),
    }
}

fn check_call(
    receiver: Option<&ValueType>,
    method: &MethodDescriptor,
    args: &[ValueType],
) -> Result<(), ExprError> {
    match (receiver, method.receiver.as_ref()) {
        (Some(actual), Some(expected)) if actual != expected => {
            return Err(ExprError::type_mismatch(
                format!("receiver of {}", method.name),
                expected.to_string(),
                actual,
            ));
        }
        (Some(_), Some(_)) | (None, None) => {}
        (None, Some(_)) => {
            return Err(ExprError::ReceiverMismatch {
                member: method.name.clone(),
                reason: "method requires a receiver".to_string(),
            });
        }
        (Some(_), None) => {
            return Err(ExprError::ReceiverMismatch {
                member: method.name.clone(),
                reason: "free function takes no receiver".to_string(),
            });
        }
    }

    if args.len() != method.params.len() {
        return Err(ExprError::ArityMismatch {
            expected: method.params.len(),
            found: args.len(),
        });
    }

    for (idx, (actual, expected)) in args.iter().zip(&method.params).enumerate() {
        if actual != expected {
            return Err(ExprError::type_mismatch(
                format!("argument {} of {}", idx, method.name),
                expected.to_string(),
                actual,
            ));
        }
    }

    Ok(())
}
