//! Tree-walking evaluator
//!
//! Evaluation is a pure function of the tree, the arguments and the
//! [`EvalContext`]. Bindings live on a scope stack local to each call, so a
//! single [`Evaluator`] can be shared across threads.
//!
//! `&` and `|` evaluate both operands. `&&` and `||` skip the right operand
//! once the left decides the result, which is observable through registered
//! functions with side effects.

use crate::{EvalConfig, EvalContext, EvalError};
use predix_expr::{
    BinaryOp, Expr, Lambda, MemberDescriptor, MethodDescriptor, ParameterId, Predicate, Record,
    UnaryOp, Value,
};
use std::cmp::Ordering;
use tracing::{debug, trace};

type Scope = Vec<(ParameterId, Value)>;

/// Evaluates lambdas against argument values
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvalConfig,
    context: EvalContext,
}

impl Evaluator {
    /// Create an evaluator with explicit limits and host bindings
    pub fn new(config: EvalConfig, context: EvalContext) -> Self {
        Self { config, context }
    }

    /// Create an evaluator with default limits
    pub fn with_context(context: EvalContext) -> Self {
        Self::new(EvalConfig::default(), context)
    }

    /// Active configuration
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Host bindings
    pub fn context(&self) -> &EvalContext {
        &self.context
    }

    /// Evaluate `lambda` with `args` bound positionally to its parameters
    ///
    /// # Errors
    /// - `ArgumentCount` if `args` does not match the lambda's arity
    /// - `TypeMismatch` if an argument does not conform to its parameter
    /// - any runtime failure raised while evaluating the body
    pub fn evaluate(&self, lambda: &Lambda, args: &[Value]) -> Result<Value, EvalError> {
        if args.len() != lambda.arity() {
            return Err(EvalError::ArgumentCount {
                expected: lambda.arity(),
                found: args.len(),
            });
        }

        let mut scope = Scope::with_capacity(args.len());
        for (param, arg) in lambda.params().iter().zip(args) {
            if !arg.conforms_to(&param.ty) {
                return Err(EvalError::type_mismatch(
                    format!("argument {}", param.name),
                    param.ty.to_string(),
                    arg,
                ));
            }
            scope.push((param.id, arg.clone()));
        }

        let result = self.eval(lambda.body(), &mut scope, 0)?;

        debug!(
            arity = lambda.arity(),
            nodes = lambda.body().node_count(),
            result = %result,
            "Evaluated lambda"
        );

        Ok(result)
    }

    /// Test `subject` against a typed predicate
    pub fn test<T: Record>(&self, predicate: &Predicate<T>, subject: &T) -> Result<bool, EvalError> {
        let value = self.evaluate(predicate.as_lambda(), &[subject.to_value()])?;
        value
            .as_bool()
            .ok_or_else(|| EvalError::type_mismatch("predicate result", "Bool", &value))
    }

    fn eval(&self, expr: &Expr, scope: &mut Scope, depth: usize) -> Result<Value, EvalError> {
        if depth > self.config.max_depth {
            return Err(EvalError::DepthExceeded(self.config.max_depth));
        }
        let next = depth + 1;

        match expr {
            Expr::Parameter(p) => scope
                .iter()
                .rev()
                .find(|(id, _)| *id == p.id)
                .map(|(_, value)| value.clone())
                .ok_or_else(|| EvalError::UnboundParameter(p.name.clone())),

            Expr::Constant { value, .. } => Ok(value.clone()),

            Expr::Member { receiver, member } => match receiver {
                Some(receiver) => {
                    let target = self.eval(receiver, scope, next)?;
                    read_member(&target, member)
                }
                None => self
                    .context
                    .static_value(&member.owner, &member.name)
                    .cloned()
                    .ok_or_else(|| {
                        EvalError::UnknownMember(format!("{}::{}", member.owner, member.name))
                    }),
            },

            Expr::Unary { op, operand } => {
                let value = self.eval(operand, scope, next)?;
                apply_unary(*op, value)
            }

            Expr::Binary { op, left, right } => match op {
                BinaryOp::AndAlso => {
                    if !self.eval_bool(left, scope, next, "operator &&")? {
                        return Ok(Value::Bool(false));
                    }
                    Ok(Value::Bool(self.eval_bool(right, scope, next, "operator &&")?))
                }
                BinaryOp::OrElse => {
                    if self.eval_bool(left, scope, next, "operator ||")? {
                        return Ok(Value::Bool(true));
                    }
                    Ok(Value::Bool(self.eval_bool(right, scope, next, "operator ||")?))
                }
                _ => {
                    let left = self.eval(left, scope, next)?;
                    let right = self.eval(right, scope, next)?;
                    apply_binary(*op, left, right)
                }
            },

            Expr::Call {
                receiver,
                method,
                args,
            } => {
                let receiver = match receiver {
                    Some(receiver) => Some(self.eval(receiver, scope, next)?),
                    None => None,
                };
                if let Some(target) = &receiver {
                    if let Some(result) = self.call_builtin(target, method, args, scope, next)? {
                        return Ok(result);
                    }
                }
                self.call_registered(receiver, method, args, scope, next)
            }

            Expr::Lambda(_) => Err(EvalError::Unsupported(
                "lambda outside a call argument".to_string(),
            )),
        }
    }

    fn eval_bool(
        &self,
        expr: &Expr,
        scope: &mut Scope,
        depth: usize,
        context: &str,
    ) -> Result<bool, EvalError> {
        let value = self.eval(expr, scope, depth)?;
        value
            .as_bool()
            .ok_or_else(|| EvalError::type_mismatch(context, "Bool", &value))
    }

    /// Built-in list and string methods; `None` when `method` is not one
    fn call_builtin(
        &self,
        target: &Value,
        method: &MethodDescriptor,
        args: &[Expr],
        scope: &mut Scope,
        depth: usize,
    ) -> Result<Option<Value>, EvalError> {
        let result = match (method.name.as_str(), target) {
            ("any", Value::List(items)) => {
                let lambda = lambda_arg(method, args)?;
                let mut found = false;
                for item in items {
                    if self.apply_element(lambda, item, scope, depth)? {
                        found = true;
                        break;
                    }
                }
                Value::Bool(found)
            }
            ("all", Value::List(items)) => {
                let lambda = lambda_arg(method, args)?;
                let mut holds = true;
                for item in items {
                    if !self.apply_element(lambda, item, scope, depth)? {
                        holds = false;
                        break;
                    }
                }
                Value::Bool(holds)
            }
            ("contains", Value::List(items)) => {
                let needle = self.eval(single_arg(args)?, scope, depth)?;
                Value::Bool(items.contains(&needle))
            }
            ("len", Value::List(items)) => {
                no_args(method, args)?;
                Value::Int(to_int(items.len())?)
            }
            ("contains", Value::Str(s)) => {
                let needle = self.eval_str(single_arg(args)?, scope, depth, method)?;
                Value::Bool(s.contains(needle.as_str()))
            }
            ("starts_with", Value::Str(s)) => {
                let prefix = self.eval_str(single_arg(args)?, scope, depth, method)?;
                Value::Bool(s.starts_with(prefix.as_str()))
            }
            ("len", Value::Str(s)) => {
                no_args(method, args)?;
                Value::Int(to_int(s.chars().count())?)
            }
            _ => return Ok(None),
        };
        Ok(Some(result))
    }

    fn call_registered(
        &self,
        receiver: Option<Value>,
        method: &MethodDescriptor,
        args: &[Expr],
        scope: &mut Scope,
        depth: usize,
    ) -> Result<Value, EvalError> {
        let function = self
            .context
            .function(&method.name)
            .ok_or_else(|| EvalError::UnknownFunction(method.name.clone()))?;

        let mut values = Vec::with_capacity(args.len() + 1);
        values.extend(receiver);
        for arg in args {
            values.push(self.eval(arg, scope, depth)?);
        }

        if self.config.trace_calls {
            trace!(function = %method.name, args = values.len(), "Invoking registered function");
        }

        function(&values)
    }

    fn apply_element(
        &self,
        lambda: &Lambda,
        item: &Value,
        scope: &mut Scope,
        depth: usize,
    ) -> Result<bool, EvalError> {
        let param = match lambda.params() {
            [param] => param,
            params => {
                return Err(EvalError::ArgumentCount {
                    expected: params.len(),
                    found: 1,
                })
            }
        };

        scope.push((param.id, item.clone()));
        let result = self.eval_bool(lambda.body(), scope, depth, "element predicate");
        scope.pop();
        result
    }

    fn eval_str(
        &self,
        expr: &Expr,
        scope: &mut Scope,
        depth: usize,
        method: &MethodDescriptor,
    ) -> Result<String, EvalError> {
        match self.eval(expr, scope, depth)? {
            Value::Str(s) => Ok(s),
            other => Err(EvalError::type_mismatch(
                format!("argument of {}", method.name),
                "Str",
                &other,
            )),
        }
    }
}

fn read_member(target: &Value, member: &MemberDescriptor) -> Result<Value, EvalError> {
    match target {
        Value::Record(record) => record.get(&member.name).cloned().ok_or_else(|| {
            EvalError::UnknownMember(format!("{}.{}", record.type_name, member.name))
        }),
        other => Err(EvalError::type_mismatch(
            format!("member {}", member.name),
            member.owner.clone(),
            other,
        )),
    }
}

fn lambda_arg<'a>(method: &MethodDescriptor, args: &'a [Expr]) -> Result<&'a Lambda, EvalError> {
    match single_arg(args)? {
        Expr::Lambda(lambda) => Ok(lambda),
        _ => Err(EvalError::Unsupported(format!(
            "{} requires a lambda argument",
            method.name
        ))),
    }
}

fn single_arg<'a>(args: &'a [Expr]) -> Result<&'a Expr, EvalError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(EvalError::ArgumentCount {
            expected: 1,
            found: args.len(),
        }),
    }
}

fn no_args(method: &MethodDescriptor, args: &[Expr]) -> Result<(), EvalError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(EvalError::Function {
            name: method.name.clone(),
            message: format!("takes no arguments, got {}", args.len()),
        })
    }
}

fn to_int(n: usize) -> Result<i64, EvalError> {
    i64::try_from(n).map_err(|_| EvalError::Overflow("len".to_string()))
}

fn apply_unary(op: UnaryOp, value: Value) -> Result<Value, EvalError> {
    match (op, value) {
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Negate, Value::Int(i)) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| EvalError::Overflow("-".to_string())),
        (UnaryOp::Negate, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Not, other) => Err(EvalError::type_mismatch("operator !", "Bool", &other)),
        (UnaryOp::Negate, other) => Err(EvalError::type_mismatch(
            "operator -",
            "Int or Float",
            &other,
        )),
    }
}

fn apply_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, EvalError> {
    let symbol = op.symbol();
    let overflow = || EvalError::Overflow(symbol.to_string());

    let value = match (op, &left, &right) {
        (BinaryOp::And, Value::Bool(a), Value::Bool(b)) => Value::Bool(*a & *b),
        (BinaryOp::And, Value::Int(a), Value::Int(b)) => Value::Int(a & b),
        (BinaryOp::Or, Value::Bool(a), Value::Bool(b)) => Value::Bool(*a | *b),
        (BinaryOp::Or, Value::Int(a), Value::Int(b)) => Value::Int(a | b),

        (BinaryOp::Eq, _, _) => Value::Bool(left == right),
        (BinaryOp::Ne, _, _) => Value::Bool(left != right),

        (BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge, _, _) => {
            let ordering = compare(symbol, &left, &right)?;
            Value::Bool(match op {
                BinaryOp::Lt => ordering == Some(Ordering::Less),
                BinaryOp::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
                BinaryOp::Gt => ordering == Some(Ordering::Greater),
                _ => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            })
        }

        (BinaryOp::Add, Value::Int(a), Value::Int(b)) => {
            Value::Int(a.checked_add(*b).ok_or_else(overflow)?)
        }
        (BinaryOp::Sub, Value::Int(a), Value::Int(b)) => {
            Value::Int(a.checked_sub(*b).ok_or_else(overflow)?)
        }
        (BinaryOp::Mul, Value::Int(a), Value::Int(b)) => {
            Value::Int(a.checked_mul(*b).ok_or_else(overflow)?)
        }
        (BinaryOp::Div | BinaryOp::Rem, Value::Int(_), Value::Int(0)) => {
            return Err(EvalError::DivisionByZero)
        }
        (BinaryOp::Div, Value::Int(a), Value::Int(b)) => {
            Value::Int(a.checked_div(*b).ok_or_else(overflow)?)
        }
        (BinaryOp::Rem, Value::Int(a), Value::Int(b)) => {
            Value::Int(a.checked_rem(*b).ok_or_else(overflow)?)
        }

        (BinaryOp::Add, Value::Float(a), Value::Float(b)) => Value::Float(a + b),
        (BinaryOp::Sub, Value::Float(a), Value::Float(b)) => Value::Float(a - b),
        (BinaryOp::Mul, Value::Float(a), Value::Float(b)) => Value::Float(a * b),
        (BinaryOp::Div, Value::Float(a), Value::Float(b)) => Value::Float(a / b),
        (BinaryOp::Rem, Value::Float(a), Value::Float(b)) => Value::Float(a % b),

        (BinaryOp::Add, Value::Str(a), Value::Str(b)) => Value::Str(format!("{}{}", a, b)),

        _ => {
            return Err(EvalError::TypeMismatch {
                context: format!("operator {}", symbol),
                expected: format!("operands accepted by {}", symbol),
                found: format!("{} and {}", left.kind(), right.kind()),
            })
        }
    };
    Ok(value)
}

/// Ordering of two ordered values; `None` only for NaN floats
fn compare(symbol: &str, left: &Value, right: &Value) -> Result<Option<Ordering>, EvalError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Some(a.cmp(b))),
        (Value::Float(a), Value::Float(b)) => Ok(a.partial_cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
        _ => Err(EvalError::TypeMismatch {
            context: format!("operator {}", symbol),
            expected: "Int, Float or Str".to_string(),
            found: format!("{} and {}", left.kind(), right.kind()),
        }),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use predix_expr::{Parameter, ValueType};
    use proptest::prelude::*;

    fn two_ints(op: BinaryOp) -> Lambda {
        let a = Parameter::new("a", ValueType::Int);
        let b = Parameter::new("b", ValueType::Int);
        let body = Expr::binary(op, Expr::parameter(&a), Expr::parameter(&b)).unwrap();
        Lambda::new(vec![a, b], body).unwrap()
    }

    proptest! {
        /// Property: integer addition matches checked_add, overflow included
        #[test]
        fn test_checked_add_property(a: i64, b: i64) {
            let result = Evaluator::default().evaluate(&two_ints(BinaryOp::Add), &[Value::Int(a), Value::Int(b)]);
            match a.checked_add(b) {
                Some(sum) => prop_assert_eq!(result.unwrap(), Value::Int(sum)),
                None => prop_assert_eq!(result.unwrap_err(), EvalError::Overflow("+".to_string())),
            }
        }

        /// Property: comparisons agree with Rust's integer ordering
        #[test]
        fn test_comparison_property(a: i64, b: i64) {
            let evaluator = Evaluator::default();
            let args = [Value::Int(a), Value::Int(b)];
            prop_assert_eq!(evaluator.evaluate(&two_ints(BinaryOp::Lt), &args).unwrap(), Value::Bool(a < b));
            prop_assert_eq!(evaluator.evaluate(&two_ints(BinaryOp::Ge), &args).unwrap(), Value::Bool(a >= b));
            prop_assert_eq!(evaluator.evaluate(&two_ints(BinaryOp::Ne), &args).unwrap(), Value::Bool(a != b));
        }
    }
}
