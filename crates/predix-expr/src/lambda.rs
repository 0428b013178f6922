//! Lambda: declared parameters plus a body that may only reference them

use crate::{Expr, ExprError, Parameter, ValueType};
use serde::{Deserialize, Serialize};

/// A function expression `|params| body`
///
/// Every parameter reference inside `body` resolves either to one of
/// `params` or to a parameter of a nested lambda that encloses the
/// reference. [`Lambda::new`] enforces this; deserialized lambdas must go
/// through [`Lambda::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    params: Vec<Parameter>,
    body: Box<Expr>,
}

impl Lambda {
    /// Build a lambda, rejecting dangling parameter references
    ///
    /// # Errors
    /// `UnboundParameter` if `body` references a parameter that is not in
    /// scope, `TypeMismatch` if a reference disagrees with the declared type
    pub fn new(params: Vec<Parameter>, body: Expr) -> Result<Self, ExprError> {
        let lambda = Self::from_parts(params, body);
        lambda.check_bindings()?;
        Ok(lambda)
    }

    /// Assemble without checks; only for structural rebuilds of valid trees
    pub(crate) fn from_parts(params: Vec<Parameter>, body: Expr) -> Self {
        Self {
            params,
            body: Box::new(body),
        }
    }

    /// Declared parameters, in order
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Body expression
    pub fn body(&self) -> &Expr {
        &self.body
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Consume into parameters and body
    pub fn into_parts(self) -> (Vec<Parameter>, Expr) {
        (self.params, *self.body)
    }

    /// Static type `Fn(params) -> body`
    pub fn value_type(&self) -> ValueType {
        ValueType::lambda(
            self.params.iter().map(|p| p.ty.clone()).collect(),
            self.body.value_type(),
        )
    }

    /// Check bindings and types of the whole tree
    ///
    /// Used for lambdas that did not come through [`Lambda::new`], such as
    /// those read from JSON.
    pub fn validate(&self) -> Result<ValueType, ExprError> {
        self.check_bindings()?;
        self.body.typecheck()?;
        Ok(self.value_type())
    }

    fn check_bindings(&self) -> Result<(), ExprError> {
        let mut scope: Vec<&Parameter> = self.params.iter().collect();
        check_scope(&self.body, &mut scope)
    }
}

fn check_scope<'a>(expr: &'a Expr, scope: &mut Vec<&'a Parameter>) -> Result<(), ExprError> {
    match expr {
        Expr::Parameter(p) => match scope.iter().rev().find(|declared| declared.id == p.id) {
            Some(declared) if declared.ty == p.ty => Ok(()),
            Some(declared) => Err(ExprError::type_mismatch(
                format!("reference to parameter '{}'", declared.name),
                declared.ty.to_string(),
                &p.ty,
            )),
            None => Err(ExprError::UnboundParameter {
                name: p.name.clone(),
                id: p.id,
            }),
        },
        Expr::Constant { .. } => Ok(()),
        Expr::Member { receiver, .. } => match receiver {
            Some(receiver) => check_scope(receiver, scope),
            None => Ok(()),
        },
        Expr::Unary { operand, .. } => check_scope(operand, scope),
        Expr::Binary { left, right, .. } => {
            check_scope(left, scope)?;
            check_scope(right, scope)
        }
        Expr::Call { receiver, args, .. } => {
            if let Some(receiver) = receiver {
                check_scope(receiver, scope)?;
            }
            args.iter().try_for_each(|arg| check_scope(arg, scope))
        }
        Expr::Lambda(nested) => {
            let depth = scope.len();
            scope.extend(nested.params.iter());
            let result = check_scope(&nested.body, scope);
            scope.truncate(depth);
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemberDescriptor, MethodDescriptor};

    fn person() -> Parameter {
        Parameter::new("p", ValueType::record("Person"))
    }

    #[test]
    fn test_bound_reference_accepted() {
        let p = person();
        let age = MemberDescriptor::instance("Person", "age", ValueType::Int);
        let body = Expr::gt(Expr::member(Expr::parameter(&p), age).unwrap(), Expr::int(18)).unwrap();
        let lambda = Lambda::new(vec![p], body).unwrap();
        assert_eq!(lambda.arity(), 1);
        assert_eq!(
            lambda.value_type(),
            ValueType::lambda(vec![ValueType::record("Person")], ValueType::Bool)
        );
    }

    #[test]
    fn test_same_name_other_identity_is_dangling() {
        let declared = person();
        let stranger = person();
        let age = MemberDescriptor::instance("Person", "age", ValueType::Int);
        let body = Expr::gt(
            Expr::member(Expr::parameter(&stranger), age).unwrap(),
            Expr::int(18),
        )
        .unwrap();

        let err = Lambda::new(vec![declared], body).unwrap_err();
        assert_eq!(
            err,
            ExprError::UnboundParameter {
                name: "p".to_string(),
                id: stranger.id,
            }
        );
    }

    #[test]
    fn test_nested_lambda_scope() {
        let p = person();
        let tags = MemberDescriptor::instance("Person", "tags", ValueType::list(ValueType::Str));
        let t = Parameter::new("t", ValueType::Str);
        let inner = Lambda::new(
            vec![t.clone()],
            Expr::eq(Expr::parameter(&t), Expr::str("admin")).unwrap(),
        )
        .unwrap();
        let body = Expr::call(
            Some(Expr::member(Expr::parameter(&p), tags).unwrap()),
            MethodDescriptor::any(ValueType::Str),
            vec![Expr::Lambda(inner)],
        )
        .unwrap();

        let lambda = Lambda::new(vec![p], body).unwrap();
        assert!(lambda.validate().is_ok());

        // The nested parameter is not visible outside its lambda
        let leaked = Expr::eq(Expr::parameter(&t), Expr::str("x")).unwrap();
        assert!(Lambda::new(vec![person()], leaked).is_err());
    }

    #[test]
    fn test_reference_type_must_match_declaration() {
        let p = person();
        let mut as_int = p.clone();
        as_int.ty = ValueType::Int;
        let body = Expr::gt(Expr::parameter(&as_int), Expr::int(5)).unwrap();

        let err = Lambda::new(vec![p.clone()], body.clone()).unwrap_err();
        assert_eq!(
            err,
            ExprError::TypeMismatch {
                context: "reference to parameter 'p'".to_string(),
                expected: "Person".to_string(),
                found: ValueType::Int,
            }
        );

        // Same check on a tree assembled without the constructor
        let unchecked = Lambda::from_parts(vec![p], body);
        assert!(matches!(unchecked.validate(), Err(ExprError::TypeMismatch { .. })));
    }

    #[test]
    fn test_nested_reference_type_checked() {
        let t = Parameter::new("t", ValueType::Str);
        let mut as_int = t.clone();
        as_int.ty = ValueType::Int;
        let inner = Lambda::from_parts(
            vec![t],
            Expr::Binary {
                op: crate::BinaryOp::Eq,
                left: Box::new(Expr::parameter(&as_int)),
                right: Box::new(Expr::int(1)),
            },
        );
        let outer = Lambda::from_parts(Vec::new(), Expr::Lambda(inner));
        assert!(matches!(outer.validate(), Err(ExprError::TypeMismatch { .. })));
    }
}
