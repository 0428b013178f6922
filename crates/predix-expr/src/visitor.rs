//! Tree rewriting visitor
//!
//! A visitor maps a tree to a new tree. The provided methods rebuild every
//! node from the visited results of its children, so an implementation that
//! overrides nothing returns a structurally equal copy. Overriding
//! [`ExprVisitor::visit_parameter`] is enough to rewrite parameter
//! references throughout a tree.

use crate::{Expr, Lambda, Parameter};

/// Structural rewrite over [`Expr`] trees
pub trait ExprVisitor {
    /// Visit any node; defaults to [`walk_expr`]
    fn visit(&mut self, expr: &Expr) -> Expr {
        walk_expr(self, expr)
    }

    /// Visit a parameter reference (leaf); defaults to an unchanged copy
    fn visit_parameter(&mut self, parameter: &Parameter) -> Expr {
        Expr::Parameter(parameter.clone())
    }

    /// Visit a parameter declared by a nested lambda
    fn visit_binding(&mut self, parameter: &Parameter) -> Parameter {
        parameter.clone()
    }

    /// Visit a nested lambda; defaults to [`walk_lambda`]
    fn visit_lambda(&mut self, lambda: &Lambda) -> Lambda {
        walk_lambda(self, lambda)
    }
}

/// Rebuild `expr` from the visited results of its children
pub fn walk_expr<V: ExprVisitor + ?Sized>(visitor: &mut V, expr: &Expr) -> Expr {
    match expr {
        Expr::Parameter(parameter) => visitor.visit_parameter(parameter),
        Expr::Constant { value, ty } => Expr::Constant {
            value: value.clone(),
            ty: ty.clone(),
        },
        Expr::Member { receiver, member } => Expr::Member {
            receiver: receiver.as_deref().map(|r| Box::new(visitor.visit(r))),
            member: member.clone(),
        },
        Expr::Unary { op, operand } => Expr::Unary {
            op: *op,
            operand: Box::new(visitor.visit(operand)),
        },
        Expr::Binary { op, left, right } => {
            let left = visitor.visit(left);
            let right = visitor.visit(right);
            Expr::Binary {
                op: *op,
                left: Box::new(left),
                right: Box::new(right),
            }
        }
        Expr::Call {
            receiver,
            method,
            args,
        } => {
            let receiver = receiver.as_deref().map(|r| Box::new(visitor.visit(r)));
            let args = args.iter().map(|arg| visitor.visit(arg)).collect();
            Expr::Call {
                receiver,
                method: method.clone(),
                args,
            }
        }
        Expr::Lambda(lambda) => Expr::Lambda(visitor.visit_lambda(lambda)),
    }
}

/// Rebuild a lambda from its visited bindings and body
pub fn walk_lambda<V: ExprVisitor + ?Sized>(visitor: &mut V, lambda: &Lambda) -> Lambda {
    let params = lambda
        .params()
        .iter()
        .map(|p| visitor.visit_binding(p))
        .collect();
    let body = visitor.visit(lambda.body());
    Lambda::from_parts(params, body)
}

/// All parameter references in `expr`, in pre-order, nested lambdas included
pub fn parameter_references(expr: &Expr) -> Vec<&Parameter> {
    fn collect<'a>(expr: &'a Expr, out: &mut Vec<&'a Parameter>) {
        match expr {
            Expr::Parameter(p) => out.push(p),
            Expr::Constant { .. } => {}
            Expr::Member { receiver, .. } => {
                if let Some(receiver) = receiver {
                    collect(receiver, out);
                }
            }
            Expr::Unary { operand, .. } => collect(operand, out),
            Expr::Binary { left, right, .. } => {
                collect(left, out);
                collect(right, out);
            }
            Expr::Call { receiver, args, .. } => {
                if let Some(receiver) = receiver {
                    collect(receiver, out);
                }
                for arg in args {
                    collect(arg, out);
                }
            }
            Expr::Lambda(lambda) => collect(lambda.body(), out),
        }
    }

    let mut out = Vec::new();
    collect(expr, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemberDescriptor, MethodDescriptor, ValueType};

    struct Identity;

    impl ExprVisitor for Identity {}

    /// Counts every parameter reference it sees
    struct Counter(usize);

    impl ExprVisitor for Counter {
        fn visit_parameter(&mut self, parameter: &Parameter) -> Expr {
            self.0 += 1;
            Expr::Parameter(parameter.clone())
        }
    }

    fn sample() -> (Parameter, Expr) {
        let p = Parameter::new("p", ValueType::record("Person"));
        let name = MemberDescriptor::instance("Person", "name", ValueType::Str);
        let tags = MemberDescriptor::instance("Person", "tags", ValueType::list(ValueType::Str));
        let t = Parameter::new("t", ValueType::Str);

        let starts = Expr::call(
            Some(Expr::member(Expr::parameter(&p), name).unwrap()),
            MethodDescriptor::starts_with(),
            vec![Expr::str("A")],
        )
        .unwrap();
        let inner = Lambda::new(
            vec![t.clone()],
            Expr::eq(Expr::parameter(&t), Expr::str("vip")).unwrap(),
        )
        .unwrap();
        let any = Expr::call(
            Some(Expr::member(Expr::parameter(&p), tags).unwrap()),
            MethodDescriptor::any(ValueType::Str),
            vec![Expr::Lambda(inner)],
        )
        .unwrap();
        let body = Expr::binary(crate::BinaryOp::AndAlso, Expr::not(starts).unwrap(), any).unwrap();
        (p, body)
    }

    #[test]
    fn test_identity_rebuild_is_structurally_equal() {
        let (_, body) = sample();
        let copy = Identity.visit(&body);
        assert_eq!(copy, body);
    }

    #[test]
    fn test_visitor_reaches_nested_lambda_body() {
        let (_, body) = sample();
        let mut counter = Counter(0);
        counter.visit(&body);
        // p (name), p (tags), t (inside the nested lambda)
        assert_eq!(counter.0, 3);
    }

    #[test]
    fn test_parameter_references_preorder() {
        let (p, body) = sample();
        let refs = parameter_references(&body);
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].id, p.id);
        assert_eq!(refs[2].name, "t");
    }
}
