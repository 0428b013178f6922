//! Predicate composition
//!
//! Joining two predicates under a connective takes one rewrite and one join:
//!
//! 1. map each of the second lambda's parameters to the first lambda's
//!    parameter at the same position
//! 2. rewrite the second body's references through that map
//! 3. join `first.body <op> rewritten` under the connective's operator
//! 4. wrap the result in a lambda declaring the first lambda's parameters
//!
//! Neither input is modified. Composing a predicate with itself is legal.

use crate::{ComposeError, Connective, ParameterSubstitutor, SubstitutionMap};
use predix_expr::{Expr, ExprError, ExprVisitor, Lambda, Predicate, Record, ValueType};
use tracing::debug;

/// Compose two lambdas of equal arity under `connective`
///
/// # Errors
/// - `ArityMismatch` if the lambdas declare different numbers of parameters
/// - `Expr(..)` if either input fails [`Lambda::validate`], positional
///   parameter types differ, or either body is not `Bool`
pub fn compose_lambdas(
    first: &Lambda,
    second: &Lambda,
    connective: Connective,
) -> Result<Lambda, ComposeError> {
    if first.arity() != second.arity() {
        return Err(ComposeError::ArityMismatch {
            first: first.arity(),
            second: second.arity(),
        });
    }

    for (label, lambda) in [("first", first), ("second", second)] {
        lambda.validate()?;
        let body_ty = lambda.body().value_type();
        if body_ty != ValueType::Bool {
            return Err(ExprError::TypeMismatch {
                context: format!("{} predicate body", label),
                expected: "Bool".to_string(),
                found: body_ty,
            }
            .into());
        }
    }

    let map = SubstitutionMap::positional(second.params(), first.params())?;
    let mut substitutor = ParameterSubstitutor::new(&map);
    let rewritten = substitutor.visit(second.body());

    let body = Expr::binary(connective.operator(), first.body().clone(), rewritten)?;
    let composed = Lambda::new(first.params().to_vec(), body)?;

    debug!(
        connective = %connective,
        arity = composed.arity(),
        replaced = substitutor.replaced(),
        nodes = composed.body().node_count(),
        "Composed predicates"
    );

    Ok(composed)
}

/// Composition operations on predicate-like values
///
/// # Examples
///
/// ```
/// use predix_compose::ComposeExt;
/// use predix_expr::{Expr, Predicate, Record, RecordValue, Value, ValueType};
///
/// struct Person;
///
/// impl Record for Person {
///     const TYPE_NAME: &'static str = "Person";
///     fn to_value(&self) -> Value {
///         RecordValue::new(Self::TYPE_NAME).into()
///     }
/// }
///
/// let age = |p| Expr::member(p, Person::member("age", ValueType::Int));
/// let adult = Predicate::<Person>::build("p", |p| Expr::ge(age(p)?, Expr::int(18))).unwrap();
/// let senior = Predicate::<Person>::build("q", |q| Expr::lt(age(q)?, Expr::int(65))).unwrap();
///
/// let working_age = adult.and_also(&senior).unwrap();
/// assert_eq!(
///     working_age.to_string(),
///     "|p: Person| ((p.age >= 18) && (p.age < 65))"
/// );
/// ```
pub trait ComposeExt: Sized {
    /// Join `self` and `other` under `connective`
    fn compose(&self, other: &Self, connective: Connective) -> Result<Self, ComposeError>;

    /// `self & other`, both sides evaluated
    fn and(&self, other: &Self) -> Result<Self, ComposeError> {
        self.compose(other, Connective::And)
    }

    /// `self && other`, right side skipped when `self` is false
    fn and_also(&self, other: &Self) -> Result<Self, ComposeError> {
        self.compose(other, Connective::AndAlso)
    }

    /// `self | other`, both sides evaluated
    fn or(&self, other: &Self) -> Result<Self, ComposeError> {
        self.compose(other, Connective::Or)
    }
}

impl ComposeExt for Lambda {
    fn compose(&self, other: &Self, connective: Connective) -> Result<Self, ComposeError> {
        compose_lambdas(self, other, connective)
    }
}

impl<T: Record> ComposeExt for Predicate<T> {
    fn compose(&self, other: &Self, connective: Connective) -> Result<Self, ComposeError> {
        let lambda = compose_lambdas(self.as_lambda(), other.as_lambda(), connective)?;
        Ok(Predicate::from_lambda(lambda)?)
    }
}
