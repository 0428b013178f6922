//! Typed single-parameter boolean predicates

use crate::{Expr, ExprError, Lambda, Parameter, Record, ValueType};
use std::fmt;
use std::marker::PhantomData;

/// A boolean predicate over one parameter of host type `T`, kept as data
///
/// Invariants, checked by every constructor:
/// - exactly one declared parameter, of type `T::value_type()`
/// - the body is `Bool`
/// - every parameter reference in the body resolves (no free variables)
pub struct Predicate<T> {
    lambda: Lambda,
    _marker: PhantomData<fn(&T) -> bool>,
}

impl<T: Record> Predicate<T> {
    /// Build from an explicit parameter and body
    pub fn new(parameter: Parameter, body: Expr) -> Result<Self, ExprError> {
        Self::from_lambda(Lambda::new(vec![parameter], body)?)
    }

    /// Build with a fresh parameter named `name`
    ///
    /// The closure receives a reference to the new parameter and returns the
    /// body.
    ///
    /// # Examples
    ///
    /// ```
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
    /// let adult = Predicate::<Person>::build("p", |p| {
    ///     Expr::ge(Expr::member(p, Person::member("age", ValueType::Int))?, Expr::int(18))
    /// })
    /// .unwrap();
    /// assert_eq!(adult.to_string(), "|p: Person| (p.age >= 18)");
    /// ```
    pub fn build<F>(name: &str, body: F) -> Result<Self, ExprError>
    where
        F: FnOnce(Expr) -> Result<Expr, ExprError>,
    {
        let parameter = Parameter::new(name, T::value_type());
        let body = body(Expr::parameter(&parameter))?;
        Self::new(parameter, body)
    }

    /// Wrap an existing lambda after checking the predicate invariants
    ///
    /// # Errors
    /// - `ArityMismatch` unless the lambda declares exactly one parameter
    /// - `TypeMismatch` for a parameter not of type `T` or a non-`Bool` body
    /// - `UnboundParameter` for dangling references
    pub fn from_lambda(lambda: Lambda) -> Result<Self, ExprError> {
        if lambda.arity() != 1 {
            return Err(ExprError::ArityMismatch {
                expected: 1,
                found: lambda.arity(),
            });
        }

        let expected = T::value_type();
        let param_ty = &lambda.params()[0].ty;
        if *param_ty != expected {
            return Err(ExprError::type_mismatch(
                "predicate parameter",
                expected.to_string(),
                param_ty,
            ));
        }

        lambda.validate()?;
        let body_ty = lambda.body().value_type();
        if body_ty != ValueType::Bool {
            return Err(ExprError::type_mismatch("predicate body", "Bool", &body_ty));
        }

        Ok(Self {
            lambda,
            _marker: PhantomData,
        })
    }
}

impl<T> Predicate<T> {
    /// The declared parameter
    pub fn parameter(&self) -> &Parameter {
        &self.lambda.params()[0]
    }

    /// The boolean body
    pub fn body(&self) -> &Expr {
        self.lambda.body()
    }

    /// Borrow as an untyped lambda
    pub fn as_lambda(&self) -> &Lambda {
        &self.lambda
    }

    /// Convert into an untyped lambda
    pub fn into_lambda(self) -> Lambda {
        self.lambda
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            lambda: self.lambda.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Predicate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.lambda == other.lambda
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("type", &std::any::type_name::<T>())
            .field("lambda", &self.lambda)
            .finish()
    }
}

impl<T> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.lambda, f)
    }
}
