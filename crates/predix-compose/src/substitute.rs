//! Identity-keyed parameter substitution

use crate::ComposeError;
use predix_expr::{Expr, ExprError, ExprVisitor, Parameter, ParameterId};
use std::collections::HashMap;

/// Mapping from old parameter identities to replacement parameters
///
/// Keys are identities, so a parameter is only replaced when it is the very
/// parameter that was mapped, whatever its display name.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionMap {
    entries: HashMap<ParameterId, Parameter>,
}

impl SubstitutionMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Map each of `from` to the parameter at the same position in `to`
    ///
    /// # Errors
    /// - `ArityMismatch` if the slices differ in length
    /// - `TypeMismatch` if positional parameters have different types
    pub fn positional(from: &[Parameter], to: &[Parameter]) -> Result<Self, ComposeError> {
        if from.len() != to.len() {
            return Err(ComposeError::ArityMismatch {
                first: to.len(),
                second: from.len(),
            });
        }

        let mut map = Self::new();
        for (idx, (old, new)) in from.iter().zip(to).enumerate() {
            if old.ty != new.ty {
                return Err(ExprError::TypeMismatch {
                    context: format!("parameter {}", idx),
                    expected: new.ty.to_string(),
                    found: old.ty.clone(),
                }
                .into());
            }
            map.insert(old, new.clone());
        }
        Ok(map)
    }

    /// Map `from` to `to`, returning the previous replacement if any
    pub fn insert(&mut self, from: &Parameter, to: Parameter) -> Option<Parameter> {
        self.entries.insert(from.id, to)
    }

    /// Replacement for the given identity
    pub fn get(&self, id: &ParameterId) -> Option<&Parameter> {
        self.entries.get(id)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Visitor that rewrites mapped parameter references and leaves the rest
pub struct ParameterSubstitutor<'a> {
    map: &'a SubstitutionMap,
    replaced: usize,
}

impl<'a> ParameterSubstitutor<'a> {
    /// Create a substitutor over `map`
    pub fn new(map: &'a SubstitutionMap) -> Self {
        Self { map, replaced: 0 }
    }

    /// Number of references rewritten so far
    pub fn replaced(&self) -> usize {
        self.replaced
    }
}

impl ExprVisitor for ParameterSubstitutor<'_> {
    fn visit_parameter(&mut self, parameter: &Parameter) -> Expr {
        match self.map.get(&parameter.id) {
            Some(replacement) => {
                self.replaced += 1;
                Expr::Parameter(replacement.clone())
            }
            None => Expr::Parameter(parameter.clone()),
        }
    }

    fn visit_binding(&mut self, parameter: &Parameter) -> Parameter {
        self.map
            .get(&parameter.id)
            .cloned()
            .unwrap_or_else(|| parameter.clone())
    }
}

/// Rewrite every reference in `expr` according to `map`
///
/// Returns a new tree; `expr` is not modified.
pub fn replace_parameters(map: &SubstitutionMap, expr: &Expr) -> Expr {
    ParameterSubstitutor::new(map).visit(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use predix_expr::{parameter_references, BinaryOp, MemberDescriptor, ValueType};

    fn person(name: &str) -> Parameter {
        Parameter::new(name, ValueType::record("Person"))
    }

    fn age_over(p: &Parameter, n: i64) -> Expr {
        let age = MemberDescriptor::instance("Person", "age", ValueType::Int);
        Expr::gt(Expr::member(Expr::parameter(p), age).unwrap(), Expr::int(n)).unwrap()
    }

    #[test]
    fn test_mapped_references_rewritten() {
        let old = person("q");
        let new = person("p");
        let mut map = SubstitutionMap::new();
        map.insert(&old, new.clone());

        let rewritten = replace_parameters(&map, &age_over(&old, 3));
        let refs = parameter_references(&rewritten);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].id, new.id);
        assert_eq!(refs[0].name, "p");
    }

    #[test]
    fn test_unmapped_references_kept() {
        let mapped = person("a");
        let other = person("b");
        let mut map = SubstitutionMap::new();
        map.insert(&mapped, person("c"));

        let expr = age_over(&other, 1);
        assert_eq!(replace_parameters(&map, &expr), expr);
    }

    #[test]
    fn test_same_name_different_identity_not_unified() {
        let first = person("p");
        let unrelated = person("p");
        let mut map = SubstitutionMap::new();
        map.insert(&first, person("x"));

        let expr = age_over(&unrelated, 1);
        let rewritten = replace_parameters(&map, &expr);
        assert_eq!(parameter_references(&rewritten)[0].id, unrelated.id);
    }

    #[test]
    fn test_input_left_untouched() {
        let old = person("q");
        let mut map = SubstitutionMap::new();
        map.insert(&old, person("p"));

        let expr = Expr::binary(BinaryOp::Or, age_over(&old, 1), age_over(&old, 2)).unwrap();
        let before = expr.clone();
        let mut substitutor = ParameterSubstitutor::new(&map);
        let _ = substitutor.visit(&expr);

        assert_eq!(substitutor.replaced(), 2);
        assert_eq!(expr, before);
        assert_eq!(parameter_references(&expr)[0].id, old.id);
    }

    #[test]
    fn test_positional_map() {
        let from = [person("a"), Parameter::new("n", ValueType::Int)];
        let to = [person("x"), Parameter::new("m", ValueType::Int)];
        let map = SubstitutionMap::positional(&from, &to).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&from[1].id).unwrap().id, to[1].id);
    }

    #[test]
    fn test_positional_map_rejects_mismatches() {
        let one = [person("a")];
        let two = [person("x"), person("y")];
        assert!(matches!(
            SubstitutionMap::positional(&one, &two),
            Err(ComposeError::ArityMismatch { first: 2, second: 1 })
        ));

        let int = [Parameter::new("n", ValueType::Int)];
        assert!(matches!(
            SubstitutionMap::positional(&int, &one),
            Err(ComposeError::Expr(ExprError::TypeMismatch { .. }))
        ));
    }
}
