//! Member and method descriptors baked into the tree at construction time

use crate::ValueType;
use serde::{Deserialize, Serialize};

/// Whether a member belongs to each instance or to the type itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    /// Read from a receiver value
    Instance,
    /// Declared on the type, no receiver
    Static,
}

/// A field or property of a record type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberDescriptor {
    /// Declared member name
    pub name: String,
    /// Record type that declares the member
    pub owner: String,
    /// Type of the member's value
    pub ty: ValueType,
    /// Instance or static
    pub kind: MemberKind,
}

impl MemberDescriptor {
    /// Describe an instance member
    pub fn instance(owner: impl Into<String>, name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            ty,
            kind: MemberKind::Instance,
        }
    }

    /// Describe a static member
    pub fn static_member(owner: impl Into<String>, name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            ty,
            kind: MemberKind::Static,
        }
    }

    /// Whether the member is read from a receiver
    pub fn is_instance(&self) -> bool {
        self.kind == MemberKind::Instance
    }
}

/// Signature of a callable: a free function or a method on a receiver type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Name used to resolve the call at evaluation time
    pub name: String,
    /// Receiver type, `None` for free functions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<ValueType>,
    /// Parameter types, in order
    pub params: Vec<ValueType>,
    /// Return type
    pub returns: ValueType,
}

impl MethodDescriptor {
    /// Free function without receiver
    pub fn function(name: impl Into<String>, params: Vec<ValueType>, returns: ValueType) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            params,
            returns,
        }
    }

    /// Method invoked on a receiver of type `receiver`
    pub fn method(
        receiver: ValueType,
        name: impl Into<String>,
        params: Vec<ValueType>,
        returns: ValueType,
    ) -> Self {
        Self {
            name: name.into(),
            receiver: Some(receiver),
            params,
            returns,
        }
    }

    /// `list.any(|x| ...)`
    pub fn any(elem: ValueType) -> Self {
        Self::method(
            ValueType::list(elem.clone()),
            "any",
            vec![ValueType::lambda(vec![elem], ValueType::Bool)],
            ValueType::Bool,
        )
    }

    /// `list.all(|x| ...)`
    pub fn all(elem: ValueType) -> Self {
        Self::method(
            ValueType::list(elem.clone()),
            "all",
            vec![ValueType::lambda(vec![elem], ValueType::Bool)],
            ValueType::Bool,
        )
    }

    /// `list.contains(x)`
    pub fn contains(elem: ValueType) -> Self {
        Self::method(ValueType::list(elem.clone()), "contains", vec![elem], ValueType::Bool)
    }

    /// `list.len()`
    pub fn len(elem: ValueType) -> Self {
        Self::method(ValueType::list(elem), "len", Vec::new(), ValueType::Int)
    }

    /// `s.contains(t)` on strings
    pub fn str_contains() -> Self {
        Self::method(ValueType::Str, "contains", vec![ValueType::Str], ValueType::Bool)
    }

    /// `s.starts_with(t)`
    pub fn starts_with() -> Self {
        Self::method(ValueType::Str, "starts_with", vec![ValueType::Str], ValueType::Bool)
    }

    /// `s.len()` in characters
    pub fn str_len() -> Self {
        Self::method(ValueType::Str, "len", Vec::new(), ValueType::Int)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_kinds() {
        let age = MemberDescriptor::instance("Person", "age", ValueType::Int);
        let max = MemberDescriptor::static_member("Person", "MAX_AGE", ValueType::Int);
        assert!(age.is_instance());
        assert!(!max.is_instance());
    }

    #[test]
    fn test_any_signature() {
        let any = MethodDescriptor::any(ValueType::Str);
        assert_eq!(any.receiver, Some(ValueType::list(ValueType::Str)));
        assert_eq!(
            any.params,
            vec![ValueType::lambda(vec![ValueType::Str], ValueType::Bool)]
        );
        assert_eq!(any.returns, ValueType::Bool);
    }
}
