//! Host types that predicates range over

use crate::{MemberDescriptor, Value, ValueType};

/// A host type usable as the parameter type of a [`crate::Predicate`]
///
/// # Examples
///
/// ```
/// use predix_expr::{Record, RecordValue, Value, ValueType};
///
/// struct Person {
///     age: i64,
/// }
///
/// impl Record for Person {
///     const TYPE_NAME: &'static str = "Person";
///
///     fn to_value(&self) -> Value {
///         RecordValue::new(Self::TYPE_NAME).with("age", self.age).into()
///     }
/// }
///
/// assert_eq!(Person::value_type(), ValueType::record("Person"));
/// assert_eq!(Person::member("age", ValueType::Int).owner, "Person");
/// ```
pub trait Record {
    /// Name used in `ValueType::Record` and member descriptors
    const TYPE_NAME: &'static str;

    /// Snapshot of the instance as a record value
    fn to_value(&self) -> Value;

    /// The record type of `Self`
    fn value_type() -> ValueType {
        ValueType::Record(Self::TYPE_NAME.to_string())
    }

    /// Descriptor for an instance member declared on `Self`
    fn member(name: &str, ty: ValueType) -> MemberDescriptor {
        MemberDescriptor::instance(Self::TYPE_NAME, name, ty)
    }

    /// Descriptor for a static member declared on `Self`
    fn static_member(name: &str, ty: ValueType) -> MemberDescriptor {
        MemberDescriptor::static_member(Self::TYPE_NAME, name, ty)
    }
}
