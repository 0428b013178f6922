//! Static types and runtime values carried by expression nodes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Static type of an expression node
///
/// The set is closed: every node in a tree reports one of these, and the
/// checked constructors in [`crate::Expr`] compare them to reject ill-typed
/// trees at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Boolean
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// UTF-8 string
    Str,
    /// Homogeneous list
    List(Box<ValueType>),
    /// Record of the named host type
    Record(String),
    /// Nested lambda, only valid as a call argument
    Lambda {
        /// Parameter types, in order
        params: Vec<ValueType>,
        /// Body type
        returns: Box<ValueType>,
    },
}

impl ValueType {
    /// List of the given element type
    pub fn list(elem: ValueType) -> Self {
        ValueType::List(Box::new(elem))
    }

    /// Record of the given host type
    pub fn record(type_name: impl Into<String>) -> Self {
        ValueType::Record(type_name.into())
    }

    /// Lambda type with the given signature
    pub fn lambda(params: Vec<ValueType>, returns: ValueType) -> Self {
        ValueType::Lambda {
            params,
            returns: Box::new(returns),
        }
    }

    /// Whether values of this type support `<`, `<=`, `>`, `>=`
    pub fn is_ordered(&self) -> bool {
        matches!(self, ValueType::Int | ValueType::Float | ValueType::Str)
    }

    /// Whether values of this type support arithmetic
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Int | ValueType::Float)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => f.write_str("Bool"),
            ValueType::Int => f.write_str("Int"),
            ValueType::Float => f.write_str("Float"),
            ValueType::Str => f.write_str("Str"),
            ValueType::List(elem) => write!(f, "List<{}>", elem),
            ValueType::Record(name) => f.write_str(name),
            ValueType::Lambda { params, returns } => {
                f.write_str("Fn(")?;
                for (idx, param) in params.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") -> {}", returns)
            }
        }
    }
}

/// Field values of a record instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordValue {
    /// Host type name, matches `ValueType::Record`
    pub type_name: String,
    /// Field values by member name
    pub fields: BTreeMap<String, Value>,
}

impl RecordValue {
    /// Create an empty record of the given type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a field by member name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Runtime value: constants in trees, arguments and results of evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// String
    Str(String),
    /// List
    List(Vec<Value>),
    /// Record instance
    Record(RecordValue),
}

impl Value {
    /// Check whether this value is a valid inhabitant of `ty`
    ///
    /// Empty lists conform to every list type.
    pub fn conforms_to(&self, ty: &ValueType) -> bool {
        match (self, ty) {
            (Value::Bool(_), ValueType::Bool)
            | (Value::Int(_), ValueType::Int)
            | (Value::Float(_), ValueType::Float)
            | (Value::Str(_), ValueType::Str) => true,
            (Value::List(items), ValueType::List(elem)) => {
                items.iter().all(|item| item.conforms_to(elem))
            }
            (Value::Record(record), ValueType::Record(name)) => record.type_name == *name,
            _ => false,
        }
    }

    /// Short name of the value's variant, used in runtime error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Str(_) => "Str",
            Value::List(_) => "List",
            Value::Record(_) => "Record",
        }
    }

    /// Borrow the boolean payload, if any
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<RecordValue> for Value {
    fn from(record: RecordValue) -> Self {
        Value::Record(record)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
