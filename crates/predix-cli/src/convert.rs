//! Plain JSON to runtime values and back.
//!
//! Arguments on the command line are ordinary JSON (`{"age": 30}`), not the
//! tagged encoding used inside serialized trees. The declared parameter
//! type guides the conversion where JSON alone is ambiguous.

use crate::error::{CliError, Result};
use predix_expr::{RecordValue, Value, ValueType};
use serde_json::{Map, Number};

/// Convert a JSON value, using `hint` to pick numeric kinds and record names.
///
/// Objects nested inside a record carry no type information; they become
/// records named after the field they were read from.
pub fn from_json(json: &serde_json::Value, hint: Option<&ValueType>) -> Result<Value> {
    match json {
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => number(n, hint),
        serde_json::Value::String(s) => Ok(Value::Str(s.clone())),
        serde_json::Value::Array(items) => {
            let elem = match hint {
                Some(ValueType::List(elem)) => Some(elem.as_ref()),
                _ => None,
            };
            items
                .iter()
                .map(|item| from_json(item, elem))
                .collect::<Result<Vec<_>>>()
                .map(Value::List)
        }
        serde_json::Value::Object(fields) => {
            let type_name = match hint {
                Some(ValueType::Record(name)) => name.clone(),
                _ => "Record".to_string(),
            };
            let mut record = RecordValue::new(type_name);
            for (name, field) in fields {
                let nested = match field {
                    serde_json::Value::Object(_) => Some(ValueType::record(name.clone())),
                    _ => None,
                };
                record
                    .fields
                    .insert(name.clone(), from_json(field, nested.as_ref())?);
            }
            Ok(Value::Record(record))
        }
        serde_json::Value::Null => Err(CliError::InvalidInput(
            "null is not a valid argument value".to_string(),
        )),
    }
}

fn number(n: &Number, hint: Option<&ValueType>) -> Result<Value> {
    if hint == Some(&ValueType::Float) {
        return n
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| CliError::InvalidInput(format!("{} is not a float", n)));
    }
    if let Some(i) = n.as_i64() {
        return Ok(Value::Int(i));
    }
    n.as_f64()
        .map(Value::Float)
        .ok_or_else(|| CliError::InvalidInput(format!("{} is out of range", n)))
}

/// Convert a runtime value to plain JSON.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::from(*i),
        Value::Float(x) => Number::from_f64(*x)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::List(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Record(record) => {
            let fields: Map<String, serde_json::Value> = record
                .fields
                .iter()
                .map(|(name, field)| (name.clone(), to_json(field)))
                .collect();
            serde_json::Value::Object(fields)
        }
    }
}
