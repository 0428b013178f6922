//! Closure-style rendering of trees and values
//!
//! Rendering is for humans (logs, CLI output). It names parameters by their
//! display names, so two distinct parameters called `p` render the same.

use crate::{Expr, Lambda, Parameter, Value};
use std::fmt;

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing `.0` on whole floats
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                f.write_str("[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
            Value::Record(record) => {
                write!(f, "{} {{", record.type_name)?;
                for (idx, (name, value)) in record.fields.iter().enumerate() {
                    let sep = if idx == 0 { " " } else { ", " };
                    write!(f, "{}{}: {}", sep, name, value)?;
                }
                if !record.fields.is_empty() {
                    f.write_str(" ")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Parameter(p) => write!(f, "{}", p),
            Expr::Constant { value, .. } => write!(f, "{}", value),
            Expr::Member { receiver, member } => match receiver {
                Some(receiver) => write!(f, "{}.{}", receiver, member.name),
                None => write!(f, "{}::{}", member.owner, member.name),
            },
            Expr::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            Expr::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Call {
                receiver,
                method,
                args,
            } => {
                if let Some(receiver) = receiver {
                    write!(f, "{}.", receiver)?;
                }
                write!(f, "{}(", method.name)?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Expr::Lambda(lambda) => write!(f, "{}", lambda),
        }
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|")?;
        for (idx, param) in self.params().iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", param.name, param.ty)?;
        }
        write!(f, "| {}", self.body())
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
