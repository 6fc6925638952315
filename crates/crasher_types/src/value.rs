use crate::types::{ClassName, JavaType};
use std::fmt;

/// Runtime value produced by evaluating a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Result of a `void` operation.
    Void,
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Array {
        component: JavaType,
        elements: Vec<Value>,
    },
    /// Opaque handle to an object owned by the invoker.
    Object { class: ClassName, handle: u64 },
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Value::Array { elements, .. } => Some(elements),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("void"),
            Value::Null => f.write_str("null"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Byte(value) => write!(f, "{value}"),
            Value::Short(value) => write!(f, "{value}"),
            Value::Char(value) => write!(f, "{value:?}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Long(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value:?}"),
            Value::Double(value) => write!(f, "{value:?}"),
            Value::String(value) => write!(f, "{value:?}"),
            Value::Array { elements, .. } => {
                f.write_str("{")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("}")
            }
            Value::Object { class, handle } => write!(f, "{}@{handle:x}", class.binary_name()),
        }
    }
}
