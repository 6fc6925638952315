use crate::error::PlanError;
use crate::expr::Expression;
use crate::array::ArrayCreateAndInit;
use crate::space::PlanFilter;
use crasher_types::{JavaType, NameContext, PrimitiveKind, Value};
use std::fmt::Write as FmtWrite;

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
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
}

/// A constant leaf of a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: LiteralValue,
    ty: JavaType,
}

impl Literal {
    pub fn boolean(value: bool) -> Self {
        Self::primitive(LiteralValue::Boolean(value), PrimitiveKind::Boolean)
    }

    pub fn byte(value: i8) -> Self {
        Self::primitive(LiteralValue::Byte(value), PrimitiveKind::Byte)
    }

    pub fn short(value: i16) -> Self {
        Self::primitive(LiteralValue::Short(value), PrimitiveKind::Short)
    }

    pub fn char(value: char) -> Self {
        Self::primitive(LiteralValue::Char(value), PrimitiveKind::Char)
    }

    pub fn int(value: i32) -> Self {
        Self::primitive(LiteralValue::Int(value), PrimitiveKind::Int)
    }

    pub fn long(value: i64) -> Self {
        Self::primitive(LiteralValue::Long(value), PrimitiveKind::Long)
    }

    pub fn float(value: f32) -> Self {
        Self::primitive(LiteralValue::Float(value), PrimitiveKind::Float)
    }

    pub fn double(value: f64) -> Self {
        Self::primitive(LiteralValue::Double(value), PrimitiveKind::Double)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: LiteralValue::String(value.into()),
            ty: JavaType::string(),
        }
    }

    /// `null` of declared type `ty`, which must be a reference type.
    pub fn null(ty: JavaType) -> Result<Self, PlanError> {
        if !ty.is_reference() {
            return Err(PlanError::invalid(format!("null literal of non-reference type {ty}")));
        }
        Ok(Self {
            value: LiteralValue::Null,
            ty,
        })
    }

    fn primitive(value: LiteralValue, kind: PrimitiveKind) -> Self {
        Self {
            value,
            ty: JavaType::Primitive(kind),
        }
    }

    pub fn value(&self) -> &LiteralValue {
        &self.value
    }

    pub fn return_type(&self) -> &JavaType {
        &self.ty
    }

    pub fn is_null(&self) -> bool {
        self.value == LiteralValue::Null
    }

    /// Rendered text starts with a cast, so it needs parentheses when used as
    /// a call receiver.
    pub fn needs_cast(&self) -> bool {
        matches!(
            self.value,
            LiteralValue::Null | LiteralValue::Byte(_) | LiteralValue::Short(_)
        )
    }

    pub fn evaluate(&self) -> Value {
        match &self.value {
            LiteralValue::Null => Value::Null,
            LiteralValue::Boolean(value) => Value::Boolean(*value),
            LiteralValue::Byte(value) => Value::Byte(*value),
            LiteralValue::Short(value) => Value::Short(*value),
            LiteralValue::Char(value) => Value::Char(*value),
            LiteralValue::Int(value) => Value::Int(*value),
            LiteralValue::Long(value) => Value::Long(*value),
            LiteralValue::Float(value) => Value::Float(*value),
            LiteralValue::Double(value) => Value::Double(*value),
            LiteralValue::String(value) => Value::String(value.clone()),
        }
    }

    pub fn text(&self, context: &NameContext) -> String {
        match &self.value {
            LiteralValue::Null => format!("({})null", self.ty.source_name(context)),
            LiteralValue::Boolean(value) => value.to_string(),
            LiteralValue::Byte(value) => format!("(byte){value}"),
            LiteralValue::Short(value) => format!("(short){value}"),
            LiteralValue::Char(value) => format!("'{}'", escape_char(*value)),
            LiteralValue::Int(value) => value.to_string(),
            LiteralValue::Long(value) => format!("{value}L"),
            LiteralValue::Float(value) => {
                float_text(format!("{value:?}"), f64::from(*value), "Float", "f")
            }
            LiteralValue::Double(value) => float_text(format!("{value:?}"), *value, "Double", "d"),
            LiteralValue::String(value) => format!("\"{}\"", escape_string(value)),
        }
    }
}

fn float_text(digits: String, value: f64, wrapper: &str, suffix: &str) -> String {
    if value.is_nan() {
        format!("{wrapper}.NaN")
    } else if value.is_infinite() && value > 0.0 {
        format!("{wrapper}.POSITIVE_INFINITY")
    } else if value.is_infinite() {
        format!("{wrapper}.NEGATIVE_INFINITY")
    } else {
        format!("{digits}{suffix}")
    }
}

/// Escape special characters in Java string literals.
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\'' => escaped.push('\''),
            other => escaped.push_str(&escape_char(other)),
        }
    }
    escaped
}

fn escape_char(value: char) -> String {
    match value {
        '\\' => "\\\\".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\'' => "\\'".to_string(),
        ch if ch.is_control() => {
            let mut text = String::new();
            let _ = write!(text, "\\u{:04x}", ch as u32);
            text
        }
        ch => ch.to_string(),
    }
}

/// Representative values of `ty`: zero first, then boundaries, then `null`
/// for reference types unless `filter` excludes it.
pub fn preset_values(ty: &JavaType, filter: PlanFilter) -> Vec<Expression> {
    let mut values: Vec<Expression> = match ty {
        JavaType::Void => Vec::new(),
        JavaType::Primitive(kind) => primitive_presets(*kind)
            .into_iter()
            .map(Expression::Literal)
            .collect(),
        JavaType::Class(_) if ty.is_string() => vec![
            Expression::Literal(Literal::string("")),
            Expression::Literal(Literal::string("hallo")),
        ],
        JavaType::Class(_) => Vec::new(),
        JavaType::Array { .. } => ArrayCreateAndInit::new(ty.clone())
            .map(|empty| vec![Expression::Array(empty)])
            .unwrap_or_default(),
    };

    if ty.is_reference() && filter.admits_null() {
        if let Ok(null) = Literal::null(ty.clone()) {
            values.push(Expression::Literal(null));
        }
    }
    values
}

fn primitive_presets(kind: PrimitiveKind) -> Vec<Literal> {
    match kind {
        PrimitiveKind::Boolean => vec![Literal::boolean(true), Literal::boolean(false)],
        PrimitiveKind::Byte => vec![Literal::byte(0), Literal::byte(1), Literal::byte(-1)],
        PrimitiveKind::Short => vec![Literal::short(0), Literal::short(1), Literal::short(-1)],
        PrimitiveKind::Char => vec![Literal::char(' '), Literal::char('a'), Literal::char('\0')],
        PrimitiveKind::Int => vec![Literal::int(0), Literal::int(1), Literal::int(-1)],
        PrimitiveKind::Long => vec![Literal::long(0), Literal::long(1), Literal::long(-1)],
        PrimitiveKind::Float => vec![
            Literal::float(0.0),
            Literal::float(1.0),
            Literal::float(-1.0),
        ],
        PrimitiveKind::Double => vec![
            Literal::double(0.0),
            Literal::double(1.0),
            Literal::double(-1.0),
        ],
    }
}
