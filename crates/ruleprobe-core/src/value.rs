//! Values produced and consumed by the interpreter.

use std::fmt;

use crate::{ObjectHandle, PrimitiveKind, Type};

/// A runtime value.
///
/// Primitive variants follow [`PrimitiveKind`] one to one. References are
/// either `Null` or a handle into the object graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Null,
    Object(ObjectHandle),
}

impl Value {
    /// Zero value stored in a freshly created field of type `ty`.
    pub fn default_for(ty: &Type) -> Value {
        match ty.as_primitive() {
            Some(PrimitiveKind::Boolean) => Value::Bool(false),
            Some(PrimitiveKind::Byte) => Value::Byte(0),
            Some(PrimitiveKind::Short) => Value::Short(0),
            Some(PrimitiveKind::Char) => Value::Char(0),
            Some(PrimitiveKind::Int) => Value::Int(0),
            Some(PrimitiveKind::Long) => Value::Long(0),
            Some(PrimitiveKind::Float) => Value::Float(0.0),
            Some(PrimitiveKind::Double) => Value::Double(0.0),
            None => Value::Null,
        }
    }

    /// The primitive kind of this value, or `None` for references.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        Some(match self {
            Value::Bool(_) => PrimitiveKind::Boolean,
            Value::Byte(_) => PrimitiveKind::Byte,
            Value::Short(_) => PrimitiveKind::Short,
            Value::Char(_) => PrimitiveKind::Char,
            Value::Int(_) => PrimitiveKind::Int,
            Value::Long(_) => PrimitiveKind::Long,
            Value::Float(_) => PrimitiveKind::Float,
            Value::Double(_) => PrimitiveKind::Double,
            Value::Null | Value::Object(_) => return None,
        })
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn as_object(&self) -> Option<ObjectHandle> {
        match self {
            Value::Object(handle) => Some(*handle),
            _ => None,
        }
    }

    /// Convert to primitive kind `to` by identity or widening.
    ///
    /// Returns `None` for references and for narrowing conversions.
    pub fn widen_to(self, to: PrimitiveKind) -> Option<Value> {
        let from = self.primitive_kind()?;
        if !to.widens_from(from) {
            return None;
        }
        if from == to {
            return Some(self);
        }
        // Every widening source is numeric, so it fits in i64 or f64.
        let (int, float) = match self {
            Value::Byte(v) => (v as i64, v as f64),
            Value::Short(v) => (v as i64, v as f64),
            Value::Char(v) => (v as i64, v as f64),
            Value::Int(v) => (v as i64, v as f64),
            Value::Long(v) => (v, v as f64),
            Value::Float(v) => (0, v as f64),
            _ => return None,
        };
        Some(match to {
            PrimitiveKind::Short => Value::Short(int as i16),
            PrimitiveKind::Int => Value::Int(int as i32),
            PrimitiveKind::Long => Value::Long(int),
            PrimitiveKind::Float => Value::Float(float as f32),
            PrimitiveKind::Double => Value::Double(float),
            PrimitiveKind::Boolean | PrimitiveKind::Byte | PrimitiveKind::Char => return None,
        })
    }

    /// Short label for diagnostics, e.g. `long` or `reference`.
    pub fn type_label(&self) -> &'static str {
        match self.primitive_kind() {
            Some(kind) => kind.name(),
            None if self.is_null() => "null",
            None => "reference",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Char(v) => match char::from_u32(*v as u32) {
                Some(c) => write!(f, "'{c}'"),
                None => write!(f, "'\\u{{{v:04x}}}'"),
            },
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}L"),
            Value::Float(v) => write!(f, "{v}f"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Null => f.write_str("null"),
            Value::Object(handle) => write!(f, "@{}", handle.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_type() {
        assert_eq!(Value::default_for(&Type::LONG), Value::Long(0));
        assert_eq!(Value::default_for(&Type::BOOLEAN), Value::Bool(false));
        assert_eq!(Value::default_for(&Type::Undefined), Value::Null);
    }

    #[test]
    fn widening_int_to_long() {
        assert_eq!(Value::Int(7).widen_to(PrimitiveKind::Long), Some(Value::Long(7)));
        assert_eq!(
            Value::Char(65).widen_to(PrimitiveKind::Double),
            Some(Value::Double(65.0))
        );
        assert_eq!(
            Value::Float(1.5).widen_to(PrimitiveKind::Double),
            Some(Value::Double(1.5))
        );
    }

    #[test]
    fn narrowing_is_rejected() {
        assert_eq!(Value::Long(7).widen_to(PrimitiveKind::Int), None);
        assert_eq!(Value::Bool(true).widen_to(PrimitiveKind::Int), None);
        assert_eq!(Value::Null.widen_to(PrimitiveKind::Int), None);
    }

    #[test]
    fn labels() {
        assert_eq!(Value::Long(1).type_label(), "long");
        assert_eq!(Value::Null.type_label(), "null");
    }
}
