//! Primitive value kinds of the instrumented runtime.

use std::fmt;

/// Primitive type kinds.
///
/// These mirror the primitive types of the host virtual machine, so their
/// storage sizes and widening rules follow it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Char,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// Get the source-level name of this primitive type.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// Look up a primitive kind by its source-level name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Storage size in bytes.
    pub const fn n_bytes(self) -> u32 {
        match self {
            PrimitiveKind::Boolean | PrimitiveKind::Byte => 1,
            PrimitiveKind::Short | PrimitiveKind::Char => 2,
            PrimitiveKind::Int | PrimitiveKind::Float => 4,
            PrimitiveKind::Long | PrimitiveKind::Double => 8,
        }
    }

    /// Single-character field descriptor, e.g. `I` for `int`.
    pub const fn descriptor(self) -> char {
        match self {
            PrimitiveKind::Boolean => 'Z',
            PrimitiveKind::Byte => 'B',
            PrimitiveKind::Short => 'S',
            PrimitiveKind::Char => 'C',
            PrimitiveKind::Int => 'I',
            PrimitiveKind::Long => 'J',
            PrimitiveKind::Float => 'F',
            PrimitiveKind::Double => 'D',
        }
    }

    pub const fn is_numeric(self) -> bool {
        !matches!(self, PrimitiveKind::Boolean)
    }

    /// Whether a value of kind `from` may be stored where `self` is expected
    /// without an explicit cast (identity or widening conversion).
    pub fn widens_from(self, from: PrimitiveKind) -> bool {
        use PrimitiveKind::*;
        if self == from {
            return true;
        }
        match from {
            Byte => matches!(self, Short | Int | Long | Float | Double),
            Short | Char => matches!(self, Int | Long | Float | Double),
            Int => matches!(self, Long | Float | Double),
            Long => matches!(self, Float | Double),
            Float => matches!(self, Double),
            Boolean | Double => false,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_name("int64"), None);
    }

    #[test]
    fn sizes() {
        assert_eq!(PrimitiveKind::Boolean.n_bytes(), 1);
        assert_eq!(PrimitiveKind::Char.n_bytes(), 2);
        assert_eq!(PrimitiveKind::Int.n_bytes(), 4);
        assert_eq!(PrimitiveKind::Long.n_bytes(), 8);
        assert_eq!(PrimitiveKind::Double.n_bytes(), 8);
    }

    #[test]
    fn widening() {
        use PrimitiveKind::*;
        assert!(Long.widens_from(Int));
        assert!(Double.widens_from(Byte));
        assert!(Int.widens_from(Char));
        assert!(!Int.widens_from(Long));
        assert!(!Char.widens_from(Short));
        assert!(!Boolean.widens_from(Int));
        assert!(!Int.widens_from(Boolean));
    }
}
