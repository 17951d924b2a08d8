//! Field descriptors produced by reflective lookup.

use bitflags::bitflags;
use std::fmt;

use crate::{PrimitiveKind, TypeName};

bitflags! {
    /// Modifiers on a declared field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u8 {
        const PUBLIC = 1 << 0;
        const STATIC = 1 << 1;
        const FINAL = 1 << 2;
        const VOLATILE = 1 << 3;
    }
}

/// The declared class of a field's value, before it is mapped into the
/// type universe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Void,
    Primitive(PrimitiveKind),
    Class(TypeName),
}

impl TypeDescriptor {
    pub const INT: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Int);
    pub const LONG: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Long);
    pub const DOUBLE: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Double);
    pub const BOOLEAN: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Boolean);

    pub fn class(name: impl Into<TypeName>) -> Self {
        TypeDescriptor::Class(name.into())
    }

    /// Descriptor string for emitted field references, e.g. `J` or
    /// `Lcom/acme/Config;`.
    pub fn descriptor(&self) -> String {
        match self {
            TypeDescriptor::Void => "V".to_string(),
            TypeDescriptor::Primitive(kind) => kind.descriptor().to_string(),
            TypeDescriptor::Class(name) => format!("L{};", name.internal_name()),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Void => f.write_str("void"),
            TypeDescriptor::Primitive(kind) => write!(f, "{kind}"),
            TypeDescriptor::Class(name) => write!(f, "{name}"),
        }
    }
}

/// A field found on a class by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// The class that declares the field (may be a superclass of the owner).
    pub declaring_type: TypeName,
    pub name: String,
    pub value_class: TypeDescriptor,
    pub flags: FieldFlags,
}

impl FieldDescriptor {
    /// A public instance field.
    pub fn instance(
        declaring_type: impl Into<TypeName>,
        name: impl Into<String>,
        value_class: TypeDescriptor,
    ) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            value_class,
            flags: FieldFlags::PUBLIC,
        }
    }

    /// A public static field.
    pub fn static_field(
        declaring_type: impl Into<TypeName>,
        name: impl Into<String>,
        value_class: TypeDescriptor,
    ) -> Self {
        Self {
            flags: FieldFlags::PUBLIC | FieldFlags::STATIC,
            ..Self::instance(declaring_type, name, value_class)
        }
    }

    pub fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(FieldFlags::STATIC)
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.flags.contains(FieldFlags::FINAL)
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)
    }
}
