//! The type model used by resolution.
//!
//! [`Type`] is what the type checker reasons about. Object types carry their
//! full ancestor list so assignability never needs to consult the universe.

mod primitive_kind;

pub use primitive_kind::PrimitiveKind;

use std::fmt;
use std::sync::Arc;

use crate::{TypeHash, TypeName};

/// A class known to the type universe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectType {
    pub name: TypeName,
    pub hash: TypeHash,
    /// Every superclass and implemented interface, nearest first.
    pub ancestors: Arc<[TypeName]>,
}

impl ObjectType {
    pub fn new(name: TypeName, ancestors: Vec<TypeName>) -> Self {
        let hash = TypeHash::of(&name);
        Self {
            name,
            hash,
            ancestors: ancestors.into(),
        }
    }

    /// A class with no known ancestors.
    pub fn root(name: impl Into<TypeName>) -> Self {
        Self::new(name.into(), Vec::new())
    }

    /// Whether a reference to `other` can be stored where `self` is expected.
    pub fn is_assignable_from(&self, other: &ObjectType) -> bool {
        self.hash == other.hash || other.ancestors.contains(&self.name)
    }
}

/// A resolved (or deliberately unresolved) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Nothing is known or expected.
    Undefined,
    Void,
    Primitive(PrimitiveKind),
    Object(ObjectType),
    /// A named alias for another type.
    Alias { name: Arc<str>, target: Box<Type> },
}

impl Type {
    pub const BOOLEAN: Type = Type::Primitive(PrimitiveKind::Boolean);
    pub const INT: Type = Type::Primitive(PrimitiveKind::Int);
    pub const LONG: Type = Type::Primitive(PrimitiveKind::Long);
    pub const DOUBLE: Type = Type::Primitive(PrimitiveKind::Double);

    pub fn alias(name: &str, target: Type) -> Self {
        Type::Alias {
            name: name.into(),
            target: Box::new(target),
        }
    }

    /// Strip alias layers.
    pub fn dereference(&self) -> &Type {
        let mut ty = self;
        while let Type::Alias { target, .. } = ty {
            ty = target;
        }
        ty
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self.dereference(), Type::Undefined)
    }

    #[inline]
    pub fn is_defined(&self) -> bool {
        !self.is_undefined()
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self.dereference() {
            Type::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self.dereference() {
            Type::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Whether a value of type `other` may be stored where `self` is expected.
    ///
    /// Primitives accept identity and widening conversions. Objects accept the
    /// same class or any subclass. An undefined type is never assignable.
    pub fn is_assignable_from(&self, other: &Type) -> bool {
        match (self.dereference(), other.dereference()) {
            (Type::Primitive(to), Type::Primitive(from)) => to.widens_from(*from),
            (Type::Object(to), Type::Object(from)) => to.is_assignable_from(from),
            (Type::Void, Type::Void) => true,
            _ => false,
        }
    }

    /// Storage size in bytes. References occupy one slot of four bytes.
    pub fn n_bytes(&self) -> u32 {
        match self.dereference() {
            Type::Undefined | Type::Void => 0,
            Type::Primitive(kind) => kind.n_bytes(),
            Type::Object(_) => 4,
            Type::Alias { target, .. } => target.n_bytes(),
        }
    }

    /// Operand-stack slots a value of this type occupies.
    #[inline]
    pub fn width(&self) -> u32 {
        if self.n_bytes() > 4 { 2 } else { 1 }
    }

    /// Value-type descriptor for emitted field instructions.
    ///
    /// `None` for an undefined type.
    pub fn descriptor(&self) -> Option<String> {
        match self.dereference() {
            Type::Undefined => None,
            Type::Void => Some("V".to_string()),
            Type::Primitive(kind) => Some(kind.descriptor().to_string()),
            Type::Object(object) => Some(format!("L{};", object.name.internal_name())),
            Type::Alias { target, .. } => target.descriptor(),
        }
    }

    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Undefined => f.write_str("<undefined>"),
            Type::Void => f.write_str("void"),
            Type::Primitive(kind) => write!(f, "{kind}"),
            Type::Object(object) => write!(f, "{}", object.name),
            Type::Alias { name, .. } => f.write_str(name),
        }
    }
}

impl From<PrimitiveKind> for Type {
    fn from(kind: PrimitiveKind) -> Self {
        Type::Primitive(kind)
    }
}

impl From<ObjectType> for Type {
    fn from(object: ObjectType) -> Self {
        Type::Object(object)
    }
}
