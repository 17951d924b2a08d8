//! The type universe seen by the resolver.

use crate::{FieldDescriptor, ObjectType, Type, TypeDescriptor};

/// Read-only view of the classes loaded in the instrumented runtime.
///
/// Resolution only ever queries the universe. Implementations decide how
/// unqualified names are expanded (default packages, imports).
pub trait TypeUniverse {
    /// Find the longest leading run of `segments` that names a known type.
    ///
    /// `segments` are the path components before the field name. The returned
    /// type's name may be longer than the run when an unqualified reference
    /// was expanded to its canonical name.
    fn match_path(&self, segments: &[String]) -> Option<Type>;

    /// Map a field's declared value class into the universe.
    ///
    /// Classes the universe does not know map to [`Type::Undefined`].
    fn ensure_type(&self, descriptor: &TypeDescriptor) -> Type;

    /// Find the field `name` declared by `owner` or one of its ancestors.
    fn lookup_field(&self, owner: &ObjectType, name: &str) -> Option<FieldDescriptor>;
}
