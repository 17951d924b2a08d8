//! Deterministic identity for classes in the type universe.
//!
//! A [`TypeHash`] is computed from the qualified class name with XXHash64, so
//! the same name always yields the same hash regardless of registration order.

use std::fmt;
use xxhash_rust::xxh64::xxh64;

use crate::TypeName;

/// Domain marker mixed into class hashes.
const TYPE_DOMAIN: u64 = 0x2fac10b63a6cc57c;

/// A 64-bit hash identifying a class by its qualified name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Placeholder for "no type".
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Hash a dotted class name.
    #[inline]
    pub fn from_name(qualified: &str) -> Self {
        TypeHash(xxh64(qualified.as_bytes(), TYPE_DOMAIN))
    }

    #[inline]
    pub fn of(name: &TypeName) -> Self {
        Self::from_name(name.qualified())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
