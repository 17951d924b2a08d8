//! Dotted class names such as `com.acme.Config`.

use std::fmt;

/// A fully qualified class name in dotted form.
///
/// The package is everything before the last `.`, the simple name is what
/// follows it. A name without a `.` lives in the default package.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    qualified: String,
    /// Byte offset where the simple name starts.
    simple_start: usize,
}

impl TypeName {
    /// Create a type name from its dotted form.
    pub fn new(qualified: impl Into<String>) -> Self {
        let qualified = qualified.into();
        let simple_start = qualified.rfind('.').map_or(0, |dot| dot + 1);
        Self {
            qualified,
            simple_start,
        }
    }

    /// Create a type name from a package and a simple name.
    ///
    /// An empty package yields a name in the default package.
    pub fn from_parts(package: &str, simple: &str) -> Self {
        if package.is_empty() {
            Self::new(simple)
        } else {
            Self::new(format!("{package}.{simple}"))
        }
    }

    /// Create a type name by joining path segments with `.`.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        let joined = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(".");
        Self::new(joined)
    }

    /// The dotted name, e.g. `com.acme.Config`.
    #[inline]
    pub fn qualified(&self) -> &str {
        &self.qualified
    }

    /// The last segment, e.g. `Config`.
    #[inline]
    pub fn simple_name(&self) -> &str {
        &self.qualified[self.simple_start..]
    }

    /// The package, e.g. `com.acme`, or `None` for the default package.
    pub fn package(&self) -> Option<&str> {
        if self.simple_start == 0 {
            None
        } else {
            Some(&self.qualified[..self.simple_start - 1])
        }
    }

    /// The dot-separated segments of the name.
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.qualified.split('.')
    }

    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// Length of the dotted name in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.qualified.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.qualified.is_empty()
    }

    /// Slash-separated form used inside emitted descriptors, e.g. `com/acme/Config`.
    pub fn internal_name(&self) -> String {
        self.qualified.replace('.', "/")
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeName({})", self.qualified)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified)
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
