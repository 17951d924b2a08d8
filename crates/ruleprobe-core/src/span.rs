//! Source positions inside rule text.

use std::fmt;

/// Location of an expression within a rule, as line, column and byte length.
///
/// Lines and columns are 1-indexed. Diagnostics print the start position only.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    #[inline]
    pub const fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// A zero-length span at a position.
    #[inline]
    pub const fn point(line: u32, col: u32) -> Self {
        Self { line, col, len: 0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Column one past the last byte of the span.
    #[inline]
    pub fn end_col(&self) -> u32 {
        self.col + self.len
    }

    /// The part of this span starting `offset` bytes in and `len` bytes long.
    ///
    /// Used to locate one segment of a dotted path. The result is clamped to
    /// the end of `self`.
    pub fn slice(self, offset: u32, len: u32) -> Span {
        let offset = offset.min(self.len);
        Span {
            line: self.line,
            col: self.col + offset,
            len: len.min(self.len - offset),
        }
    }

    /// Smallest span covering both `self` and `other`.
    ///
    /// Spans on different lines keep the position of whichever starts first.
    pub fn cover(self, other: Span) -> Span {
        if self.line != other.line {
            return if (other.line, other.col) < (self.line, self.col) {
                other
            } else {
                self
            };
        }
        let col = self.col.min(other.col);
        let end = self.end_col().max(other.end_col());
        Span::new(self.line, col, end - col)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}+{}", self.line, self.col, self.len)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_line_and_column() {
        assert_eq!(Span::new(3, 14, 5).to_string(), "3:14");
    }

    #[test]
    fn slice_locates_segment() {
        // "com.acme.Config" starting at column 10
        let whole = Span::new(2, 10, 15);
        let segment = whole.slice(4, 4);
        assert_eq!(segment, Span::new(2, 14, 4));
    }

    #[test]
    fn slice_clamps_to_end() {
        let whole = Span::new(1, 1, 5);
        assert_eq!(whole.slice(3, 10), Span::new(1, 4, 2));
        assert_eq!(whole.slice(9, 1), Span::new(1, 6, 0));
    }

    #[test]
    fn cover_same_line() {
        let a = Span::new(1, 5, 3);
        let b = Span::new(1, 10, 4);
        assert_eq!(a.cover(b), Span::new(1, 5, 9));
        assert_eq!(b.cover(a), Span::new(1, 5, 9));
    }

    #[test]
    fn cover_different_lines_keeps_earliest() {
        let a = Span::new(4, 2, 3);
        let b = Span::new(2, 8, 1);
        assert_eq!(a.cover(b), b);
    }

    #[test]
    fn point_is_empty() {
        assert!(Span::point(1, 1).is_empty());
        assert!(!Span::new(1, 1, 1).is_empty());
    }
}
