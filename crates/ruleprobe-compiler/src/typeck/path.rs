//! How many leading path segments a matched type name accounts for.

use ruleprobe_core::TypeName;

/// Number of leading `path` segments spelled by `type_name`.
///
/// When the name starts with the first segment, the path is taken to be a
/// qualified reference. Segments are accumulated (with their `.` separators)
/// until the next one would run past the end of the name. The accumulated
/// prefix must then equal the name exactly.
///
/// Otherwise the universe expanded an unqualified reference, and the leading
/// segments must spell a trailing part of the canonical name: `Thread`
/// consumes one segment of `java.lang.Thread`, `Outer.Inner` two of
/// `com.acme.Outer.Inner`.
///
/// Returns `None` when neither reading fits.
pub(crate) fn consumed_segments(path: &[String], type_name: &TypeName) -> Option<usize> {
    let first = path.first()?;

    if type_name.segments().next() == Some(first.as_str()) {
        let count = qualified_prefix_len(path, type_name.len());
        if count > 0 && TypeName::from_segments(&path[..count]) == *type_name {
            return Some(count);
        }
    }

    expanded_suffix_len(path, type_name)
}

fn qualified_prefix_len(path: &[String], name_len: usize) -> usize {
    let mut consumed = 0;
    let mut length = 0;
    for segment in path {
        let next = if consumed == 0 {
            segment.len()
        } else {
            length + 1 + segment.len()
        };
        if next > name_len {
            break;
        }
        length = next;
        consumed += 1;
    }
    consumed
}

fn expanded_suffix_len(path: &[String], type_name: &TypeName) -> Option<usize> {
    let name: Vec<&str> = type_name.segments().collect();
    let longest = path.len().min(name.len());
    (1..=longest).rev().find(|&count| {
        name[name.len() - count..]
            .iter()
            .zip(&path[..count])
            .all(|(expected, written)| *expected == written)
    })
}
