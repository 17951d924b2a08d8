//! Expression nodes that name values through dotted paths.
//!
//! A path such as `a.b.c` is parsed into a [`FieldExpr`] whose leading
//! segments are not yet interpreted. Binding and type checking decide whether
//! those segments start at a bound variable (an instance chain) or spell a
//! class name (a static field, possibly followed by instance fields). The
//! resolved tree uses three node kinds:
//!
//! - [`Variable`] - a rule binding
//! - [`FieldExpr`] - an instance field of an owner expression, or a
//!   disguised static field
//! - [`StaticFieldExpr`] - a static field of a named class

mod field;
mod static_field;
mod variable;

pub use field::{FieldExpr, FieldTarget, Resolution};
pub use static_field::StaticFieldExpr;
pub use variable::Variable;

use ruleprobe_core::{FieldDescriptor, ResolutionError, Span, Type};
use std::fmt;

/// A field and its value type, recorded once type checking succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub field: FieldDescriptor,
    pub ty: Type,
}

/// An expression that reads or writes a value through a name.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Variable(Variable),
    Field(FieldExpr),
    StaticField(StaticFieldExpr),
}

impl Expr {
    /// Build an expression from dotted source text.
    ///
    /// A single segment is a variable reference. Longer paths become a field
    /// expression whose leading segments are resolved later.
    pub fn parse_path(text: &str, span: Span) -> Result<Expr, ResolutionError> {
        let malformed = || ResolutionError::MalformedPath {
            text: text.to_string(),
            span,
        };

        let mut segments: Vec<String> = Vec::new();
        for segment in text.split('.') {
            if !is_identifier(segment) {
                return Err(malformed());
            }
            segments.push(segment.to_string());
        }

        let field_name = segments.pop().ok_or_else(malformed)?;
        if segments.is_empty() {
            return Ok(Expr::Variable(Variable::new(field_name, span)));
        }
        Ok(Expr::Field(FieldExpr::with_path(segments, field_name, span)))
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Variable(variable) => variable.span(),
            Expr::Field(field) => field.span(),
            Expr::StaticField(field) => field.span(),
        }
    }

    /// The type computed by type checking, or [`Type::Undefined`] before it.
    pub fn ty(&self) -> &Type {
        match self {
            Expr::Variable(variable) => variable.ty(),
            Expr::Field(field) => field.value_type(),
            Expr::StaticField(field) => field.value_type(),
        }
    }

    /// Whether this node and every node beneath it has been type checked.
    pub fn is_resolved(&self) -> bool {
        match self {
            Expr::Variable(variable) => variable.slot().is_some(),
            Expr::Field(field) => match field.resolution() {
                Some(Resolution::Instance { owner, .. }) => owner.is_resolved(),
                Some(Resolution::Static(target)) => target.resolved().is_some(),
                None => false,
            },
            Expr::StaticField(field) => field.resolved().is_some(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Variable(variable) => write!(f, "{variable}"),
            Expr::Field(field) => write!(f, "{field}"),
            Expr::StaticField(field) => write!(f, "{field}"),
        }
    }
}

impl From<Variable> for Expr {
    fn from(variable: Variable) -> Self {
        Expr::Variable(variable)
    }
}

impl From<FieldExpr> for Expr {
    fn from(field: FieldExpr) -> Self {
        Expr::Field(field)
    }
}

impl From<StaticFieldExpr> for Expr {
    fn from(field: StaticFieldExpr) -> Self {
        Expr::StaticField(field)
    }
}

/// Identifier rules for path segments: letters, digits, `_` and `$`, not
/// starting with a digit unless the segment is a `$`-prefixed parameter.
fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Span of the first `count` segments of a dotted path that starts at `span`.
pub(crate) fn prefix_span<S: AsRef<str>>(span: Span, segments: &[S], count: usize) -> Span {
    let len: usize = segments
        .iter()
        .take(count)
        .map(|segment| segment.as_ref().len())
        .sum::<usize>()
        + count.saturating_sub(1);
    span.slice(0, len as u32)
}

/// Wrap `root` in one field access for each of `path[from..]`.
///
/// `span` is the span of the whole dotted path, so every synthesized node
/// covers the text up to and including its own segment.
pub(crate) fn wrap_fields(mut root: Expr, path: &[String], from: usize, span: Span) -> Expr {
    for (index, segment) in path.iter().enumerate().skip(from) {
        let node_span = prefix_span(span, path, index + 1);
        root = Expr::Field(FieldExpr::with_owner(root, segment.clone(), node_span));
    }
    root
}
