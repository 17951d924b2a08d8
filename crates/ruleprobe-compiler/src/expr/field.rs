use ruleprobe_core::{FieldDescriptor, Span, Type};
use std::fmt;

use super::{Expr, ResolvedField, StaticFieldExpr, prefix_span};

/// What the leading part of a field expression refers to.
///
/// Starts as [`FieldTarget::Path`] and only moves forward: binding may turn a
/// path into an owner, and type checking turns any remaining path into an
/// owner chain or a static indirection.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldTarget {
    /// Segments before the field name, not yet interpreted.
    Path(Vec<String>),
    /// The field belongs to the value of this expression.
    Owner(Box<Expr>),
    /// The whole expression names a static field.
    Static(Box<StaticFieldExpr>),
}

/// Borrowed view of a type-checked field expression.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// Read or write `field` on the value of `owner`.
    Instance {
        owner: &'a Expr,
        field: &'a FieldDescriptor,
        ty: &'a Type,
    },
    /// Delegate to a static field.
    Static(&'a StaticFieldExpr),
}

/// An expression of the form `<something>.field`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExpr {
    field_name: String,
    span: Span,
    target: FieldTarget,
    resolved: Option<ResolvedField>,
}

impl FieldExpr {
    /// A field whose leading segments are unresolved.
    pub fn with_path(path: Vec<String>, field_name: impl Into<String>, span: Span) -> Self {
        Self {
            field_name: field_name.into(),
            span,
            target: FieldTarget::Path(path),
            resolved: None,
        }
    }

    /// A field of an already-structured owner expression.
    pub fn with_owner(owner: Expr, field_name: impl Into<String>, span: Span) -> Self {
        Self {
            field_name: field_name.into(),
            span,
            target: FieldTarget::Owner(Box::new(owner)),
            resolved: None,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn target(&self) -> &FieldTarget {
        &self.target
    }

    /// Unresolved leading segments, if the path has not been restructured.
    pub fn path(&self) -> Option<&[String]> {
        match &self.target {
            FieldTarget::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn owner(&self) -> Option<&Expr> {
        match &self.target {
            FieldTarget::Owner(owner) => Some(owner),
            _ => None,
        }
    }

    /// The static field this expression turned out to name, if any.
    pub fn static_target(&self) -> Option<&StaticFieldExpr> {
        match &self.target {
            FieldTarget::Static(target) => Some(target),
            _ => None,
        }
    }

    /// The first `len` path segments joined with `.`.
    ///
    /// Empty once the path has been restructured.
    pub fn path_text(&self, len: usize) -> String {
        self.path()
            .map(|path| path[..len.min(path.len())].join("."))
            .unwrap_or_default()
    }

    pub fn resolved(&self) -> Option<&ResolvedField> {
        self.resolved.as_ref()
    }

    pub fn value_type(&self) -> &Type {
        self.resolved
            .as_ref()
            .map_or(&Type::Undefined, |resolved| &resolved.ty)
    }

    /// The resolved view consumed by the interpreter and code generator.
    ///
    /// `None` until type checking has succeeded.
    pub fn resolution(&self) -> Option<Resolution<'_>> {
        let resolved = self.resolved.as_ref()?;
        match &self.target {
            FieldTarget::Owner(owner) => Some(Resolution::Instance {
                owner,
                field: &resolved.field,
                ty: &resolved.ty,
            }),
            FieldTarget::Static(target) => Some(Resolution::Static(target)),
            FieldTarget::Path(_) => None,
        }
    }

    /// Span of the first `count` unresolved segments.
    pub(crate) fn segments_span(&self, count: usize) -> Span {
        match &self.target {
            FieldTarget::Path(path) => prefix_span(self.span, path, count),
            _ => self.span,
        }
    }

    pub(crate) fn target_mut(&mut self) -> &mut FieldTarget {
        &mut self.target
    }

    /// Replace the path with a structured target.
    pub(crate) fn restructure(&mut self, target: FieldTarget) {
        debug_assert!(matches!(self.target, FieldTarget::Path(_)));
        self.target = target;
    }

    pub(crate) fn set_resolved(&mut self, resolved: ResolvedField) {
        self.resolved = Some(resolved);
    }
}

impl fmt::Display for FieldExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            FieldTarget::Path(path) => {
                for segment in path {
                    write!(f, "{segment}.")?;
                }
                f.write_str(&self.field_name)
            }
            FieldTarget::Owner(owner) => write!(f, "{owner}.{}", self.field_name),
            FieldTarget::Static(target) => write!(f, "{target}"),
        }
    }
}
