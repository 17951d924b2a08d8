use ruleprobe_core::{Span, Type, TypeName};
use std::fmt;

use super::ResolvedField;

/// A static field named by its class, e.g. `com.acme.Config.VERSION`.
///
/// Type checking synthesizes these when the leading segments of a path turn
/// out to spell a class name.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticFieldExpr {
    owner_type: TypeName,
    field_name: String,
    span: Span,
    resolved: Option<ResolvedField>,
}

impl StaticFieldExpr {
    pub fn new(owner_type: TypeName, field_name: impl Into<String>, span: Span) -> Self {
        Self {
            owner_type,
            field_name: field_name.into(),
            span,
            resolved: None,
        }
    }

    pub fn owner_type(&self) -> &TypeName {
        &self.owner_type
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn resolved(&self) -> Option<&ResolvedField> {
        self.resolved.as_ref()
    }

    pub fn value_type(&self) -> &Type {
        self.resolved
            .as_ref()
            .map_or(&Type::Undefined, |resolved| &resolved.ty)
    }

    pub(crate) fn set_resolved(&mut self, resolved: ResolvedField) {
        self.resolved = Some(resolved);
    }
}

impl fmt::Display for StaticFieldExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner_type, self.field_name)
    }
}
