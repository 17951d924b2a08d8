use ruleprobe_core::{Span, Type};
use std::fmt;

use crate::bindings::Binding;

/// A reference to a rule binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    span: Span,
    /// Copied from the binding when bound.
    ty: Type,
    slot: Option<u32>,
}

impl Variable {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
            ty: Type::Undefined,
            slot: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Local slot of the binding, once bound.
    pub fn slot(&self) -> Option<u32> {
        self.slot
    }

    pub(crate) fn bind_to(&mut self, binding: &Binding) {
        self.ty = binding.ty.clone();
        self.slot = Some(binding.slot);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
