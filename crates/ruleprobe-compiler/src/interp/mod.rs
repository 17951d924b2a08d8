//! Tree-walking evaluation of resolved expressions.
//!
//! The [`Interpreter`] reads the resolved view of each node and never
//! mutates the expression; all state lives in the [`ExecutionContext`].

mod frame;

pub use frame::Frame;

use ruleprobe_core::{
    AccessError, ExecuteError, FieldDescriptor, ObjectGraph, ObjectHandle, Span, Value,
};

use crate::expr::{Expr, FieldExpr, Resolution, StaticFieldExpr, Variable};

type Result<T> = std::result::Result<T, ExecuteError>;

/// Values and objects visible while a rule fires.
pub trait ExecutionContext {
    /// Current value of a binding.
    fn binding(&self, name: &str) -> Option<Value>;

    /// Update a binding. Returns `false` if `name` is not bound.
    fn set_binding(&mut self, name: &str, value: Value) -> bool;

    fn objects(&self) -> &dyn ObjectGraph;

    fn objects_mut(&mut self) -> &mut dyn ObjectGraph;
}

/// Evaluates expressions against an execution context.
pub struct Interpreter<'c> {
    ctx: &'c mut dyn ExecutionContext,
}

impl<'c> Interpreter<'c> {
    pub fn new(ctx: &'c mut dyn ExecutionContext) -> Self {
        Self { ctx }
    }

    /// Evaluate `expr` to a value.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn interpret(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Variable(variable) => self.read_variable(variable),
            Expr::Field(field) => self.read_field(field),
            Expr::StaticField(field) => self.read_static(field),
        }
    }

    /// Store `value` through `expr` and return it.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn interpret_assign(&mut self, expr: &Expr, value: Value) -> Result<Value> {
        match expr {
            Expr::Variable(variable) => self.write_variable(variable, value),
            Expr::Field(field) => self.write_field(field, value),
            Expr::StaticField(field) => self.write_static(field, value),
        }
    }

    fn read_variable(&mut self, variable: &Variable) -> Result<Value> {
        self.ctx
            .binding(variable.name())
            .ok_or_else(|| ExecuteError::UnboundVariable {
                name: variable.name().to_string(),
                span: variable.span(),
            })
    }

    fn write_variable(&mut self, variable: &Variable, value: Value) -> Result<Value> {
        if !self.ctx.set_binding(variable.name(), value) {
            return Err(ExecuteError::UnboundVariable {
                name: variable.name().to_string(),
                span: variable.span(),
            });
        }
        Ok(value)
    }

    fn read_field(&mut self, field: &FieldExpr) -> Result<Value> {
        match field.resolution() {
            Some(Resolution::Static(target)) => self.read_static(target),
            Some(Resolution::Instance {
                owner,
                field: descriptor,
                ..
            }) => {
                let handle = self.owner_handle(field, owner, descriptor)?;
                self.ctx
                    .objects()
                    .get_field(handle, descriptor)
                    .map_err(|err| read_error(descriptor, field.span(), err))
            }
            None => Err(ExecuteError::Unresolved {
                text: field.to_string(),
                span: field.span(),
            }),
        }
    }

    fn write_field(&mut self, field: &FieldExpr, value: Value) -> Result<Value> {
        match field.resolution() {
            Some(Resolution::Static(target)) => self.write_static(target, value),
            Some(Resolution::Instance {
                owner,
                field: descriptor,
                ..
            }) => {
                let handle = self.owner_handle(field, owner, descriptor)?;
                self.ctx
                    .objects_mut()
                    .set_field(handle, descriptor, value)
                    .map_err(|err| write_error(descriptor, field.span(), err))?;
                Ok(value)
            }
            None => Err(ExecuteError::Unresolved {
                text: field.to_string(),
                span: field.span(),
            }),
        }
    }

    /// Evaluate the owner of `field` to an object handle.
    fn owner_handle(
        &mut self,
        field: &FieldExpr,
        owner: &Expr,
        descriptor: &FieldDescriptor,
    ) -> Result<ObjectHandle> {
        match self.interpret(owner)? {
            Value::Object(handle) => Ok(handle),
            Value::Null => Err(ExecuteError::NullIndirection {
                text: field.to_string(),
                span: field.span(),
            }),
            other => Err(ExecuteError::Unexpected {
                field: descriptor.to_string(),
                message: format!("owner evaluated to a {} value", other.type_label()),
                span: field.span(),
                source: None,
            }),
        }
    }

    fn read_static(&mut self, target: &StaticFieldExpr) -> Result<Value> {
        let descriptor = static_descriptor(target)?;
        self.ctx
            .objects()
            .get_static(descriptor)
            .map_err(|err| read_error(descriptor, target.span(), err))
    }

    fn write_static(&mut self, target: &StaticFieldExpr, value: Value) -> Result<Value> {
        let descriptor = static_descriptor(target)?;
        self.ctx
            .objects_mut()
            .set_static(descriptor, value)
            .map_err(|err| write_error(descriptor, target.span(), err))?;
        Ok(value)
    }
}

fn static_descriptor(target: &StaticFieldExpr) -> Result<&FieldDescriptor> {
    target
        .resolved()
        .map(|resolved| &resolved.field)
        .ok_or_else(|| ExecuteError::Unresolved {
            text: target.to_string(),
            span: target.span(),
        })
}

fn read_error(field: &FieldDescriptor, span: Span, err: AccessError) -> ExecuteError {
    match err {
        AccessError::Denied { .. } => ExecuteError::AccessDenied {
            field: field.to_string(),
            span,
            source: err,
        },
        other => unexpected(field, span, other),
    }
}

fn write_error(field: &FieldDescriptor, span: Span, err: AccessError) -> ExecuteError {
    match err {
        AccessError::Denied { .. } => ExecuteError::AccessDenied {
            field: field.to_string(),
            span,
            source: err,
        },
        AccessError::InvalidArgument { .. } => ExecuteError::InvalidValue {
            field: field.to_string(),
            span,
            source: err,
        },
        other => unexpected(field, span, other),
    }
}

fn unexpected(field: &FieldDescriptor, span: Span, err: AccessError) -> ExecuteError {
    ExecuteError::Unexpected {
        field: field.to_string(),
        message: err.to_string(),
        span,
        source: Some(err),
    }
}
