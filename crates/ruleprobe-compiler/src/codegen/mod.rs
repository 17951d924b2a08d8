//! Bytecode generation for resolved expressions.
//!
//! Reads leave the value on the operand stack. Assignments expect the new
//! value already on top and leave it there after the store, so the result
//! of an assignment can feed an enclosing expression.

use log::trace;
use ruleprobe_core::CodegenError;

use crate::emit::BytecodeEmitter;
use crate::expr::{Expr, FieldExpr, Resolution, StaticFieldExpr, Variable};

type Result<T> = std::result::Result<T, CodegenError>;

/// Compiles expressions through a borrowed emitter.
pub struct ExprCodegen<'e, 'pool> {
    emitter: &'e mut BytecodeEmitter<'pool>,
}

impl<'e, 'pool> ExprCodegen<'e, 'pool> {
    pub fn new(emitter: &'e mut BytecodeEmitter<'pool>) -> Self {
        Self { emitter }
    }

    /// Emit code pushing the value of `expr`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile(&mut self, expr: &Expr) -> Result<()> {
        self.emitter.set_line(expr.span().line);
        match expr {
            Expr::Variable(variable) => self.compile_variable(variable),
            Expr::Field(field) => self.compile_field(field),
            Expr::StaticField(field) => self.compile_static(field),
        }
    }

    /// Emit code storing the value on top of the stack through `expr`.
    ///
    /// `.. value` -> `.. value`
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile_assign(&mut self, expr: &Expr) -> Result<()> {
        self.emitter.set_line(expr.span().line);
        match expr {
            Expr::Variable(variable) => self.assign_variable(variable),
            Expr::Field(field) => self.assign_field(field),
            Expr::StaticField(field) => self.assign_static(field),
        }
    }

    fn compile_variable(&mut self, variable: &Variable) -> Result<()> {
        let slot = variable_slot(variable)?;
        self.emitter.emit_get_local(slot, variable.ty().width())?;
        Ok(())
    }

    fn assign_variable(&mut self, variable: &Variable) -> Result<()> {
        let slot = variable_slot(variable)?;
        let width = variable.ty().width();
        self.emitter.emit_dup_value(width);
        self.emitter.emit_set_local(slot, width)?;
        Ok(())
    }

    fn compile_field(&mut self, field: &FieldExpr) -> Result<()> {
        match field.resolution() {
            Some(Resolution::Static(target)) => self.compile_static(target),
            Some(Resolution::Instance {
                owner,
                field: descriptor,
                ty,
            }) => {
                let width = ty.width();
                let mark = self.emitter.mark();
                self.compile(owner)?;
                self.emitter.emit_get_field(descriptor, width)?;
                self.emitter.verify(mark, width as i32, "field read")?;
                trace!("compiled read of {field} (width {width})");
                Ok(())
            }
            None => Err(CodegenError::Unresolved {
                text: field.to_string(),
            }),
        }
    }

    fn assign_field(&mut self, field: &FieldExpr) -> Result<()> {
        match field.resolution() {
            Some(Resolution::Static(target)) => self.assign_static(target),
            Some(Resolution::Instance {
                owner,
                field: descriptor,
                ty,
            }) => {
                let width = ty.width();
                let mark = self.emitter.mark();
                // .. value value
                self.emitter.emit_dup_value(width);
                // .. value value owner
                self.compile(owner)?;
                // .. value owner value
                self.emitter.emit_owner_below_value(width);
                self.emitter.emit_put_field(descriptor, width)?;
                self.emitter.verify(mark, 0, "field write")?;
                trace!("compiled write of {field} (width {width})");
                Ok(())
            }
            None => Err(CodegenError::Unresolved {
                text: field.to_string(),
            }),
        }
    }

    fn compile_static(&mut self, target: &StaticFieldExpr) -> Result<()> {
        let resolved = target.resolved().ok_or_else(|| CodegenError::Unresolved {
            text: target.to_string(),
        })?;
        let width = resolved.ty.width();
        let mark = self.emitter.mark();
        self.emitter.emit_get_static(&resolved.field, width)?;
        self.emitter.verify(mark, width as i32, "static field read")
    }

    fn assign_static(&mut self, target: &StaticFieldExpr) -> Result<()> {
        let resolved = target.resolved().ok_or_else(|| CodegenError::Unresolved {
            text: target.to_string(),
        })?;
        let width = resolved.ty.width();
        let mark = self.emitter.mark();
        self.emitter.emit_dup_value(width);
        self.emitter.emit_put_static(&resolved.field, width)?;
        self.emitter.verify(mark, 0, "static field write")
    }
}

fn variable_slot(variable: &Variable) -> Result<u32> {
    variable.slot().ok_or_else(|| CodegenError::Unresolved {
        text: variable.name().to_string(),
    })
}
