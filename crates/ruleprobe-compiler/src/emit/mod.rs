//! Bytecode emitter with operand-stack height tracking.
//!
//! The [`BytecodeEmitter`] applies the stack effect of every instruction it
//! writes. Callers snapshot the height with [`BytecodeEmitter::mark`] before
//! a sequence and check the net effect with [`BytecodeEmitter::verify`].
//!
//! # Example
//!
//! ```ignore
//! use ruleprobe_compiler::bytecode::ConstantPool;
//! use ruleprobe_compiler::emit::BytecodeEmitter;
//!
//! let mut constants = ConstantPool::new();
//! let mut emitter = BytecodeEmitter::new(&mut constants);
//!
//! let mark = emitter.mark();
//! emitter.emit_get_local(0, 1)?;
//! emitter.emit_get_field(&field, 2)?;
//! emitter.verify(mark, 2, "field read")?;
//!
//! let chunk = emitter.finish();
//! ```

mod stack;

pub use stack::StackMark;

use log::trace;
use ruleprobe_core::{CodegenError, FieldDescriptor};

use crate::bytecode::{BytecodeChunk, Constant, ConstantPool, OpCode};
use stack::StackTracker;

/// Emits bytecode for rule expressions.
///
/// Each emitter produces one chunk. The constant pool is shared so field
/// references are deduplicated across every expression of a rule set.
pub struct BytecodeEmitter<'pool> {
    chunk: BytecodeChunk,
    constants: &'pool mut ConstantPool,
    stack: StackTracker,
    /// Current source line for debug info
    current_line: u32,
}

impl<'pool> BytecodeEmitter<'pool> {
    pub fn new(constants: &'pool mut ConstantPool) -> Self {
        Self {
            chunk: BytecodeChunk::new(),
            constants,
            stack: StackTracker::default(),
            current_line: 1,
        }
    }

    /// Set current source line for debug info.
    pub fn set_line(&mut self, line: u32) {
        self.current_line = line;
    }

    pub fn current_line(&self) -> u32 {
        self.current_line
    }

    // ==========================================================================
    // Stack Height
    // ==========================================================================

    /// Current operand-stack height in slots.
    pub fn height(&self) -> i32 {
        self.stack.height()
    }

    /// Largest height reached so far.
    pub fn max_height(&self) -> i32 {
        self.stack.max()
    }

    pub fn mark(&self) -> StackMark {
        StackMark {
            height: self.stack.height(),
        }
    }

    /// Check that the height moved by exactly `delta` since `mark`.
    pub fn verify(&self, mark: StackMark, delta: i32, context: &str) -> Result<(), CodegenError> {
        let expected = mark.height + delta;
        let actual = self.stack.height();
        if actual != expected {
            return Err(CodegenError::StackHeight {
                context: context.to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    // ==========================================================================
    // Basic Emission
    // ==========================================================================

    fn write(&mut self, op: OpCode, delta: i32) {
        self.chunk.write_op(op, self.current_line);
        self.stack.adjust(delta);
        trace!("emit {} ({delta:+}) -> height {}", op.name(), self.stack.height());
    }

    fn write_u8(&mut self, op: OpCode, operand: u8, delta: i32) {
        self.write(op, delta);
        self.chunk.write_byte(operand, self.current_line);
    }

    fn write_u16(&mut self, op: OpCode, operand: u16, delta: i32) {
        self.write(op, delta);
        self.chunk.write_u16(operand, self.current_line);
    }

    /// Emit an opcode whose stack effect does not depend on value width.
    fn emit_fixed(&mut self, op: OpCode) {
        let delta = op.fixed_stack_effect().unwrap_or(0);
        self.write(op, delta);
    }

    // ==========================================================================
    // Constants
    // ==========================================================================

    /// Emit a constant load pushing a value `width` slots wide.
    pub fn emit_constant(&mut self, constant: Constant, width: u32) -> Result<(), CodegenError> {
        let index = self.constants.add(constant);
        let delta = width as i32;
        if index < 256 {
            self.write_u8(OpCode::Constant, index as u8, delta);
        } else {
            let index = wide_operand("constant", index)?;
            self.write_u16(OpCode::ConstantWide, index, delta);
        }
        Ok(())
    }

    pub fn emit_int(&mut self, value: i32) -> Result<(), CodegenError> {
        self.emit_constant(Constant::Int(value as i64), 1)
    }

    pub fn emit_long(&mut self, value: i64) -> Result<(), CodegenError> {
        self.emit_constant(Constant::Int(value), 2)
    }

    pub fn emit_double(&mut self, value: f64) -> Result<(), CodegenError> {
        self.emit_constant(Constant::Float64(value), 2)
    }

    pub fn emit_null(&mut self) {
        self.emit_fixed(OpCode::PushNull);
    }

    // ==========================================================================
    // Bindings
    // ==========================================================================

    /// Load a binding slot holding a value `width` slots wide.
    pub fn emit_get_local(&mut self, slot: u32, width: u32) -> Result<(), CodegenError> {
        let delta = width as i32;
        if slot < 256 {
            self.write_u8(OpCode::GetLocal, slot as u8, delta);
        } else {
            let slot = wide_operand("local slot", slot)?;
            self.write_u16(OpCode::GetLocalWide, slot, delta);
        }
        Ok(())
    }

    /// Store the top value (`width` slots) into a binding slot.
    pub fn emit_set_local(&mut self, slot: u32, width: u32) -> Result<(), CodegenError> {
        let delta = -(width as i32);
        if slot < 256 {
            self.write_u8(OpCode::SetLocal, slot as u8, delta);
        } else {
            let slot = wide_operand("local slot", slot)?;
            self.write_u16(OpCode::SetLocalWide, slot, delta);
        }
        Ok(())
    }

    // ==========================================================================
    // Fields
    // ==========================================================================

    fn field_ref(&mut self, field: &FieldDescriptor) -> Result<u16, CodegenError> {
        let index = self.constants.add_field_ref(
            field.declaring_type.internal_name(),
            field.name.clone(),
            field.value_class.descriptor(),
        );
        wide_operand("field reference", index)
    }

    /// `.. owner` -> `.. value`
    pub fn emit_get_field(
        &mut self,
        field: &FieldDescriptor,
        width: u32,
    ) -> Result<(), CodegenError> {
        let index = self.field_ref(field)?;
        self.write_u16(OpCode::GetField, index, width as i32 - 1);
        Ok(())
    }

    /// `.. owner value` -> `..`
    pub fn emit_put_field(
        &mut self,
        field: &FieldDescriptor,
        width: u32,
    ) -> Result<(), CodegenError> {
        let index = self.field_ref(field)?;
        self.write_u16(OpCode::PutField, index, -(1 + width as i32));
        Ok(())
    }

    /// `..` -> `.. value`
    pub fn emit_get_static(
        &mut self,
        field: &FieldDescriptor,
        width: u32,
    ) -> Result<(), CodegenError> {
        let index = self.field_ref(field)?;
        self.write_u16(OpCode::GetStatic, index, width as i32);
        Ok(())
    }

    /// `.. value` -> `..`
    pub fn emit_put_static(
        &mut self,
        field: &FieldDescriptor,
        width: u32,
    ) -> Result<(), CodegenError> {
        let index = self.field_ref(field)?;
        self.write_u16(OpCode::PutStatic, index, -(width as i32));
        Ok(())
    }

    // ==========================================================================
    // Stack Operations
    // ==========================================================================

    /// Duplicate the top value: `Dup` for one slot, `Dup2` for two.
    pub fn emit_dup_value(&mut self, width: u32) {
        self.emit_fixed(if width == 2 { OpCode::Dup2 } else { OpCode::Dup });
    }

    /// Discard the top value: `Pop` for one slot, `Pop2` for two.
    pub fn emit_pop_value(&mut self, width: u32) {
        self.emit_fixed(if width == 2 { OpCode::Pop2 } else { OpCode::Pop });
    }

    /// Move a reference pushed on top of a value beneath it.
    ///
    /// `.. value owner` -> `.. owner value`. A single-slot value is swapped.
    /// A two-slot value has the owner copied under it with `DupX2` and the
    /// original popped, since no instruction swaps one slot with two.
    pub fn emit_owner_below_value(&mut self, width: u32) {
        if width == 2 {
            self.emit_fixed(OpCode::DupX2);
            self.emit_fixed(OpCode::Pop);
        } else {
            self.emit_fixed(OpCode::Swap);
        }
    }

    /// Finish emission and return the chunk.
    pub fn finish(self) -> BytecodeChunk {
        self.chunk
    }
}

/// Narrow an index to a 16-bit operand.
fn wide_operand(operand: &str, index: u32) -> Result<u16, CodegenError> {
    u16::try_from(index).map_err(|_| CodegenError::OperandOverflow {
        operand: operand.to_string(),
        index,
    })
}
