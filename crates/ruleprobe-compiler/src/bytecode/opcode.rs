//! Operation codes for the operand-stack machine targeted by rules.
//!
//! Each opcode is a single byte, with operands following inline. Stack slots
//! are one word wide; `long` and `double` values occupy two slots.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Bytecode operation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum OpCode {
    // =========================================================================
    // Constants
    // =========================================================================
    /// Push constant from pool (8-bit index).
    /// Operand: u8 constant index
    Constant = 0,
    /// Push constant from pool (16-bit index).
    /// Operand: u16 constant index (big-endian)
    ConstantWide,
    /// Push null reference.
    PushNull,

    // =========================================================================
    // Stack Operations
    // =========================================================================
    /// Pop one slot.
    Pop,
    /// Pop two slots.
    Pop2,
    /// Duplicate the top slot.
    Dup,
    /// Duplicate the top two slots.
    Dup2,
    /// Duplicate the top slot and insert it beneath the third.
    /// `.. c b a` -> `.. a c b a`
    DupX2,
    /// Exchange the top two slots.
    Swap,

    // =========================================================================
    // Local Variables
    // =========================================================================
    /// Load binding slot (8-bit index).
    /// Operand: u8 slot index
    GetLocal,
    /// Store to binding slot (8-bit index).
    /// Operand: u8 slot index
    SetLocal,
    /// Load binding slot (16-bit index).
    /// Operand: u16 slot index (big-endian)
    GetLocalWide,
    /// Store to binding slot (16-bit index).
    /// Operand: u16 slot index (big-endian)
    SetLocalWide,

    // =========================================================================
    // Fields
    // =========================================================================
    /// Pop an owner reference, push the field value.
    /// Operand: u16 field-ref constant index
    GetField,
    /// Pop a value and an owner reference beneath it, store the value.
    /// Operand: u16 field-ref constant index
    PutField,
    /// Push a static field value.
    /// Operand: u16 field-ref constant index
    GetStatic,
    /// Pop a value, store it in a static field.
    /// Operand: u16 field-ref constant index
    PutStatic,
}

impl OpCode {
    /// Convert a raw byte to an opcode.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Number of operand bytes following the opcode.
    pub fn operand_size(&self) -> usize {
        match self {
            OpCode::PushNull
            | OpCode::Pop
            | OpCode::Pop2
            | OpCode::Dup
            | OpCode::Dup2
            | OpCode::DupX2
            | OpCode::Swap => 0,

            OpCode::Constant | OpCode::GetLocal | OpCode::SetLocal => 1,

            OpCode::ConstantWide
            | OpCode::GetLocalWide
            | OpCode::SetLocalWide
            | OpCode::GetField
            | OpCode::PutField
            | OpCode::GetStatic
            | OpCode::PutStatic => 2,
        }
    }

    /// Net change in stack slots for opcodes whose effect does not depend on
    /// the width of the value they move.
    ///
    /// Loads, stores and field accesses return `None`: their effect is
    /// determined by the value width supplied at emission.
    pub fn fixed_stack_effect(&self) -> Option<i32> {
        match self {
            OpCode::PushNull => Some(1),
            OpCode::Pop => Some(-1),
            OpCode::Pop2 => Some(-2),
            OpCode::Dup | OpCode::DupX2 => Some(1),
            OpCode::Dup2 => Some(2),
            OpCode::Swap => Some(0),
            OpCode::Constant
            | OpCode::ConstantWide
            | OpCode::GetLocal
            | OpCode::SetLocal
            | OpCode::GetLocalWide
            | OpCode::SetLocalWide
            | OpCode::GetField
            | OpCode::PutField
            | OpCode::GetStatic
            | OpCode::PutStatic => None,
        }
    }

    /// Get the name of this opcode for disassembly.
    pub fn name(&self) -> &'static str {
        match self {
            OpCode::Constant => "CONSTANT",
            OpCode::ConstantWide => "CONSTANT_WIDE",
            OpCode::PushNull => "PUSH_NULL",
            OpCode::Pop => "POP",
            OpCode::Pop2 => "POP2",
            OpCode::Dup => "DUP",
            OpCode::Dup2 => "DUP2",
            OpCode::DupX2 => "DUP_X2",
            OpCode::Swap => "SWAP",
            OpCode::GetLocal => "GET_LOCAL",
            OpCode::SetLocal => "SET_LOCAL",
            OpCode::GetLocalWide => "GET_LOCAL_WIDE",
            OpCode::SetLocalWide => "SET_LOCAL_WIDE",
            OpCode::GetField => "GET_FIELD",
            OpCode::PutField => "PUT_FIELD",
            OpCode::GetStatic => "GET_STATIC",
            OpCode::PutStatic => "PUT_STATIC",
        }
    }
}
