//! Bytecode types emitted for rule expressions.
//!
//! - [`OpCode`] - The instruction set, each with a known stack effect
//! - [`BytecodeChunk`] - Emitted instructions for one expression
//! - [`Constant`] and [`ConstantPool`] - Shared constant storage, including
//!   field references

mod chunk;
mod constant;
mod opcode;

pub use chunk::BytecodeChunk;
pub use constant::{Constant, ConstantPool};
pub use opcode::OpCode;
