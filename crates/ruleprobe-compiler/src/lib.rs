//! Ruleprobe expression compiler
//!
//! Resolves field expressions written in instrumentation rules and executes
//! them either by interpretation or as bytecode.
//!
//! ## Passes
//!
//! - **Binding**: paths rooted at a rule binding become instance-field chains
//! - **Type checking**: remaining paths are split into a class name and a
//!   static field, then every node records its field and type
//! - **Execution**: the [`Interpreter`] walks the resolved tree, or
//!   [`ExprCodegen`] emits it as stack bytecode
//!
//! ## Modules
//!
//! - [`bind`]: Binding resolution
//! - [`bindings`]: Rule binding declarations and slot allocation
//! - [`bytecode`]: Bytecode types (OpCode, BytecodeChunk, ConstantPool)
//! - [`codegen`]: Bytecode generation for resolved expressions
//! - [`emit`]: Low-level emitter with stack height tracking
//! - [`expr`]: Expression tree
//! - [`interp`]: Tree-walking interpreter
//! - [`typeck`]: Type checking and path restructuring

pub mod bind;
pub mod bindings;
pub mod bytecode;
pub mod codegen;
pub mod emit;
pub mod expr;
pub mod interp;
pub mod typeck;

pub use bind::Binder;
pub use bindings::{Binding, BindingLookup, Bindings};
pub use bytecode::{BytecodeChunk, Constant, ConstantPool, OpCode};
pub use codegen::ExprCodegen;
pub use emit::{BytecodeEmitter, StackMark};
pub use expr::{Expr, FieldExpr, FieldTarget, Resolution, ResolvedField, StaticFieldExpr, Variable};
pub use interp::{ExecutionContext, Frame, Interpreter};
pub use typeck::TypeChecker;
