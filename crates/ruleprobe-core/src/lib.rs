//! Core types shared by the ruleprobe crates.
//!
//! This crate holds everything the resolver, interpreter and emitter agree on:
//!
//! - [`Span`] for locating diagnostics in rule text
//! - [`TypeName`] and [`TypeHash`] for naming classes in the type universe
//! - [`Type`], [`PrimitiveKind`] and [`ObjectType`] for the type model
//! - [`FieldDescriptor`] for resolved fields
//! - [`Value`] for interpreted values
//! - [`TypeUniverse`] and [`ObjectGraph`], the seams to the host runtime
//! - the error types for every phase

pub mod error;
pub mod field;
pub mod runtime;
mod span;
mod type_hash;
mod type_name;
pub mod types;
pub mod universe;
mod value;

pub use error::{
    AccessError, CodegenError, ExecuteError, RegistrationError, ResolutionError, RuleError,
};
pub use field::{FieldDescriptor, FieldFlags, TypeDescriptor};
pub use runtime::{HeapObject, ObjectGraph, ObjectHandle, ObjectHeap};
pub use span::Span;
pub use type_hash::TypeHash;
pub use type_name::TypeName;
pub use types::{ObjectType, PrimitiveKind, Type};
pub use universe::TypeUniverse;
pub use value::Value;
