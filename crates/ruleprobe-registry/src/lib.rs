//! The type universe for rule resolution.
//!
//! [`TypeRegistry`] records the classes visible to instrumentation rules and
//! implements [`ruleprobe_core::TypeUniverse`] on top of them:
//!
//! - longest-prefix matching of dotted paths against qualified names
//! - expansion of unqualified names through configured default packages
//! - field lookup through the superclass and interface hierarchy
//!
//! It can also populate an [`ruleprobe_core::ObjectHeap`] with instances and
//! static field values laid out from the registered classes.

mod class;
mod hierarchy;
mod registry;

pub use class::{ClassEntry, FieldEntry};
pub use registry::{RegistryConfig, TypeRegistry};
