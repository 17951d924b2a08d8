//! Field-access resolution for instrumentation rules.
//!
//! Rule text names values through dotted paths such as `$0.config.count` or
//! `com.acme.Config.VERSION`. This crate decides what each path means and
//! executes it:
//!
//! - [`ruleprobe_registry::TypeRegistry`] describes the classes a rule can see
//! - [`ruleprobe_compiler`] binds, type checks, interprets and compiles
//!   resolved expressions
//! - [`RuleSet`] prepares whole rules and disables the ones that fail
//!
//! # Example
//!
//! ```ignore
//! use ruleprobe::prelude::*;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(
//!     ClassEntry::new("com.acme.Config")
//!         .static_field("VERSION", TypeDescriptor::INT, Value::Int(3)),
//! )?;
//!
//! let mut rules = RuleSet::new();
//! rules.add(Rule::new("version", Bindings::new()).read(
//!     "com.acme.Config.VERSION",
//!     Span::point(1, 1),
//!     Type::INT,
//! ));
//! let preparation = rules.prepare(&registry, PrepareOptions::default());
//! ```

mod rule;

pub use rule::{
    DisabledRule, ExprRole, Preparation, PrepareOptions, PreparedExpression, PreparedRule, Rule,
    RuleExpression, RuleSet,
};

pub use ruleprobe_compiler as compiler;
pub use ruleprobe_registry as registry;

pub mod prelude {
    pub use crate::rule::*;
    pub use ruleprobe_compiler::{
        Binder, Binding, BindingLookup, Bindings, BytecodeChunk, BytecodeEmitter, ConstantPool,
        ExecutionContext, Expr, ExprCodegen, Frame, Interpreter, OpCode, TypeChecker,
    };
    pub use ruleprobe_core::{
        ExecuteError, FieldDescriptor, FieldFlags, ObjectGraph, ObjectHandle, ObjectHeap,
        ResolutionError, RuleError, Span, Type, TypeDescriptor, TypeName, TypeUniverse, Value,
    };
    pub use ruleprobe_registry::{ClassEntry, RegistryConfig, TypeRegistry};
}
