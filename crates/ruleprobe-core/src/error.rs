//! Error types for every phase of field-expression processing.
//!
//! ## Error Hierarchy
//!
//! ```text
//! RuleError (top-level wrapper)
//! ├── RegistrationError - building the type universe
//! ├── ResolutionError   - binding and type checking a rule expression
//! ├── ExecuteError      - interpreting a resolved expression
//! │   └── AccessError   - the object graph rejected a read or write
//! └── CodegenError      - emitting bytecode (internal consistency)
//! ```
//!
//! A `RuleError` disables the rule it came from; it never aborts the
//! preparation of other rules.

use thiserror::Error;

use crate::Span;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while populating the type universe.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    #[error("duplicate type '{name}'")]
    DuplicateType { name: String },

    #[error("duplicate field '{field}' in type '{type_name}'")]
    DuplicateField { type_name: String, field: String },

    #[error("circular inheritance: '{name}' cannot extend '{ancestor}'")]
    CircularInheritance { name: String, ancestor: String },

    #[error("unknown type '{name}'")]
    UnknownType { name: String },

    #[error("invalid initial value for '{field}': {message}")]
    InvalidInitialValue { field: String, message: String },
}

// ============================================================================
// Resolution Errors
// ============================================================================

/// Errors raised while binding and type checking a rule expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    /// The dotted text is not a well-formed path.
    #[error("at {span}: malformed field path '{text}'")]
    MalformedPath { text: String, span: Span },

    #[error("at {span}: unknown variable '{name}'")]
    UnknownVariable { name: String, span: Span },

    /// No leading run of the path names a known type.
    #[error("at {span}: invalid path {path} to static field {field}")]
    InvalidPath {
        path: String,
        field: String,
        span: Span,
    },

    /// The universe matched a type whose name does not agree with the path.
    #[error("at {span}: path {path} does not name type {type_name}")]
    PathMismatch {
        path: String,
        type_name: String,
        span: Span,
    },

    #[error("at {span}: unbound owner type for field {field}")]
    UnboundOwner { field: String, span: Span },

    #[error("at {span}: field {field} accessed on non-object type {type_name}")]
    NotAnObject {
        field: String,
        type_name: String,
        span: Span,
    },

    #[error("at {span}: invalid field reference {field} for type {type_name}")]
    UnknownField {
        field: String,
        type_name: String,
        span: Span,
    },

    /// A static field was reached through an instance owner.
    #[error("at {span}: field {field} of type {type_name} is static")]
    StaticThroughInstance {
        field: String,
        type_name: String,
        span: Span,
    },

    /// An instance field was named as if it were static.
    #[error("at {span}: field {field} of type {type_name} is not static")]
    NotStatic {
        field: String,
        type_name: String,
        span: Span,
    },

    #[error("at {span}: invalid expected type {expected} for {text} of type {found}")]
    TypeMismatch {
        text: String,
        expected: String,
        found: String,
        span: Span,
    },
}

impl ResolutionError {
    /// Where in the rule text the error was detected.
    pub fn span(&self) -> Span {
        match self {
            ResolutionError::MalformedPath { span, .. }
            | ResolutionError::UnknownVariable { span, .. }
            | ResolutionError::InvalidPath { span, .. }
            | ResolutionError::PathMismatch { span, .. }
            | ResolutionError::UnboundOwner { span, .. }
            | ResolutionError::NotAnObject { span, .. }
            | ResolutionError::UnknownField { span, .. }
            | ResolutionError::StaticThroughInstance { span, .. }
            | ResolutionError::NotStatic { span, .. }
            | ResolutionError::TypeMismatch { span, .. } => *span,
        }
    }
}

// ============================================================================
// Access Errors
// ============================================================================

/// Errors raised by an object graph when a field read or write is refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    /// The field may not be accessed this way (e.g. a write to a final field).
    #[error("access to {field} denied: {reason}")]
    Denied { field: String, reason: String },

    #[error("cannot store {found} in {field} of type {expected}")]
    InvalidArgument {
        field: String,
        expected: String,
        found: String,
    },

    #[error("stale handle: object at index {index} has been freed")]
    StaleHandle { index: u32 },

    #[error("object of type {type_name} has no field {field}")]
    NoSuchField { type_name: String, field: String },
}

// ============================================================================
// Execution Errors
// ============================================================================

/// Errors raised while interpreting a resolved expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecuteError {
    /// The owner of a field access evaluated to null.
    #[error("at {span}: attempted field indirection through null value {text}")]
    NullIndirection { text: String, span: Span },

    #[error("at {span}: variable '{name}' has no value")]
    UnboundVariable { name: String, span: Span },

    #[error("at {span}: error accessing field {field}")]
    AccessDenied {
        field: String,
        span: Span,
        #[source]
        source: AccessError,
    },

    #[error("at {span}: invalid value assigning field {field}")]
    InvalidValue {
        field: String,
        span: Span,
        #[source]
        source: AccessError,
    },

    /// Anything else the object graph or owner evaluation reported.
    #[error("at {span}: unexpected exception accessing field {field}: {message}")]
    Unexpected {
        field: String,
        message: String,
        span: Span,
        #[source]
        source: Option<AccessError>,
    },

    /// The expression was interpreted before it was type checked.
    #[error("at {span}: expression {text} interpreted before resolution")]
    Unresolved { text: String, span: Span },
}

// ============================================================================
// Codegen Errors
// ============================================================================

/// Internal consistency failures while emitting bytecode.
///
/// These indicate a bug in the emitter, never a problem with the rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    #[error("invalid stack height {actual} expecting {expected} after {context}")]
    StackHeight {
        context: String,
        expected: i32,
        actual: i32,
    },

    #[error("expression {text} compiled before resolution")]
    Unresolved { text: String },

    #[error("{operand} index {index} does not fit a 16-bit operand")]
    OperandOverflow { operand: String, index: u32 },
}

// ============================================================================
// Top-level Error
// ============================================================================

/// Any error that disables a rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl RuleError {
    pub fn is_resolution(&self) -> bool {
        matches!(self, RuleError::Resolution(_))
    }

    pub fn is_execute(&self) -> bool {
        matches!(self, RuleError::Execute(_))
    }

    /// Internal consistency failures are fatal: no rule should be trusted
    /// after one.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            RuleError::Codegen(_) | RuleError::Execute(ExecuteError::Unresolved { .. })
        )
    }
}
