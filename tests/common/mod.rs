//! Shared fixture for the integration tests.
//!
//! The registry models a small application:
//!
//! - `com.acme.Config` with static and instance fields of both widths
//! - `com.acme.Derived` extending `com.acme.Base`
//! - `p.Q` and the nested `p.Q.R`, whose names share a prefix
//! - `java.lang.Thread`, reachable by its simple name

#![allow(dead_code)]

use ruleprobe::prelude::*;

pub const CONFIG: &str = "com.acme.Config";

/// Route resolution logs to the test output.
pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

pub fn registry() -> TypeRegistry {
    init_logging();
    let mut registry = TypeRegistry::new();
    registry
        .register(
            ClassEntry::new(CONFIG)
                .static_field("VERSION", TypeDescriptor::INT, Value::Int(3))
                .flagged(FieldFlags::FINAL)
                .static_field("DEFAULT", TypeDescriptor::class(CONFIG), Value::Null)
                .static_field("hits", TypeDescriptor::LONG, Value::Long(0))
                .field("count", TypeDescriptor::LONG)
                .field("limit", TypeDescriptor::INT)
                .field("ratio", TypeDescriptor::DOUBLE)
                .field("parent", TypeDescriptor::class(CONFIG)),
        )
        .unwrap();
    registry
        .register(ClassEntry::new("com.acme.Base").field("id", TypeDescriptor::INT))
        .unwrap();
    registry
        .register(
            ClassEntry::new("com.acme.Derived")
                .extends("com.acme.Base")
                .field("extra", TypeDescriptor::INT),
        )
        .unwrap();
    registry
        .register(ClassEntry::new("p.Q").static_field("R", TypeDescriptor::INT, Value::Int(1)))
        .unwrap();
    registry
        .register(ClassEntry::new("p.Q.R").static_field(
            "field",
            TypeDescriptor::LONG,
            Value::Long(7),
        ))
        .unwrap();
    registry
        .register(ClassEntry::new("java.lang.Thread").static_field(
            "MAX_PRIORITY",
            TypeDescriptor::INT,
            Value::Int(10),
        ))
        .unwrap();
    registry
}

pub fn object_type(registry: &TypeRegistry, name: &str) -> Type {
    Type::Object(registry.object_type(&TypeName::new(name)).unwrap())
}

/// Bindings `a: Config`, `d: Derived` and `n: int`.
pub fn bindings(registry: &TypeRegistry) -> Bindings {
    let mut bindings = Bindings::new();
    bindings.declare("a", object_type(registry, CONFIG));
    bindings.declare("d", object_type(registry, "com.acme.Derived"));
    bindings.declare("n", Type::INT);
    bindings
}

pub fn span_of(text: &str) -> Span {
    Span::new(1, 1, text.len() as u32)
}

/// Parse, bind and type check `text`.
pub fn try_resolve(
    registry: &TypeRegistry,
    bindings: &Bindings,
    text: &str,
    expected: &Type,
) -> Result<Expr, ResolutionError> {
    let mut expr = Expr::parse_path(text, span_of(text))?;
    Binder::new(bindings).bind(&mut expr)?;
    TypeChecker::new(registry, bindings).check(&mut expr, expected)?;
    Ok(expr)
}

pub fn resolve(registry: &TypeRegistry, bindings: &Bindings, text: &str) -> Expr {
    try_resolve(registry, bindings, text, &Type::Undefined).unwrap()
}

/// A heap populated from `registry`, with one `Config` instance.
pub fn heap(registry: &TypeRegistry) -> (ObjectHeap, ObjectHandle) {
    let mut heap = ObjectHeap::new();
    registry.install_statics(&mut heap).unwrap();
    let config = registry
        .instantiate(&mut heap, &TypeName::new(CONFIG))
        .unwrap();
    (heap, config)
}
