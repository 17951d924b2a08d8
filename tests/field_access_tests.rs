//! End-to-end field access: resolution, interpretation and emitted code over
//! the shared fixture.

mod common;

use common::*;
use ruleprobe::compiler::{FieldTarget, Resolution};
use ruleprobe::prelude::*;

/// Walk a checked expression and assert every field node has exactly one
/// structured target and a recorded resolution.
fn assert_fully_resolved(expr: &Expr) {
    match expr {
        Expr::Variable(variable) => assert!(variable.slot().is_some(), "{variable} unbound"),
        Expr::StaticField(target) => assert!(target.resolved().is_some(), "{target} unresolved"),
        Expr::Field(field) => {
            assert!(field.path().is_none(), "{field} kept its path");
            match field.resolution() {
                Some(Resolution::Instance { owner, .. }) => {
                    assert!(field.static_target().is_none());
                    assert_fully_resolved(owner);
                }
                Some(Resolution::Static(target)) => {
                    assert!(field.owner().is_none());
                    assert!(target.resolved().is_some());
                }
                None => panic!("{field} has no resolution"),
            }
        }
    }
}

fn compile_read(expr: &Expr) -> (BytecodeChunk, i32, i32) {
    let mut constants = ConstantPool::new();
    let mut emitter = BytecodeEmitter::new(&mut constants);
    ExprCodegen::new(&mut emitter).compile(expr).unwrap();
    let (height, max) = (emitter.height(), emitter.max_height());
    (emitter.finish(), height, max)
}

/// Push a placeholder of `ty`'s width, then compile the store.
fn compile_write(expr: &Expr, ty: &Type) -> (BytecodeChunk, i32, i32) {
    let mut constants = ConstantPool::new();
    let mut emitter = BytecodeEmitter::new(&mut constants);
    if ty.width() == 2 {
        emitter.emit_long(0).unwrap();
    } else {
        emitter.emit_int(0).unwrap();
    }
    ExprCodegen::new(&mut emitter).compile_assign(expr).unwrap();
    let (height, max) = (emitter.height(), emitter.max_height());
    (emitter.finish(), height, max)
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn every_checked_expression_is_fully_resolved() {
    let registry = registry();
    let bindings = bindings(&registry);
    for text in [
        "a.count",
        "a.parent.parent.limit",
        "com.acme.Config.VERSION",
        "com.acme.Config.DEFAULT.count",
        "p.Q.R.field",
        "d.id",
        "n",
    ] {
        let expr = resolve(&registry, &bindings, text);
        assert_fully_resolved(&expr);
        assert!(expr.is_resolved(), "{text}");
        assert_eq!(expr.to_string(), text);
    }
}

#[test]
fn longest_type_name_wins() {
    let registry = registry();
    let bindings = bindings(&registry);

    let expr = resolve(&registry, &bindings, "p.Q.R.field");
    let Expr::Field(field) = &expr else {
        panic!("expected a field expression");
    };
    let target = field.static_target().unwrap();
    assert_eq!(target.owner_type().qualified(), "p.Q.R");
    assert_eq!(target.field_name(), "field");
    assert_eq!(expr.ty(), &Type::LONG);

    // The shorter class still resolves its own static field.
    let expr = resolve(&registry, &bindings, "p.Q.R");
    let Expr::Field(field) = &expr else {
        panic!("expected a field expression");
    };
    assert_eq!(field.static_target().unwrap().owner_type().qualified(), "p.Q");
    assert_eq!(expr.ty(), &Type::INT);
}

#[test]
fn binding_takes_precedence_over_type_name() {
    let registry = registry();
    let mut bindings = bindings(&registry);
    bindings.declare("com", object_type(&registry, CONFIG));

    let expr = resolve(&registry, &bindings, "com.count");
    let Expr::Field(field) = &expr else {
        panic!("expected a field expression");
    };
    assert!(matches!(
        field.target(),
        FieldTarget::Owner(owner) if matches!(**owner, Expr::Variable(_))
    ));
    assert_eq!(expr.ty(), &Type::LONG);

    // The class path is shadowed too: `com` is the binding.
    let err = try_resolve(&registry, &bindings, "com.acme.Config.VERSION", &Type::Undefined)
        .unwrap_err();
    assert!(matches!(err, ResolutionError::UnknownField { .. }));
}

#[test]
fn inherited_field_resolves_to_declaring_type() {
    let registry = registry();
    let bindings = bindings(&registry);
    let expr = resolve(&registry, &bindings, "d.id");
    let Expr::Field(field) = &expr else {
        panic!("expected a field expression");
    };
    let resolved = field.resolved().unwrap();
    assert_eq!(resolved.field.declaring_type.qualified(), "com.acme.Base");
    assert_eq!(resolved.ty, Type::INT);
}

#[test]
fn long_field_against_int_is_type_mismatch() {
    let registry = registry();
    let bindings = bindings(&registry);
    let err = try_resolve(&registry, &bindings, "a.count", &Type::INT).unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::TypeMismatch { ref text, .. } if text == "a.count"
    ));

    // Widening int to long is fine.
    try_resolve(&registry, &bindings, "a.limit", &Type::LONG).unwrap();
}

#[test]
fn unknown_class_path_is_invalid() {
    let registry = registry();
    let bindings = bindings(&registry);
    let err = try_resolve(&registry, &bindings, "org.other.Thing.X", &Type::Undefined).unwrap_err();
    assert_eq!(
        err,
        ResolutionError::InvalidPath {
            path: "org.other.Thing".into(),
            field: "X".into(),
            span: span_of("org.other.Thing.X"),
        }
    );
}

// =============================================================================
// Interpretation
// =============================================================================

#[test]
fn static_field_interprets_to_its_value() {
    let registry = registry();
    let bindings = bindings(&registry);
    let expr = resolve(&registry, &bindings, "com.acme.Config.VERSION");
    let (mut heap, _) = heap(&registry);
    let mut frame = Frame::new(&mut heap);
    assert_eq!(Interpreter::new(&mut frame).interpret(&expr), Ok(Value::Int(3)));
}

#[test]
fn default_package_static_interprets() {
    let registry = registry();
    let bindings = bindings(&registry);
    let expr = resolve(&registry, &bindings, "Thread.MAX_PRIORITY");
    assert_eq!(expr.to_string(), "java.lang.Thread.MAX_PRIORITY");
    let (mut heap, _) = heap(&registry);
    let mut frame = Frame::new(&mut heap);
    assert_eq!(Interpreter::new(&mut frame).interpret(&expr), Ok(Value::Int(10)));
}

#[test]
fn read_write_round_trip() {
    let registry = registry();
    let bindings = bindings(&registry);
    let (mut heap, config) = heap(&registry);
    let mut frame = Frame::new(&mut heap);
    frame.bind("a", Value::Object(config));
    let mut interp = Interpreter::new(&mut frame);

    for (text, value) in [
        ("a.count", Value::Long(1 << 40)),
        ("a.limit", Value::Int(-5)),
        ("a.ratio", Value::Double(0.25)),
        ("com.acme.Config.hits", Value::Long(9)),
    ] {
        let expr = resolve(&registry, &bindings, text);
        assert_eq!(interp.interpret_assign(&expr, value), Ok(value));
        assert_eq!(interp.interpret(&expr), Ok(value), "{text}");
    }
}

#[test]
fn assignment_widens_to_field_type() {
    let registry = registry();
    let bindings = bindings(&registry);
    let (mut heap, config) = heap(&registry);
    let mut frame = Frame::new(&mut heap);
    frame.bind("a", Value::Object(config));
    let expr = resolve(&registry, &bindings, "a.count");

    let mut interp = Interpreter::new(&mut frame);
    interp.interpret_assign(&expr, Value::Int(5)).unwrap();
    assert_eq!(interp.interpret(&expr), Ok(Value::Long(5)));
}

#[test]
fn absent_owner_raises_null_indirection() {
    let mut registry = registry();
    registry
        .register(ClassEntry::new("demo.Holder").field("b", TypeDescriptor::INT))
        .unwrap();
    let mut bindings = Bindings::new();
    bindings.declare("a", object_type(&registry, "demo.Holder"));
    let expr = resolve(&registry, &bindings, "a.b");

    let (mut heap, _) = heap(&registry);
    let mut frame = Frame::new(&mut heap);
    frame.bind("a", Value::Null);

    let err = Interpreter::new(&mut frame).interpret(&expr).unwrap_err();
    assert_eq!(
        err,
        ExecuteError::NullIndirection {
            text: "a.b".into(),
            span: span_of("a.b"),
        }
    );
    assert!(err.to_string().contains("a.b"));
}

#[test]
fn null_static_owner_in_chain() {
    let registry = registry();
    let bindings = bindings(&registry);
    let expr = resolve(&registry, &bindings, "com.acme.Config.DEFAULT.count");
    let (mut heap, _) = heap(&registry);
    let mut frame = Frame::new(&mut heap);

    let err = Interpreter::new(&mut frame).interpret(&expr).unwrap_err();
    assert!(matches!(
        err,
        ExecuteError::NullIndirection { ref text, .. } if text == "com.acme.Config.DEFAULT.count"
    ));
}

#[test]
fn final_field_cannot_be_assigned() {
    let registry = registry();
    let bindings = bindings(&registry);
    let expr = resolve(&registry, &bindings, "com.acme.Config.VERSION");
    let (mut heap, _) = heap(&registry);
    let mut frame = Frame::new(&mut heap);

    let err = Interpreter::new(&mut frame)
        .interpret_assign(&expr, Value::Int(4))
        .unwrap_err();
    assert!(matches!(err, ExecuteError::AccessDenied { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

// =============================================================================
// Emitted code
// =============================================================================

#[test]
fn read_height_matches_width() {
    let registry = registry();
    let bindings = bindings(&registry);
    for (text, width) in [
        ("a.limit", 1),
        ("a.count", 2),
        ("a.ratio", 2),
        ("a.parent.limit", 1),
        ("com.acme.Config.VERSION", 1),
        ("com.acme.Config.hits", 2),
        ("com.acme.Config.DEFAULT.count", 2),
    ] {
        let expr = resolve(&registry, &bindings, text);
        let (_, height, _) = compile_read(&expr);
        assert_eq!(height, width, "{text}");
    }
}

#[test]
fn write_leaves_only_the_value() {
    let registry = registry();
    let bindings = bindings(&registry);
    for text in ["a.limit", "a.count", "a.parent.ratio", "com.acme.Config.hits", "n"] {
        let expr = resolve(&registry, &bindings, text);
        let width = expr.ty().width() as i32;
        let (_, height, _) = compile_write(&expr, expr.ty());
        assert_eq!(height, width, "{text}");
    }
}

#[test]
fn narrow_write_sequence() {
    let registry = registry();
    let bindings = bindings(&registry);
    let expr = resolve(&registry, &bindings, "a.limit");
    let (chunk, _, max) = compile_write(&expr, &Type::INT);
    chunk.assert_ops(&[
        OpCode::Constant,
        OpCode::Dup,
        OpCode::GetLocal,
        OpCode::Swap,
        OpCode::PutField,
    ]);
    assert_eq!(max, 3);
}

#[test]
fn wide_write_sequence() {
    let registry = registry();
    let bindings = bindings(&registry);
    let expr = resolve(&registry, &bindings, "a.count");
    let (chunk, _, max) = compile_write(&expr, &Type::LONG);
    chunk.assert_ops(&[
        OpCode::Constant,
        OpCode::Dup2,
        OpCode::GetLocal,
        OpCode::DupX2,
        OpCode::Pop,
        OpCode::PutField,
    ]);
    // Heights: CONSTANT 2, DUP2 4, GET_LOCAL 5, DUP_X2 6, POP 5, PUT_FIELD 2.
    assert_eq!(max, 6);
}

#[test]
fn static_chain_disassembles() {
    let registry = registry();
    let bindings = bindings(&registry);
    let expr = resolve(&registry, &bindings, "com.acme.Config.DEFAULT.count");
    let (chunk, _, _) = compile_read(&expr);
    assert_eq!(chunk.ops(), vec![OpCode::GetStatic, OpCode::GetField]);
    assert_eq!(chunk.disassemble(), "0000 GET_STATIC 0\n0003 GET_FIELD 1\n");
}
