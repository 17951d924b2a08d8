//! Benchmarks for field expression resolution and execution.
//!
//! - Resolution: bind + type check of instance chains and static paths
//! - Interpretation: reads and writes over a populated heap
//! - Emission: bytecode for reads and wide writes
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{Criterion, criterion_group, criterion_main};
use ruleprobe::prelude::*;
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
use std::collections::HashMap;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// Print accumulated time per top-level scope.
#[cfg(feature = "profile-with-puffin")]
fn print_profiling_stats() {
    use puffin::Reader;

    let Some(frame_view) = FRAME_VIEW.get() else {
        println!("Profiler not initialized");
        return;
    };
    let view = frame_view.lock();
    let scope_collection = view.scope_collection();

    let mut scope_timings: HashMap<String, i64> = HashMap::new();
    for frame in view.recent_frames() {
        let Ok(unpacked) = frame.unpacked() else {
            continue;
        };
        for (_thread_info, stream_info) in unpacked.thread_streams.iter() {
            let reader = Reader::from_start(&stream_info.stream);
            if let Ok(scopes) = reader.read_top_scopes() {
                for scope in scopes {
                    if let Some(details) = scope_collection.fetch_by_id(&scope.id) {
                        *scope_timings.entry(details.name().to_string()).or_insert(0) +=
                            scope.record.duration_ns;
                    }
                }
            }
        }
    }

    let mut entries: Vec<_> = scope_timings.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    println!("\n=== Profiling Summary ===");
    for (name, ns) in entries {
        println!("  {:40} {:>10.2?}", name, std::time::Duration::from_nanos(ns as u64));
    }
}

#[cfg(not(feature = "profile-with-puffin"))]
fn print_profiling_stats() {}

const CONFIG: &str = "com.acme.Config";

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            ClassEntry::new(CONFIG)
                .static_field("VERSION", TypeDescriptor::INT, Value::Int(3))
                .static_field("DEFAULT", TypeDescriptor::class(CONFIG), Value::Null)
                .field("count", TypeDescriptor::LONG)
                .field("limit", TypeDescriptor::INT)
                .field("parent", TypeDescriptor::class(CONFIG)),
        )
        .unwrap();
    registry
}

fn bindings(registry: &TypeRegistry) -> Bindings {
    let config = registry.object_type(&TypeName::new(CONFIG)).unwrap();
    let mut bindings = Bindings::new();
    bindings.declare("a", Type::Object(config));
    bindings
}

fn resolve(registry: &TypeRegistry, bindings: &Bindings, text: &str) -> Expr {
    let mut expr = Expr::parse_path(text, Span::new(1, 1, text.len() as u32)).unwrap();
    Binder::new(bindings).bind(&mut expr).unwrap();
    TypeChecker::new(registry, bindings)
        .check(&mut expr, &Type::Undefined)
        .unwrap();
    expr
}

fn resolution_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let registry = registry();
    let bindings = bindings(&registry);

    let mut group = c.benchmark_group("field/resolve");
    for (name, text) in [
        ("instance_chain", "a.parent.parent.count"),
        ("static_qualified", "com.acme.Config.VERSION"),
        ("static_then_chain", "com.acme.Config.DEFAULT.parent.limit"),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let expr = resolve(&registry, &bindings, black_box(text));
                end_profiling_frame();
                black_box(expr)
            });
        });
    }
    group.finish();
    print_profiling_stats();
}

fn interpret_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let registry = registry();
    let bindings = bindings(&registry);
    let read = resolve(&registry, &bindings, "a.parent.limit");
    let write = resolve(&registry, &bindings, "a.count");
    let constant = resolve(&registry, &bindings, "com.acme.Config.VERSION");

    let mut heap = ObjectHeap::new();
    registry.install_statics(&mut heap).unwrap();
    let outer = registry
        .instantiate(&mut heap, &TypeName::new(CONFIG))
        .unwrap();
    let inner = registry
        .instantiate(&mut heap, &TypeName::new(CONFIG))
        .unwrap();
    let parent = FieldDescriptor::instance(CONFIG, "parent", TypeDescriptor::class(CONFIG));
    heap.set_field(outer, &parent, Value::Object(inner)).unwrap();

    let mut frame = Frame::new(&mut heap);
    frame.bind("a", Value::Object(outer));

    let mut group = c.benchmark_group("field/interpret");
    group.bench_function("chain_read", |b| {
        b.iter(|| black_box(Interpreter::new(&mut frame).interpret(black_box(&read))))
    });
    group.bench_function("wide_write", |b| {
        b.iter(|| {
            black_box(
                Interpreter::new(&mut frame).interpret_assign(black_box(&write), Value::Long(7)),
            )
        })
    });
    group.bench_function("static_read", |b| {
        b.iter(|| black_box(Interpreter::new(&mut frame).interpret(black_box(&constant))))
    });
    group.finish();
}

fn emit_benchmarks(c: &mut Criterion) {
    let registry = registry();
    let bindings = bindings(&registry);
    let read = resolve(&registry, &bindings, "a.parent.limit");
    let write = resolve(&registry, &bindings, "a.count");

    let mut group = c.benchmark_group("field/emit");
    group.bench_function("chain_read", |b| {
        b.iter(|| {
            let mut constants = ConstantPool::new();
            let mut emitter = BytecodeEmitter::new(&mut constants);
            ExprCodegen::new(&mut emitter).compile(black_box(&read)).unwrap();
            black_box(emitter.finish())
        })
    });
    group.bench_function("wide_write", |b| {
        b.iter(|| {
            let mut constants = ConstantPool::new();
            let mut emitter = BytecodeEmitter::new(&mut constants);
            emitter.emit_long(7).unwrap();
            ExprCodegen::new(&mut emitter)
                .compile_assign(black_box(&write))
                .unwrap();
            black_box(emitter.finish())
        })
    });
    group.finish();
}

criterion_group!(benches, resolution_benchmarks, interpret_benchmarks, emit_benchmarks);
criterion_main!(benches);
