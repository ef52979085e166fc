//! Render graph benchmarks.
//!
//! Measures editor construction, topological sorting and full compilation
//! on the dummy device.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench -p nebula-graph
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nebula_graph::editor::algorithm;
use nebula_graph::{
    CompilerConfig, CompilerType, DummyDevice, EditorGraph, GraphContext, GraphContextDescriptor,
    GraphPreset, NodeType, Scene,
};

/// Length of the blur chain in the long-chain benchmarks.
const CHAIN_LENGTH: usize = 64;

/// Scene provider and ray tracing followed by `length` blur passes.
fn blur_chain(length: usize) -> EditorGraph {
    let mut graph = EditorGraph::new();
    let scene = graph.add_node(NodeType::SceneProvider).unwrap();
    let rt = graph.add_node(NodeType::RayTracing).unwrap();
    for slot in ["Objects", "Camera", "TLAS"] {
        graph.connect(scene, slot, rt, slot).unwrap();
    }

    let mut previous = (rt, "Output");
    for _ in 0..length {
        let blur = graph.add_node(NodeType::GaussianBlur).unwrap();
        graph.connect(previous.0, previous.1, blur, "Blur Input").unwrap();
        previous = (blur, "Blur Output");
    }
    let present = graph.add_node(NodeType::Present).unwrap();
    graph.connect(previous.0, previous.1, present, "Final Image").unwrap();
    graph
}

fn context() -> GraphContext {
    let context = GraphContext::new(Arc::new(DummyDevice::new()), GraphContextDescriptor::default()).unwrap();
    context.set_scene(Arc::new(Scene::demo()));
    context
}

// ----------------------------------------------------------------------------
// Editor
// ----------------------------------------------------------------------------

fn bench_editor(c: &mut Criterion) {
    c.bench_function("editor_default_nodes", |b| {
        b.iter(|| black_box(EditorGraph::with_default_nodes()))
    });

    c.bench_function("editor_deferred_preset", |b| {
        b.iter(|| black_box(GraphPreset::Deferred.build().unwrap()))
    });

    c.bench_function("editor_blur_chain", |b| b.iter(|| black_box(blur_chain(CHAIN_LENGTH))));
}

// ----------------------------------------------------------------------------
// Sorting
// ----------------------------------------------------------------------------

fn bench_sort(c: &mut Criterion) {
    let graph = blur_chain(CHAIN_LENGTH);
    let nodes: BTreeSet<_> = graph.node_ids();

    c.bench_function("topological_sort_blur_chain", |b| {
        b.iter(|| black_box(algorithm::topological_sort(black_box(&nodes), graph.edges()).unwrap()))
    });

    let root = graph.find_node(NodeType::SceneProvider).unwrap();
    c.bench_function("breadth_first_blur_chain", |b| {
        b.iter(|| black_box(algorithm::breadth_first(black_box(root), graph.edges())))
    });
}

// ----------------------------------------------------------------------------
// Compilation
// ----------------------------------------------------------------------------

fn bench_compile(c: &mut Criterion) {
    let context = context();
    let deferred = GraphPreset::Deferred.build().unwrap();
    let chain = blur_chain(CHAIN_LENGTH);

    for kind in [CompilerType::Naive, CompilerType::Optimized] {
        let strategy = CompilerConfig::new(kind).create_strategy();

        c.bench_function(&format!("compile_deferred_{kind}"), |b| {
            b.iter(|| black_box(strategy.compile(&deferred, &context)))
        });

        c.bench_function(&format!("compile_blur_chain_{kind}"), |b| {
            b.iter(|| black_box(strategy.compile(&chain, &context)))
        });
    }
}

criterion_group!(benches, bench_editor, bench_sort, bench_compile);
criterion_main!(benches);
