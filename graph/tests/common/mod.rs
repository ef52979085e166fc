//! Common utilities for render graph integration tests.
//!
//! Every test gets its own dummy device and context so allocation counts
//! never leak between cases.

#![allow(dead_code)]

use std::sync::Arc;

use nebula_graph::{
    CompileResult, CompilerConfig, CompilerType, DummyDevice, EditorGraph, GraphContext,
    GraphContextDescriptor, NodeId, NodeType, Scene,
};

/// Initialize logging once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Context
// ============================================================================

/// A dummy device and a context on top of it.
pub struct TestContext {
    pub device: Arc<DummyDevice>,
    pub context: Arc<GraphContext>,
}

impl TestContext {
    /// Context with the demo scene set.
    pub fn new() -> Self {
        let context = Self::without_scene();
        context.context.set_scene(Arc::new(Scene::demo()));
        context
    }

    /// Context with no scene; compiling a scene provider fails against it.
    pub fn without_scene() -> Self {
        init_logging();
        let device = Arc::new(DummyDevice::new());
        let descriptor = GraphContextDescriptor::default()
            .with_render_resolution(nebula_graph::Extent2d::new(320, 180))
            .with_target_resolution(nebula_graph::Extent2d::new(640, 360));
        let context = GraphContext::new(device.clone(), descriptor).expect("dummy context");
        Self {
            device,
            context: Arc::new(context),
        }
    }

    /// Compile `graph` with a fresh strategy of `kind`.
    pub fn compile(&self, graph: &EditorGraph, kind: CompilerType) -> CompileResult {
        CompilerConfig::new(kind)
            .with_verbose(true)
            .create_strategy()
            .compile(graph, &self.context)
    }
}

// ============================================================================
// Graph Builders
// ============================================================================

/// Node ids of the ray tracing chain.
pub struct RayTracingChain {
    pub scene: NodeId,
    pub rt: NodeId,
    pub present: NodeId,
}

/// Add `SceneProvider -> RayTracing -> Present` to `graph`.
pub fn ray_tracing_chain(graph: &mut EditorGraph) -> RayTracingChain {
    let scene = graph.add_node(NodeType::SceneProvider).unwrap();
    let rt = graph.add_node(NodeType::RayTracing).unwrap();
    let present = graph.add_node(NodeType::Present).unwrap();
    for slot in ["Objects", "Camera", "TLAS"] {
        graph.connect(scene, slot, rt, slot).unwrap();
    }
    graph.connect(rt, "Output", present, "Final Image").unwrap();
    RayTracingChain { scene, rt, present }
}

/// Position of every node of `order`, for edge direction checks.
pub fn positions(order: &[NodeId]) -> std::collections::HashMap<NodeId, usize> {
    order.iter().enumerate().map(|(i, &id)| (id, i)).collect()
}
