//! Render graph compilation integration tests.
//!
//! Every test runs against the dummy device, so no GPU is needed.
//!
//! # Test Categories
//!
//! - **Scenarios**: the reference graphs (simple chain, cycles, type
//!   mismatches, partial reachability, empty graph)
//! - **Properties**: ordering, in-degree and idempotence checks over the presets
//! - **Resources**: aliasing done by the optimized strategy
//! - **Execution**: lazy initialization, poisoning, render path replacement
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nebula-graph --test compile_tests
//! ```

mod common;

use std::sync::Arc;

use common::{positions, ray_tracing_chain, TestContext};
use nebula_graph::backend::Command;
use nebula_graph::{
    CompileState, CompilerConfig, CompilerType, ConnectError, EditorGraph, FrameContext,
    GraphEditor, GraphError, GraphPreset, NodeType, RenderPathError, ResourceType,
};
use rstest::rstest;

// ============================================================================
// Scenarios
// ============================================================================

/// Scene provider feeding ray tracing feeding present compiles in that order.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_ray_tracing_chain(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let mut graph = EditorGraph::new();
    let chain = ray_tracing_chain(&mut graph);

    let result = ctx.compile(&graph, kind);
    assert!(result.success, "{}", result.failure_message);
    assert_eq!(result.stage, CompileState::Ready);
    assert_eq!(result.order, vec![chain.scene, chain.rt, chain.present]);
    assert!(result
        .logs
        .iter()
        .any(|line| line.starts_with("[Info] Generated topological ordering")));

    let path = result.render_path.unwrap();
    assert_eq!(path.order(), result.order);
    let labels: Vec<String> = result
        .order
        .iter()
        .map(|&id| graph.node(id).unwrap().label())
        .collect();
    assert_eq!(path.node_names(), labels);
}

/// A raw back edge makes the whole graph cyclic for the sort.
#[test]
fn test_back_edge_breaks_sort() {
    let mut graph = EditorGraph::new();
    let chain = ray_tracing_chain(&mut graph);
    graph
        .link(chain.present, "Final Image", chain.scene, "Objects")
        .unwrap();

    assert!(matches!(graph.topological_sort(), Err(GraphError::NotAcyclic)));
}

/// A type-compatible cycle reachable from the scene root fails while sorting.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_cycle_fails_compile(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let mut graph = EditorGraph::new();
    let scene = graph.add_node(NodeType::SceneProvider).unwrap();
    let gbuffer = graph.add_node(NodeType::GBufferPass).unwrap();
    let lighting = graph.add_node(NodeType::LightingPass).unwrap();
    let blur = graph.add_node(NodeType::GaussianBlur).unwrap();
    let present = graph.add_node(NodeType::Present).unwrap();

    graph.connect(scene, "Scene", gbuffer, "Scene Data").unwrap();
    for (from, to) in [
        ("Position", "Position"),
        ("Normal", "Normal"),
        ("Albedo", "Albedo"),
        ("Depth", "Depth Image"),
    ] {
        graph.connect(gbuffer, from, lighting, to).unwrap();
    }
    graph.connect(scene, "Camera", lighting, "Camera").unwrap();
    graph.connect(scene, "TLAS", lighting, "TLAS").unwrap();
    graph.connect(lighting, "Lighting Result", present, "Final Image").unwrap();
    graph.connect(lighting, "Lighting Result", blur, "Blur Input").unwrap();
    graph.connect(blur, "Blur Output", lighting, "AO Image").unwrap();

    let result = ctx.compile(&graph, kind);
    assert!(!result.success);
    assert_eq!(result.stage, CompileState::Failed);
    assert_eq!(result.failed_stage, Some(CompileState::Sorting));
    assert!(matches!(result.error, Some(GraphError::NotAcyclic)));
    assert_eq!(result.failure_message, "Given graph was not acyclic");
    assert!(result.render_path.is_none());
    assert!(result.logs.last().unwrap().starts_with("[Error]"));
}

/// Mismatched slot types are refused by the editor and by the compiler.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_type_mismatch(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let mut graph = EditorGraph::new();
    let scene = graph.add_node(NodeType::SceneProvider).unwrap();
    let present = graph.add_node(NodeType::Present).unwrap();

    let refused = graph.connect(scene, "Camera", present, "Final Image");
    assert!(matches!(
        refused,
        Err(ConnectError::Incompatible {
            from_type: ResourceType::Camera,
            to_type: ResourceType::Image,
            ..
        })
    ));
    assert!(graph.edges().is_empty());

    graph.link(scene, "Camera", present, "Final Image").unwrap();
    let result = ctx.compile(&graph, kind);
    assert!(!result.success);
    assert_eq!(result.failed_stage, Some(CompileState::Validating));
    assert!(matches!(
        result.error,
        Some(GraphError::TypeMismatch {
            expected: ResourceType::Image,
            found: ResourceType::Camera,
            ..
        })
    ));
}

/// Breadth-first reachability only follows outgoing edges.
#[test]
fn test_partial_reachability() {
    let mut graph = EditorGraph::new();
    let scene = graph.add_node(NodeType::SceneProvider).unwrap();
    let rt_a = graph.add_node(NodeType::RayTracing).unwrap();
    let rt_b = graph.add_node(NodeType::RayTracing).unwrap();
    let present_a = graph.add_node(NodeType::Present).unwrap();
    let present_b = graph.add_node(NodeType::Present).unwrap();
    for rt in [rt_a, rt_b] {
        for slot in ["Objects", "Camera", "TLAS"] {
            graph.connect(scene, slot, rt, slot).unwrap();
        }
    }
    graph.connect(rt_a, "Output", present_a, "Final Image").unwrap();
    graph.connect(rt_b, "Output", present_b, "Final Image").unwrap();

    assert_eq!(
        graph.reachable_from(rt_a).into_iter().collect::<Vec<_>>(),
        vec![rt_a, present_a]
    );
    assert_eq!(
        graph.reachable_from(rt_b).into_iter().collect::<Vec<_>>(),
        vec![rt_b, present_b]
    );
    assert_eq!(graph.reachable_from(scene).len(), 5);
}

/// An empty graph compiles to an empty render path.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_empty_graph(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let result = ctx.compile(&EditorGraph::new(), kind);

    assert!(result.success);
    assert!(result.order.is_empty());
    let mut path = result.render_path.unwrap();
    assert!(path.is_empty());

    let mut frame = FrameContext::new(0, 2);
    path.execute(&mut frame).unwrap();
    assert!(frame.cmd.is_empty());
}

// ============================================================================
// Failure Modes
// ============================================================================

/// A non-empty graph needs a scene provider to start from.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_missing_scene_provider(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let mut graph = EditorGraph::new();
    graph.add_node(NodeType::Present).unwrap();

    let result = ctx.compile(&graph, kind);
    assert!(matches!(result.error, Some(GraphError::MissingSceneProvider)));
    assert_eq!(result.failed_stage, Some(CompileState::Validating));
}

/// Scene resources cannot be created without a scene in the context.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_missing_scene(#[case] kind: CompilerType) {
    let ctx = TestContext::without_scene();
    let mut graph = EditorGraph::new();
    ray_tracing_chain(&mut graph);

    let result = ctx.compile(&graph, kind);
    assert!(matches!(result.error, Some(GraphError::MissingScene)));
    assert_eq!(result.failed_stage, Some(CompileState::Sorted));
}

/// A required input with no producer fails after sorting.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_missing_required_input(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let mut graph = EditorGraph::new();
    let scene = graph.add_node(NodeType::SceneProvider).unwrap();
    let rt = graph.add_node(NodeType::RayTracing).unwrap();
    graph.connect(scene, "Objects", rt, "Objects").unwrap();
    graph.connect(scene, "Camera", rt, "Camera").unwrap();

    let result = ctx.compile(&graph, kind);
    assert_eq!(result.failed_stage, Some(CompileState::Sorted));
    match result.error {
        Some(GraphError::MissingInput { node, resource }) => {
            assert_eq!(node, graph.node(rt).unwrap().label());
            assert_eq!(resource, "TLAS");
        }
        other => panic!("expected a missing input, got {other:?}"),
    }
}

/// Optional lighting inputs may stay unconnected.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_optional_inputs_may_be_unconnected(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let mut graph = GraphPreset::Deferred.build().unwrap();
    let edge = graph
        .edges()
        .iter()
        .find(|e| e.to.name == "AO Image")
        .map(|e| e.id)
        .unwrap();
    graph.disconnect(edge).unwrap();

    let result = ctx.compile(&graph, kind);
    assert!(result.success, "{}", result.failure_message);
    assert!(result
        .logs
        .iter()
        .any(|line| line.starts_with("[Verbose]") && line.contains("optional input 'AO Image'")));
}

/// Two producers on one input are rejected while validating.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_duplicate_producer(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let mut graph = EditorGraph::new();
    let chain = ray_tracing_chain(&mut graph);
    let second = graph.add_node(NodeType::RayTracing).unwrap();
    for slot in ["Objects", "Camera", "TLAS"] {
        graph.connect(chain.scene, slot, second, slot).unwrap();
    }
    assert!(matches!(
        graph.connect(second, "Output", chain.present, "Final Image"),
        Err(ConnectError::InputAlreadyConnected(_))
    ));
    graph
        .link(second, "Output", chain.present, "Final Image")
        .unwrap();

    let result = ctx.compile(&graph, kind);
    assert!(matches!(result.error, Some(GraphError::DuplicateProducer { .. })));
    assert_eq!(result.failed_stage, Some(CompileState::Validating));
}

/// Nodes the scene provider cannot reach are left out of the render path.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_unreachable_nodes_are_culled(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let mut graph = EditorGraph::new();
    let chain = ray_tracing_chain(&mut graph);
    let bloom = graph.add_node(NodeType::Bloom).unwrap();

    let result = ctx.compile(&graph, kind);
    assert!(result.success, "{}", result.failure_message);
    assert_eq!(result.order, vec![chain.scene, chain.rt, chain.present]);
    assert!(!result.order.contains(&bloom));
    assert!(result.logs.iter().any(|line| line.contains("Culled 1 node(s)")));
}

/// With several scene providers the lowest id is the root, and the log says so.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_lowest_scene_provider_is_root(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let mut graph = EditorGraph::new();
    let chain = ray_tracing_chain(&mut graph);
    let other = graph.add_node(NodeType::SceneProvider).unwrap();

    let result = ctx.compile(&graph, kind);
    assert!(result.success, "{}", result.failure_message);
    assert_eq!(result.order, vec![chain.scene, chain.rt, chain.present]);
    assert!(!result.order.contains(&other));

    let expected = format!(
        "[Info] Compiling from scene provider {}, the lowest id of 2 scene providers",
        graph.node(chain.scene).unwrap().label()
    );
    assert!(result.logs.contains(&expected), "{:?}", result.logs);
}

/// A single scene provider is named as the root too.
#[test]
fn test_root_is_logged() {
    let ctx = TestContext::new();
    let mut graph = EditorGraph::new();
    let chain = ray_tracing_chain(&mut graph);

    let result = ctx.compile(&graph, CompilerType::Naive);
    let expected = format!(
        "[Info] Compiling from scene provider {}",
        graph.node(chain.scene).unwrap().label()
    );
    assert!(result.logs.contains(&expected), "{:?}", result.logs);
}

// ============================================================================
// Properties
// ============================================================================

/// Every edge between compiled nodes points forward in the order.
#[rstest]
#[case::ray_tracing(GraphPreset::RayTracing)]
#[case::deferred(GraphPreset::Deferred)]
#[case::post_process(GraphPreset::PostProcess)]
fn test_order_is_topological(#[case] preset: GraphPreset) {
    let ctx = TestContext::new();
    let graph = preset.build().unwrap();

    for kind in [CompilerType::Naive, CompilerType::Optimized] {
        let result = ctx.compile(&graph, kind);
        assert!(result.success, "{preset}: {}", result.failure_message);
        assert_eq!(result.order.len(), graph.node_count());

        let position = positions(&result.order);
        for edge in graph.edges() {
            assert!(position[&edge.from.node] < position[&edge.to.node]);
        }
    }
}

/// Maintained in-degree equals the number of edges entering each node.
#[rstest]
#[case::ray_tracing(GraphPreset::RayTracing)]
#[case::deferred(GraphPreset::Deferred)]
#[case::post_process(GraphPreset::PostProcess)]
fn test_in_degree_consistency(#[case] preset: GraphPreset) {
    let mut graph = preset.build().unwrap();
    let check = |graph: &EditorGraph| {
        for node in graph.nodes() {
            let entering = graph.edges().iter().filter(|e| e.to.node == node.id()).count();
            assert_eq!(graph.in_degree(node.id()), entering, "{}", node.label());
        }
    };
    check(&graph);

    let first = graph.edges()[0].id;
    graph.disconnect(first).unwrap();
    check(&graph);

    let present = graph.find_node(NodeType::Present).unwrap();
    graph.remove_node(present).unwrap();
    check(&graph);
}

/// Every edge joins an output to an input of the same type.
#[rstest]
#[case::ray_tracing(GraphPreset::RayTracing)]
#[case::deferred(GraphPreset::Deferred)]
#[case::post_process(GraphPreset::PostProcess)]
fn test_edges_are_type_safe(#[case] preset: GraphPreset) {
    let graph = preset.build().unwrap();
    for edge in graph.edges() {
        let from = graph
            .node(edge.from.node)
            .and_then(|n| n.resource_by_id(edge.from.resource))
            .unwrap();
        let to = graph
            .node(edge.to.node)
            .and_then(|n| n.resource_by_id(edge.to.resource))
            .unwrap();
        assert_eq!(from.resource_type(), to.resource_type());
        assert_eq!(edge.resource_type, from.resource_type());
        assert!(to.is_connected());
    }
}

/// Compiling an unchanged graph twice gives the same order and resources.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_compile_is_idempotent(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let graph = GraphPreset::Deferred.build().unwrap();

    let first = ctx.compile(&graph, kind);
    let second = ctx.compile(&graph, kind);
    assert_eq!(first.order, second.order);

    let first = first.render_path.unwrap();
    let second = second.render_path.unwrap();
    assert_eq!(
        first.resources().keys().collect::<Vec<_>>(),
        second.resources().keys().collect::<Vec<_>>()
    );
    assert_eq!(first.unique_resource_count(), second.unique_resource_count());
}

// ============================================================================
// Resources
// ============================================================================

/// Bloom and blur outputs with disjoint lifetimes share one image.
#[test]
fn test_optimized_strategy_aliases_images() {
    let ctx = TestContext::new();
    let graph = GraphPreset::PostProcess.build().unwrap();
    let key = |node_type: NodeType, slot: &str| {
        let node = graph.node(graph.find_node(node_type).unwrap()).unwrap();
        node.resource(slot).unwrap().resource_key()
    };

    let images_before = ctx.device.image_count();
    let naive = ctx.compile(&graph, CompilerType::Naive).render_path.unwrap();
    let naive_images = ctx.device.image_count() - images_before;

    let images_before = ctx.device.image_count();
    let optimized = ctx
        .compile(&graph, CompilerType::Optimized)
        .render_path
        .unwrap();
    let optimized_images = ctx.device.image_count() - images_before;

    assert_eq!(naive_images, 4);
    assert_eq!(optimized_images, 3);
    assert_eq!(naive.unique_resource_count(), 8);
    assert_eq!(optimized.unique_resource_count(), 7);

    let rt_output = optimized.resource(&key(NodeType::RayTracing, "Output")).unwrap();
    let bloom_output = optimized.resource(&key(NodeType::Bloom, "Bloom Output")).unwrap();
    let blur_output = optimized.resource(&key(NodeType::GaussianBlur, "Blur Output")).unwrap();
    assert!(Arc::ptr_eq(rt_output, blur_output));
    assert!(!Arc::ptr_eq(rt_output, bloom_output));

    for slot in ["Objects", "Camera", "TLAS", "Scene"] {
        let resource = optimized.resource(&key(NodeType::SceneProvider, slot)).unwrap();
        let sharing = optimized
            .resources()
            .values()
            .filter(|other| Arc::ptr_eq(other, resource))
            .count();
        assert_eq!(sharing, 1, "{slot} must not be aliased");
    }
}

/// The optimized strategy reports its aliasing decisions.
#[test]
fn test_optimized_strategy_logs_timelines() {
    let ctx = TestContext::new();
    let graph = GraphPreset::PostProcess.build().unwrap();
    let result = ctx.compile(&graph, CompilerType::Optimized);

    assert!(result.logs.iter().any(|line| {
        line.starts_with("[Info] Resource optimisation: 8 outputs, 4 not optimisable, 7 resources")
    }));
    assert!(result
        .logs
        .iter()
        .any(|line| line.starts_with("[Verbose] Timeline")));
}

/// Compile logs and dumps land in the configured directory.
#[test]
fn test_log_dir_receives_dumps() {
    let ctx = TestContext::new();
    let dir = std::env::temp_dir().join(format!("nebula-graph-dumps-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let graph = GraphPreset::PostProcess.build().unwrap();
    let result = CompilerConfig::new(CompilerType::Optimized)
        .with_verbose(true)
        .with_log_dir(&dir)
        .create_strategy()
        .compile(&graph, &ctx.context);
    assert!(result.success);

    let log = std::fs::read_to_string(dir.join("optimized-compile.log")).unwrap();
    assert!(log.contains("[Info] Generated topological ordering"));
    assert!(dir.join("graph-state.txt").exists());
    assert!(dir.join("resource-timeline.txt").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

// ============================================================================
// Execution
// ============================================================================

/// Pipelines are created on the first frame only.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_lazy_initialization(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let graph = GraphPreset::Deferred.build().unwrap();
    let mut path = ctx.compile(&graph, kind).render_path.unwrap();
    assert!(!path.is_initialized());
    assert_eq!(ctx.device.pipeline_count(), 0);

    let mut frame = FrameContext::new(0, ctx.context.frames_in_flight());
    path.execute(&mut frame).unwrap();
    assert!(path.is_initialized());
    let pipelines = ctx.device.pipeline_count();
    assert!(pipelines > 0);

    for index in 1..4 {
        let mut frame = FrameContext::new(index, ctx.context.frames_in_flight());
        path.execute(&mut frame).unwrap();
        assert!(frame
            .cmd
            .commands()
            .iter()
            .any(|c| matches!(c, Command::CopyImage { .. })));
    }
    assert_eq!(ctx.device.pipeline_count(), pipelines);
}

/// A failed initialization poisons the render path.
#[test]
fn test_failed_initialization_poisons_path() {
    let ctx = TestContext::new();
    let graph = GraphPreset::RayTracing.build().unwrap();
    let mut path = ctx
        .compile(&graph, CompilerType::Naive)
        .render_path
        .unwrap();

    ctx.device.fail_pipeline_creation(true);
    let mut frame = FrameContext::new(0, 2);
    assert!(matches!(
        path.execute(&mut frame),
        Err(RenderPathError::Initialize { .. })
    ));
    assert!(path.is_poisoned());

    ctx.device.fail_pipeline_creation(false);
    let mut frame = FrameContext::new(1, 2);
    assert!(matches!(path.execute(&mut frame), Err(RenderPathError::Poisoned)));
}

/// A failed compile keeps the render path of the last good graph.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_failed_compile_keeps_render_path(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let graph = GraphPreset::RayTracing.build().unwrap();
    let mut editor = GraphEditor::with_graph(graph, ctx.context.clone(), CompilerConfig::new(kind));

    assert!(editor.compile().success);
    let order = ctx.context.render_path(|path| path.unwrap().order());
    assert_eq!(order.len(), 3);

    let scene = editor.graph().find_node(NodeType::SceneProvider).unwrap();
    let present = editor.graph().find_node(NodeType::Present).unwrap();
    editor
        .graph_mut()
        .link(scene, "Camera", present, "Final Image")
        .unwrap();
    let result = editor.compile();
    assert!(!result.success);

    assert_eq!(ctx.context.render_path(|path| path.unwrap().order()), order);
    let mut frame = FrameContext::new(0, 2);
    assert!(editor.render_frame(&mut frame).unwrap());
    assert!(!frame.cmd.is_empty());
}

/// An image allocation failure during compile is reported and keeps the
/// render path of the last good compile.
#[rstest]
#[case::naive(CompilerType::Naive)]
#[case::optimized(CompilerType::Optimized)]
fn test_allocation_failure_keeps_render_path(#[case] kind: CompilerType) {
    let ctx = TestContext::new();
    let graph = GraphPreset::RayTracing.build().unwrap();
    let mut editor = GraphEditor::with_graph(graph, ctx.context.clone(), CompilerConfig::new(kind));

    assert!(editor.compile().success);
    let order = ctx.context.render_path(|path| path.unwrap().order());
    let images = ctx.device.image_count();

    ctx.device.fail_image_creation(true);
    let result = editor.compile();
    assert!(!result.success);
    assert!(matches!(result.error, Some(GraphError::Backend(_))), "{:?}", result.error);
    assert_eq!(result.failed_stage, Some(CompileState::Sorted));
    assert!(result.failure_message.contains("allocation disabled"), "{}", result.failure_message);
    assert!(!result.failure_message.contains("Some("));
    assert!(result.render_path.is_none());
    assert_eq!(ctx.device.image_count(), images);

    assert_eq!(ctx.context.render_path(|path| path.unwrap().order()), order);
    let mut frame = FrameContext::new(0, 2);
    assert!(editor.render_frame(&mut frame).unwrap());
    assert!(!frame.cmd.is_empty());
}

/// Ids of the installed render path stay unique to it after a reset.
#[test]
fn test_reset_keeps_render_path_ids_distinct() {
    let ctx = TestContext::new();
    let mut editor = GraphEditor::with_graph(
        GraphPreset::RayTracing.build().unwrap(),
        ctx.context.clone(),
        CompilerConfig::default(),
    );
    assert!(editor.compile().success);
    let order = ctx.context.render_path(|path| path.unwrap().order());

    editor.reset();
    assert_eq!(editor.graph().node_count(), 3);
    assert!(order.iter().all(|&id| editor.graph().node(id).is_none()));
    assert!(editor.graph().nodes().all(|node| order.iter().all(|&id| node.id() > id)));
    assert!(ctx.context.has_render_path());
}

/// A successful compile replaces the installed render path.
#[test]
fn test_recompile_replaces_render_path() {
    let ctx = TestContext::new();
    let mut editor = GraphEditor::with_graph(
        GraphPreset::RayTracing.build().unwrap(),
        ctx.context.clone(),
        CompilerConfig::default(),
    );
    assert!(editor.compile().success);

    *editor.graph_mut() = GraphPreset::PostProcess.build().unwrap();
    editor.set_config(CompilerConfig::new(CompilerType::Optimized));
    assert!(editor.compile().success);
    assert_eq!(ctx.context.render_path(|path| path.unwrap().len()), 6);
}
