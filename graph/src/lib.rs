//! # Nebula Render Graph
//!
//! A node-based render graph: passes and the resources they exchange are
//! wired together in an editor graph, compiled into a [`RenderPath`] and
//! executed once per frame.
//!
//! ## Architecture
//!
//! ```text
//! EditorGraph ──compile──► RenderPath ──execute(frame)──► CommandBuffer
//!     │                        │
//!  NodeType + slots       Box<dyn Node> in topological order
//!                         + bound resources
//! ```
//!
//! - [`resource`]: resource types, slot specifications and bound resources
//! - [`node`]: the [`Node`] trait, node types, passes and the [`NodeFactory`]
//! - [`editor`]: the editor graph, BFS and topological sort, [`GraphEditor`]
//! - [`compiler`]: compile strategies and the resource optimizer
//! - [`backend`]: the GPU boundary and a dummy device
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use nebula_graph::*;
//!
//! let device = Arc::new(DummyDevice::new());
//! let context = GraphContext::new(device, GraphContextDescriptor::default()).unwrap();
//! context.set_scene(Arc::new(Scene::demo()));
//!
//! let mut graph = EditorGraph::new();
//! let scene = graph.add_node(NodeType::SceneProvider).unwrap();
//! let rt = graph.add_node(NodeType::RayTracing).unwrap();
//! let present = graph.add_node(NodeType::Present).unwrap();
//! for slot in ["Objects", "Camera", "TLAS"] {
//!     graph.connect(scene, slot, rt, slot).unwrap();
//! }
//! graph.connect(rt, "Output", present, "Final Image").unwrap();
//!
//! let result = DefaultCompileStrategy::default().compile(&graph, &context);
//! assert!(result.success);
//!
//! let mut path = result.render_path.unwrap();
//! path.execute(&mut FrameContext::new(0, 2)).unwrap();
//! ```

pub mod backend;
pub mod compiler;
pub mod context;
pub mod editor;
pub mod error;
pub mod id;
pub mod node;
pub mod profiling;
pub mod render_path;
pub mod resource;
pub mod scene;
pub mod types;

pub use backend::{CommandBuffer, DummyDevice, FrameContext, GpuDevice, Swapchain};
pub use compiler::{
    CompileResult, CompileState, CompilerConfig, CompilerType, DefaultCompileStrategy, GraphCompileStrategy,
    OptimizedCompileStrategy, ResourceOptimizer,
};
pub use context::{GraphContext, GraphContextDescriptor};
pub use editor::{Edge, EditorGraph, EditorNode, GraphEditor, GraphPreset};
pub use error::{BackendError, ConnectError, GraphError, NodeError, RenderPathError};
pub use id::{EdgeId, IdGenerator, NodeId, ResourceId};
pub use node::{Node, NodeFactory, NodeOptions, NodeType};
pub use render_path::RenderPath;
pub use resource::{Resource, ResourceDescription, ResourceKind, ResourceRole, ResourceSpecification, ResourceType};
pub use scene::{Camera, Scene};
pub use types::Extent2d;
