//! The mutable editor graph and its controller.
//!
//! # Architecture
//!
//! The graph is an arena: nodes live in a map keyed by [`NodeId`] and edges
//! refer to their endpoints by id. Nodes never hold references to each
//! other, so adding and removing nodes needs no ownership bookkeeping.
//!
//! | Type | Role |
//! |------|------|
//! | [`EditorNode`] | Node type, slot descriptions and options |
//! | [`Edge`] | Output slot of one node feeding an input slot of another |
//! | [`EditorGraph`] | Arena, edge list, adjacency and in-degree maps |
//! | [`GraphEditor`] | Graph plus context; compiles and installs render paths |
//! | [`GraphPreset`] | Ready-made graphs for the host and benchmarks |
//!
//! # Example
//!
//! ```
//! use nebula_graph::{EditorGraph, NodeType};
//!
//! let mut graph = EditorGraph::new();
//! let scene = graph.add_node(NodeType::SceneProvider).unwrap();
//! let rt = graph.add_node(NodeType::RayTracing).unwrap();
//! let present = graph.add_node(NodeType::Present).unwrap();
//!
//! graph.connect(scene, "Objects", rt, "Objects").unwrap();
//! graph.connect(scene, "Camera", rt, "Camera").unwrap();
//! graph.connect(scene, "TLAS", rt, "TLAS").unwrap();
//! graph.connect(rt, "Output", present, "Final Image").unwrap();
//!
//! assert_eq!(graph.topological_sort().unwrap(), vec![scene, rt, present]);
//! ```

pub mod algorithm;
mod controller;
mod graph;
mod presets;

use crate::id::{EdgeId, IdGenerator, NodeId, ResourceId};
use crate::node::{NodeColor, NodeOptions, NodeType};
use crate::resource::{ResourceDescription, ResourceRole, ResourceType};

pub use controller::GraphEditor;
pub use graph::EditorGraph;
pub use presets::GraphPreset;

/// Editor-side node: slot layout and options, no GPU objects.
///
/// The type and slot list are fixed when the node is created. Outside the
/// crate a node is read through its getters; only its options can be
/// replaced, through [`EditorGraph::set_options`].
///
/// ```compile_fail
/// use nebula_graph::{EditorGraph, NodeType};
///
/// let mut graph = EditorGraph::new();
/// let rt = graph.add_node(NodeType::RayTracing).unwrap();
/// let node = graph.node_mut(rt).unwrap();
/// node.node_type = NodeType::Present;
/// ```
///
/// ```compile_fail
/// use nebula_graph::{EditorGraph, NodeType};
///
/// let mut graph = EditorGraph::new();
/// let rt = graph.add_node(NodeType::RayTracing).unwrap();
/// let mut node = graph.node(rt).unwrap().clone();
/// node.resources.truncate(1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EditorNode {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) node_type: NodeType,
    pub(crate) color: NodeColor,
    /// One description per declared slot, in declaration order.
    pub(crate) resources: Vec<ResourceDescription>,
    pub(crate) options: NodeOptions,
}

impl EditorNode {
    pub(crate) fn materialize(node_type: NodeType, ids: &mut IdGenerator) -> Self {
        let id = ids.next_node_id();
        let resources = node_type
            .resource_specs()
            .iter()
            .map(|spec| ResourceDescription::new(ids.next_resource_id(), *spec))
            .collect();
        Self {
            id,
            name: node_type.display_name().to_string(),
            node_type,
            color: node_type.color(),
            resources,
            options: NodeOptions::for_type(node_type),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn color(&self) -> NodeColor {
        self.color
    }

    /// Slot descriptions in declaration order.
    pub fn resources(&self) -> &[ResourceDescription] {
        &self.resources
    }

    pub fn options(&self) -> &NodeOptions {
        &self.options
    }

    /// Name qualified with the id, unique within a graph.
    pub fn label(&self) -> String {
        format!("{}#{}", self.name, self.id.raw())
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceDescription> {
        self.resources.iter().find(|r| r.name() == name)
    }

    pub fn resource_by_id(&self, id: ResourceId) -> Option<&ResourceDescription> {
        self.resources.iter().find(|r| r.id() == id)
    }

    pub(crate) fn resource_by_id_mut(&mut self, id: ResourceId) -> Option<&mut ResourceDescription> {
        self.resources.iter_mut().find(|r| r.id() == id)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &ResourceDescription> {
        self.resources.iter().filter(|r| r.role() == ResourceRole::Input)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &ResourceDescription> {
        self.resources.iter().filter(|r| r.role() == ResourceRole::Output)
    }
}

/// One end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgePoint {
    pub node: NodeId,
    pub resource: ResourceId,
    pub name: &'static str,
}

/// Directed connection from an output slot to an input slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub id: EdgeId,
    pub from: EdgePoint,
    pub to: EdgePoint,
    /// Type of the source slot when the edge was inserted.
    pub resource_type: ResourceType,
}
