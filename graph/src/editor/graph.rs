use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ConnectError, GraphError, GraphResult};
use crate::id::{EdgeId, IdGenerator, NodeId};
use crate::node::{NodeFactory, NodeOptions, NodeType};
use crate::resource::{ResourceDescription, ResourceRole, ResourceType};

use super::{algorithm, Edge, EdgePoint, EditorNode};

/// Node types every fresh editor starts with.
const DEFAULT_NODES: [NodeType; 3] = [
    NodeType::SceneProvider,
    NodeType::Present,
    NodeType::GBufferPass,
];

/// Mutable graph of nodes and edges edited before compilation.
///
/// Adjacency and in-degree maps are kept in step with the edge list on every
/// insertion and removal. The sort does not read them; it recomputes
/// in-degree from the edges.
#[derive(Debug, Clone, Default)]
pub struct EditorGraph {
    ids: IdGenerator,
    nodes: BTreeMap<NodeId, EditorNode>,
    edges: Vec<Edge>,
    adjacency: BTreeMap<NodeId, Vec<NodeId>>,
    in_degree: BTreeMap<NodeId, usize>,
    messages: Vec<String>,
}

impl EditorGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph holding a scene provider, a present node and a G-buffer pass.
    pub fn with_default_nodes() -> Self {
        let mut graph = Self::new();
        graph.add_default_nodes();
        graph
    }

    /// Drop every node and edge and add the default nodes again.
    ///
    /// Ids keep counting from where they were, so ids handed out before the
    /// reset never name a node created after it.
    pub fn reset(&mut self) {
        let ids = std::mem::take(&mut self.ids);
        *self = Self::new();
        self.ids = ids;
        self.add_default_nodes();
        self.info("Graph reset".to_string());
    }

    fn add_default_nodes(&mut self) {
        for node_type in DEFAULT_NODES {
            let node = EditorNode::materialize(node_type, &mut self.ids);
            self.insert_node(node);
        }
    }

    fn insert_node(&mut self, node: EditorNode) -> NodeId {
        let id = node.id;
        self.info(format!("Adding node {}", node.label()));
        self.adjacency.insert(id, Vec::new());
        self.in_degree.insert(id, 0);
        self.nodes.insert(id, node);
        id
    }

    fn info(&mut self, message: String) {
        log::debug!("{}", message);
        self.messages.push(format!("[Info] {message}"));
    }

    fn error(&mut self, message: String) {
        log::warn!("{}", message);
        self.messages.push(format!("[Error] {message}"));
    }

    /// Add a node of `node_type`.
    pub fn add_node(&mut self, node_type: NodeType) -> GraphResult<NodeId> {
        let node = NodeFactory::create_editor(node_type, &mut self.ids)?;
        Ok(self.insert_node(node))
    }

    /// Remove a node together with every edge touching it.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<EditorNode> {
        if !self.nodes.contains_key(&id) {
            return Err(GraphError::UnknownNode(id));
        }
        let incident: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|e| e.from.node == id || e.to.node == id)
            .map(|e| e.id)
            .collect();
        for edge in incident {
            self.disconnect(edge)?;
        }

        self.adjacency.remove(&id);
        self.in_degree.remove(&id);
        let node = self.nodes.remove(&id).ok_or(GraphError::UnknownNode(id))?;
        self.info(format!("Removing node {}", node.label()));
        Ok(node)
    }

    pub fn node(&self, id: NodeId) -> Option<&EditorNode> {
        self.nodes.get(&id)
    }

    /// Replace the options of a node.
    ///
    /// The options must be of the kind the node type carries.
    pub fn set_options(&mut self, id: NodeId, options: NodeOptions) -> GraphResult<()> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::UnknownNode(id))?;
        let expected = NodeOptions::for_type(node.node_type);
        if std::mem::discriminant(&expected) != std::mem::discriminant(&options) {
            return Err(GraphError::OptionsMismatch {
                node: id,
                node_type: node.node_type,
            });
        }
        node.options = options;
        let label = node.label();
        self.info(format!("Updated options of {label}"));
        Ok(())
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &EditorNode> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> BTreeSet<NodeId> {
        self.nodes.keys().copied().collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// First node of `node_type` in id order.
    pub fn find_node(&self, node_type: NodeType) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|node| node.node_type == node_type)
            .map(|node| node.id)
    }

    /// Downstream nodes of `id`, one entry per edge.
    pub fn adjacency(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Number of edges ending at `id`.
    pub fn in_degree(&self, id: NodeId) -> usize {
        self.in_degree.get(&id).copied().unwrap_or(0)
    }

    /// Editor action log, `[Info]` and `[Error]` prefixed.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    fn endpoint(&self, node: NodeId, resource: &str) -> Option<(&EditorNode, &ResourceDescription)> {
        let editor = self.nodes.get(&node)?;
        Some((editor, editor.resource(resource)?))
    }

    fn point_label(&self, point: &EdgePoint) -> String {
        let node = self
            .nodes
            .get(&point.node)
            .map_or_else(|| point.node.to_string(), EditorNode::label);
        format!("{}.{}", node, point.name)
    }

    fn describe(node: &EditorNode, resource: &ResourceDescription) -> String {
        format!("{}.{}", node.label(), resource.name())
    }

    /// Connect two slots the way the interactive editor does.
    ///
    /// Endpoints given input-first are swapped. The connection is refused if
    /// the slots belong to the same node, are not one output and one input,
    /// are already connected, if the input already has a producer, or if
    /// their types differ.
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_resource: &str,
        to_node: NodeId,
        to_resource: &str,
    ) -> Result<EdgeId, ConnectError> {
        let result = self.check_connection(from_node, from_resource, to_node, to_resource);
        match result {
            Ok((from, to)) => {
                let edge = self.insert_edge(from, to);
                Ok(edge)
            }
            Err(err) => {
                self.error(format!("Cannot connect: {err}"));
                Err(err)
            }
        }
    }

    fn check_connection(
        &self,
        from_node: NodeId,
        from_resource: &str,
        to_node: NodeId,
        to_resource: &str,
    ) -> Result<(EdgePoint, EdgePoint), ConnectError> {
        let resolve = |node: NodeId, resource: &str| {
            if !self.nodes.contains_key(&node) {
                return Err(ConnectError::UnknownNode(node));
            }
            self.endpoint(node, resource)
                .ok_or_else(|| ConnectError::UnknownResource {
                    node,
                    resource: resource.to_string(),
                })
        };
        let mut from = resolve(from_node, from_resource)?;
        let mut to = resolve(to_node, to_resource)?;

        if from.1.role() == ResourceRole::Input && to.1.role() == ResourceRole::Output {
            std::mem::swap(&mut from, &mut to);
        }
        let (from_editor, from_desc) = from;
        let (to_editor, to_desc) = to;

        if from_editor.id == to_editor.id {
            return Err(ConnectError::SelfLoop(from_editor.id));
        }
        let from_name = Self::describe(from_editor, from_desc);
        let to_name = Self::describe(to_editor, to_desc);

        if from_desc.role() != ResourceRole::Output || to_desc.role() != ResourceRole::Input {
            return Err(ConnectError::InvalidDirection {
                from: from_name,
                to: to_name,
            });
        }
        if self
            .edges
            .iter()
            .any(|e| e.from.resource == from_desc.id && e.to.resource == to_desc.id)
        {
            return Err(ConnectError::AlreadyConnected {
                from: from_name,
                to: to_name,
            });
        }
        if to_desc.input_is_connected {
            return Err(ConnectError::InputAlreadyConnected(to_name));
        }
        if !to_desc.validate(from_desc) {
            return Err(ConnectError::Incompatible {
                from: from_name,
                to: to_name,
                from_type: from_desc.resource_type(),
                to_type: to_desc.resource_type(),
            });
        }

        Ok((
            EdgePoint {
                node: from_editor.id,
                resource: from_desc.id,
                name: from_desc.name(),
            },
            EdgePoint {
                node: to_editor.id,
                resource: to_desc.id,
                name: to_desc.name(),
            },
        ))
    }

    /// Add an edge with structural checks only.
    ///
    /// Both slots must exist on different nodes. Direction and type are
    /// left to the compiler, which lets programmatic builders describe
    /// graphs the interactive editor would refuse.
    pub fn link(
        &mut self,
        from_node: NodeId,
        from_resource: &str,
        to_node: NodeId,
        to_resource: &str,
    ) -> GraphResult<EdgeId> {
        let point = |node: NodeId, resource: &str| {
            let editor = self.nodes.get(&node).ok_or(GraphError::UnknownNode(node))?;
            let desc = editor
                .resource(resource)
                .ok_or_else(|| GraphError::UnknownResource {
                    node,
                    resource: resource.to_string(),
                })?;
            Ok::<_, GraphError>(EdgePoint {
                node,
                resource: desc.id,
                name: desc.name(),
            })
        };
        let from = point(from_node, from_resource)?;
        let to = point(to_node, to_resource)?;
        if from.node == to.node {
            return Err(GraphError::SelfLoop(from.node));
        }
        Ok(self.insert_edge(from, to))
    }

    fn insert_edge(&mut self, from: EdgePoint, to: EdgePoint) -> EdgeId {
        let id = self.ids.next_edge_id();
        let resource_type = self
            .nodes
            .get(&from.node)
            .and_then(|node| node.resource_by_id(from.resource))
            .map_or(ResourceType::Unknown, |desc| desc.resource_type());
        let message = format!(
            "Connecting: {} -> {}",
            self.point_label(&from),
            self.point_label(&to)
        );

        if let Some(desc) = self
            .nodes
            .get_mut(&to.node)
            .and_then(|node| node.resource_by_id_mut(to.resource))
        {
            if desc.role() == ResourceRole::Input {
                desc.input_is_connected = true;
            }
        }
        self.adjacency.entry(from.node).or_default().push(to.node);
        *self.in_degree.entry(to.node).or_default() += 1;
        self.edges.push(Edge {
            id,
            from,
            to,
            resource_type,
        });
        self.info(message);
        id
    }

    /// Remove an edge, reversing its bookkeeping.
    pub fn disconnect(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or(GraphError::UnknownEdge(id))?;
        let edge = self.edges.remove(index);

        if let Some(successors) = self.adjacency.get_mut(&edge.from.node) {
            if let Some(pos) = successors.iter().position(|&n| n == edge.to.node) {
                successors.remove(pos);
            }
        }
        if let Some(degree) = self.in_degree.get_mut(&edge.to.node) {
            *degree = degree.saturating_sub(1);
        }
        let still_fed = self.edges.iter().any(|e| e.to.resource == edge.to.resource);
        if let Some(desc) = self
            .nodes
            .get_mut(&edge.to.node)
            .and_then(|node| node.resource_by_id_mut(edge.to.resource))
        {
            desc.input_is_connected = still_fed;
        }

        self.info(format!(
            "Disconnecting: {} -> {}",
            self.point_label(&edge.from),
            self.point_label(&edge.to)
        ));
        Ok(edge)
    }

    /// Nodes reachable from `root`, root included. Empty if `root` is not in the graph.
    pub fn reachable_from(&self, root: NodeId) -> BTreeSet<NodeId> {
        if !self.nodes.contains_key(&root) {
            return BTreeSet::new();
        }
        algorithm::breadth_first(root, &self.edges)
    }

    /// Topological order of every node in the graph.
    pub fn topological_sort(&self) -> GraphResult<Vec<NodeId>> {
        algorithm::topological_sort(&self.node_ids(), &self.edges)
    }
}
