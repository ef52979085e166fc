//! Stages shared by every compile strategy.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use crate::context::GraphContext;
use crate::editor::{algorithm, Edge, EditorGraph, EditorNode};
use crate::error::{GraphError, GraphResult};
use crate::id::{NodeId, ResourceId};
use crate::node::{Node, NodeFactory, NodeType};
use crate::render_path::RenderPath;
use crate::resource::{Resource, ResourceDescription, ResourceKind, ResourceRole, ResourceType};
use crate::types::{BufferDescriptor, BufferUsage};
use crate::{profile_function, profile_scope};

use super::{CompileResult, CompileState};

/// Output slot of a compiled node that receives a bound resource.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSlot {
    pub node: NodeId,
    pub node_label: String,
    pub description: ResourceDescription,
    /// Key of the slot in the render path's resource map.
    pub key: String,
    /// Position of the producer in the execution order.
    pub first_use: usize,
    /// Position of the last consumer, or of the producer if there is none.
    pub last_use: usize,
}

impl OutputSlot {
    pub fn resource_type(&self) -> ResourceType {
        self.description.resource_type()
    }
}

/// Groups of output slot indices; each group shares one resource.
pub(crate) type ResourcePlan = Vec<Vec<usize>>;

/// Log and stage bookkeeping of one compilation.
pub(crate) struct CompileSession {
    strategy: &'static str,
    verbose: bool,
    logs: Vec<String>,
    stage: CompileState,
    started: Instant,
}

impl CompileSession {
    pub fn new(strategy: &'static str, verbose: bool) -> Self {
        Self {
            strategy,
            verbose,
            logs: Vec::new(),
            stage: CompileState::Uncompiled,
            started: Instant::now(),
        }
    }

    pub fn enter(&mut self, stage: CompileState) {
        log::debug!("[{}] {:?} -> {:?}", self.strategy, self.stage, stage);
        self.stage = stage;
    }

    pub fn info(&mut self, message: String) {
        log::info!("{}", message);
        self.logs.push(format!("[Info] {message}"));
    }

    pub fn verbose(&mut self, message: String) {
        log::debug!("{}", message);
        if self.verbose {
            self.logs.push(format!("[Verbose] {message}"));
        }
    }

    fn error(&mut self, message: String) {
        log::error!("{}", message);
        self.logs.push(format!("[Error] {message}"));
    }

    pub fn finish(mut self, outcome: GraphResult<(Vec<NodeId>, RenderPath)>) -> CompileResult {
        let compile_time = self.started.elapsed();
        match outcome {
            Ok((order, path)) => {
                self.enter(CompileState::Ready);
                self.info(format!(
                    "Compilation finished in {:.3}ms",
                    compile_time.as_secs_f64() * 1000.0
                ));
                CompileResult {
                    success: true,
                    failure_message: String::new(),
                    logs: self.logs,
                    stage: CompileState::Ready,
                    failed_stage: None,
                    error: None,
                    compile_time,
                    order,
                    render_path: Some(path),
                }
            }
            Err(err) => {
                let failed_stage = self.stage;
                self.enter(CompileState::Failed);
                self.error(err.to_string());
                CompileResult {
                    success: false,
                    failure_message: err.to_string(),
                    logs: self.logs,
                    stage: CompileState::Failed,
                    failed_stage: Some(failed_stage),
                    error: Some(err),
                    compile_time,
                    order: Vec::new(),
                    render_path: None,
                }
            }
        }
    }
}

fn node<'g>(graph: &'g EditorGraph, id: NodeId) -> GraphResult<&'g EditorNode> {
    graph.node(id).ok_or(GraphError::UnknownNode(id))
}

fn slot<'g>(node: &'g EditorNode, id: ResourceId, name: &str) -> GraphResult<&'g ResourceDescription> {
    node.resource_by_id(id).ok_or_else(|| GraphError::UnknownResource {
        node: node.id,
        resource: name.to_string(),
    })
}

/// Check every edge of the graph, reachable or not.
fn validate_edges(graph: &EditorGraph) -> GraphResult<()> {
    let mut producers: BTreeMap<ResourceId, usize> = BTreeMap::new();
    for edge in graph.edges() {
        let from_node = node(graph, edge.from.node)?;
        let to_node = node(graph, edge.to.node)?;
        let from = slot(from_node, edge.from.resource, edge.from.name)?;
        let to = slot(to_node, edge.to.resource, edge.to.name)?;
        let from_name = format!("{}.{}", from_node.label(), from.name());
        let to_name = format!("{}.{}", to_node.label(), to.name());

        if from_node.id == to_node.id {
            return Err(GraphError::SelfLoop(from_node.id));
        }
        if from.role() != ResourceRole::Output || to.role() != ResourceRole::Input {
            return Err(GraphError::InvalidDirection {
                edge: edge.id,
                from: from_name,
                to: to_name,
            });
        }
        if !to.validate(from) {
            return Err(GraphError::TypeMismatch {
                from: from_name,
                to: to_name,
                expected: to.resource_type(),
                found: from.resource_type(),
            });
        }
        let count = producers.entry(to.id).or_default();
        *count += 1;
        if *count > 1 {
            return Err(GraphError::DuplicateProducer {
                node: to_node.label(),
                resource: to.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Every required input of a compiled node must be fed by a compiled producer.
fn check_inputs(graph: &EditorGraph, order: &[NodeId], edges: &[Edge], session: &mut CompileSession) -> GraphResult<()> {
    for &id in order {
        let editor = node(graph, id)?;
        for input in editor.inputs() {
            if edges.iter().any(|e| e.to.resource == input.id) {
                continue;
            }
            if input.spec.optional {
                session.verbose(format!("{}: optional input '{}' left unconnected", editor.label(), input.name()));
                continue;
            }
            return Err(GraphError::MissingInput {
                node: editor.label(),
                resource: input.name().to_string(),
            });
        }
    }
    Ok(())
}

fn collect_outputs(graph: &EditorGraph, order: &[NodeId], edges: &[Edge]) -> GraphResult<Vec<OutputSlot>> {
    let position: BTreeMap<NodeId, usize> = order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
    let mut slots = Vec::new();
    for (first_use, &id) in order.iter().enumerate() {
        let editor = node(graph, id)?;
        for output in editor.outputs() {
            let last_use = edges
                .iter()
                .filter(|e| e.from.resource == output.id)
                .filter_map(|e| position.get(&e.to.node).copied())
                .fold(first_use, usize::max);
            slots.push(OutputSlot {
                node: id,
                node_label: editor.label(),
                description: output.clone(),
                key: output.resource_key(),
                first_use,
                last_use,
            });
        }
    }
    Ok(slots)
}

fn create_kind(context: &GraphContext, slot: &OutputSlot) -> GraphResult<ResourceKind> {
    let spec = &slot.description.spec;
    let device = context.device();
    let render_extent = context.render_resolution();
    let scene = || context.scene().ok_or(GraphError::MissingScene);

    let kind = match spec.resource_type {
        ResourceType::Image => ResourceKind::Image(device.create_image(&spec.image_descriptor(&slot.key, render_extent))?),
        ResourceType::DepthImage => {
            ResourceKind::DepthImage(device.create_image(&spec.image_descriptor(&slot.key, render_extent))?)
        }
        ResourceType::ImageArray => ResourceKind::ImageArray(
            (0..spec.array_layers)
                .map(|layer| device.create_image(&spec.image_descriptor(format!("{}[{}]", slot.key, layer), render_extent)))
                .collect::<Result<_, _>>()?,
        ),
        ResourceType::Buffer => ResourceKind::Buffer(device.create_buffer(
            &BufferDescriptor::new(spec.buffer_size, BufferUsage::STORAGE | BufferUsage::COPY_DST).with_label(&slot.key),
        )?),
        ResourceType::Camera => ResourceKind::Camera(scene()?.camera().clone()),
        ResourceType::Objects => ResourceKind::Objects(scene()?.objects().clone()),
        ResourceType::Tlas => ResourceKind::Tlas(scene()?.tlas().clone()),
        ResourceType::Scene => ResourceKind::Scene(scene()?),
        ResourceType::Unknown => {
            return Err(GraphError::UnsupportedResourceType {
                resource: slot.key.clone(),
                resource_type: spec.resource_type,
            })
        }
    };
    Ok(kind)
}

/// Resources by key, and by the output slot that produces them.
type CreatedResources = (BTreeMap<String, Arc<Resource>>, BTreeMap<ResourceId, Arc<Resource>>);

fn create_resources(
    context: &GraphContext,
    slots: &[OutputSlot],
    plan: &ResourcePlan,
    session: &mut CompileSession,
) -> GraphResult<CreatedResources> {
    profile_scope!("create_resources");
    let mut by_key = BTreeMap::new();
    let mut by_slot = BTreeMap::new();

    for group in plan {
        let Some(first) = group.first().map(|&i| &slots[i]) else {
            continue;
        };
        let resource = Arc::new(Resource::new(first.key.clone(), create_kind(context, first)?));
        session.verbose(format!("Created {} '{}'", resource.resource_type(), resource.name()));

        for &index in group {
            let slot = &slots[index];
            if by_key.insert(slot.key.clone(), resource.clone()).is_some() {
                return Err(GraphError::DuplicateResource(slot.key.clone()));
            }
            if slot.key != first.key {
                session.verbose(format!("'{}' aliases '{}'", slot.key, first.key));
            }
            by_slot.insert(slot.description.id, resource.clone());
        }
    }
    Ok((by_key, by_slot))
}

/// Run every stage, creating resources according to `plan`.
pub(crate) fn run(
    graph: &EditorGraph,
    context: &GraphContext,
    session: &mut CompileSession,
    plan: impl FnOnce(&[OutputSlot], &mut CompileSession) -> ResourcePlan,
) -> GraphResult<(Vec<NodeId>, RenderPath)> {
    profile_function!();

    session.enter(CompileState::Validating);
    validate_edges(graph)?;
    if graph.is_empty() {
        session.info("Graph is empty, nothing to compile".to_string());
        session.enter(CompileState::Built);
        return Ok((Vec::new(), RenderPath::new(Vec::new(), BTreeMap::new())));
    }
    let root = graph
        .find_node(NodeType::SceneProvider)
        .ok_or(GraphError::MissingSceneProvider)?;
    let providers = graph
        .nodes()
        .filter(|node| node.node_type() == NodeType::SceneProvider)
        .count();
    let root_label = node(graph, root)?.label();
    if providers > 1 {
        session.info(format!(
            "Compiling from scene provider {root_label}, the lowest id of {providers} scene providers"
        ));
    } else {
        session.info(format!("Compiling from scene provider {root_label}"));
    }
    let reachable = graph.reachable_from(root);
    let culled = graph.node_count() - reachable.len();
    if culled > 0 {
        session.info(format!("Culled {culled} node(s) unreachable from the scene provider"));
    }

    session.enter(CompileState::Sorting);
    let started = Instant::now();
    let order = {
        profile_scope!("topological_sort");
        algorithm::topological_sort(&reachable, graph.edges())?
    };
    let labels: Vec<String> = order
        .iter()
        .filter_map(|&id| graph.node(id).map(EditorNode::label))
        .collect();
    session.info(format!(
        "Generated topological ordering ({:.3}ms): [{}]",
        started.elapsed().as_secs_f64() * 1000.0,
        labels.join(", ")
    ));
    session.enter(CompileState::Sorted);

    let edges = compiled_edges(graph, &reachable);
    check_inputs(graph, &order, &edges, session)?;
    let slots = collect_outputs(graph, &order, &edges)?;
    let plan = plan(&slots, session);
    let (resources, by_slot) = create_resources(context, &slots, &plan, session)?;

    let factory = NodeFactory::new(context);
    let mut nodes: BTreeMap<NodeId, Box<dyn Node>> = BTreeMap::new();
    for &id in &order {
        nodes.insert(id, factory.create(node(graph, id)?)?);
    }

    for slot in &slots {
        let resource = produced(&by_slot, slot.description.id, &slot.node_label, slot.description.name())?;
        bind(&mut nodes, slot.node, slot.description.name(), resource, &slot.node_label)?;
    }
    for edge in &edges {
        let consumer = node(graph, edge.to.node)?.label();
        let resource = produced(&by_slot, edge.from.resource, &consumer, edge.to.name)?;
        bind(&mut nodes, edge.to.node, edge.to.name, resource, &consumer)?;
        session.verbose(format!("Bound {}.{} to '{}'", consumer, edge.to.name, resource.name()));
    }
    session.enter(CompileState::Built);

    let entries = order
        .iter()
        .filter_map(|id| nodes.remove(id).map(|node| (*id, node)))
        .collect();
    Ok((order, RenderPath::new(entries, resources)))
}

/// Edges whose both endpoints are compiled, in insertion order.
fn compiled_edges(graph: &EditorGraph, reachable: &BTreeSet<NodeId>) -> Vec<Edge> {
    graph
        .edges()
        .iter()
        .filter(|e| reachable.contains(&e.from.node) && reachable.contains(&e.to.node))
        .copied()
        .collect()
}

fn produced<'r>(
    by_slot: &'r BTreeMap<ResourceId, Arc<Resource>>,
    output: ResourceId,
    node: &str,
    name: &str,
) -> GraphResult<&'r Arc<Resource>> {
    by_slot.get(&output).ok_or_else(|| GraphError::MissingInput {
        node: node.to_string(),
        resource: name.to_string(),
    })
}

fn bind(
    nodes: &mut BTreeMap<NodeId, Box<dyn Node>>,
    id: NodeId,
    key: &str,
    resource: &Arc<Resource>,
    label: &str,
) -> GraphResult<()> {
    let node = nodes.get_mut(&id).ok_or(GraphError::UnknownNode(id))?;
    let expected = node
        .node_type()
        .spec(key)
        .map_or(ResourceType::Unknown, |spec| spec.resource_type);
    if node.set_resource(key, resource.clone()) {
        Ok(())
    } else {
        Err(GraphError::TypeMismatch {
            from: resource.name().to_string(),
            to: format!("{label}.{key}"),
            expected,
            found: resource.resource_type(),
        })
    }
}

/// One resource per output slot.
pub(crate) fn unaliased_plan(slots: &[OutputSlot]) -> ResourcePlan {
    (0..slots.len()).map(|index| vec![index]).collect()
}
