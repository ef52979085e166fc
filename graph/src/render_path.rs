//! The compiled, executable form of a graph.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::backend::{FrameContext, ImageLayout};
use crate::error::RenderPathError;
use crate::id::NodeId;
use crate::node::Node;
use crate::profile_scope;
use crate::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathState {
    Uninitialized,
    Ready,
    Poisoned,
}

/// Nodes in execution order plus the resources bound to them.
///
/// Construction is cheap: GPU objects owned by nodes are created on the first
/// [`execute`](Self::execute). The order and bindings are frozen; any graph
/// change means compiling a new render path.
pub struct RenderPath {
    nodes: Vec<(NodeId, Box<dyn Node>)>,
    resources: BTreeMap<String, Arc<Resource>>,
    state: PathState,
}

impl RenderPath {
    pub fn new(nodes: Vec<(NodeId, Box<dyn Node>)>, resources: BTreeMap<String, Arc<Resource>>) -> Self {
        Self {
            nodes,
            resources,
            state: PathState::Uninitialized,
        }
    }

    /// Node ids in execution order.
    pub fn order(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|(id, _)| *id).collect()
    }

    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|(_, node)| node.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bound resources by key (`"{slot}-{id}"`). Aliased keys share one resource.
    pub fn resources(&self) -> &BTreeMap<String, Arc<Resource>> {
        &self.resources
    }

    pub fn resource(&self, key: &str) -> Option<&Arc<Resource>> {
        self.resources.get(key)
    }

    /// Number of distinct resources behind the keys.
    pub fn unique_resource_count(&self) -> usize {
        self.resources
            .values()
            .map(Arc::as_ptr)
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn is_initialized(&self) -> bool {
        self.state == PathState::Ready
    }

    pub fn is_poisoned(&self) -> bool {
        self.state == PathState::Poisoned
    }

    /// Record one frame.
    ///
    /// The first call moves every image resource to the working layout and
    /// initializes the nodes in order. A failed initialization poisons the
    /// path and every later call returns [`RenderPathError::Poisoned`].
    pub fn execute(&mut self, frame: &mut FrameContext) -> Result<(), RenderPathError> {
        match self.state {
            PathState::Poisoned => return Err(RenderPathError::Poisoned),
            PathState::Uninitialized => self.initialize(frame)?,
            PathState::Ready => {}
        }

        for (_, node) in &mut self.nodes {
            profile_scope!("execute_node");
            node.execute(frame).map_err(|source| RenderPathError::Execute {
                node: node.name().to_string(),
                source,
            })?;
        }
        Ok(())
    }

    fn initialize(&mut self, frame: &mut FrameContext) -> Result<(), RenderPathError> {
        profile_scope!("initialize_render_path");
        let mut seen = HashSet::new();
        for resource in self.resources.values() {
            if !seen.insert(Arc::as_ptr(resource)) {
                continue;
            }
            for image in resource.working_images() {
                frame.cmd.image_barrier(image, ImageLayout::General);
            }
        }

        for (_, node) in &mut self.nodes {
            if let Err(source) = node.initialize() {
                self.state = PathState::Poisoned;
                log::error!("Failed to initialize {}: {}", node.name(), source);
                return Err(RenderPathError::Initialize {
                    node: node.name().to_string(),
                    source,
                });
            }
            log::debug!("Initialized {}", node.name());
        }
        self.state = PathState::Ready;
        log::info!("Render path initialized with {} nodes", self.nodes.len());
        Ok(())
    }
}

impl fmt::Debug for RenderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPath")
            .field("nodes", &self.node_names())
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .field("state", &self.state)
            .finish()
    }
}
