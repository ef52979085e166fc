//! Error types for the render graph.

use crate::id::{EdgeId, NodeId};
use crate::node::NodeType;
use crate::resource::ResourceType;
use thiserror::Error;

/// Errors raised at the GPU boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Failed to create image: {0}")]
    ImageCreationFailed(String),
    #[error("Failed to create buffer: {0}")]
    BufferCreationFailed(String),
    #[error("Failed to create pipeline: {0}")]
    PipelineCreationFailed(String),
    #[error("Failed to create swapchain: {0}")]
    SwapchainCreationFailed(String),
    #[error("Out of memory")]
    OutOfMemory,
    #[error("Device lost")]
    DeviceLost,
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Structural errors found while editing or compiling a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("Node {node} has no resource named '{resource}'")]
    UnknownResource { node: NodeId, resource: String },
    #[error("Unknown edge: {0}")]
    UnknownEdge(EdgeId),
    #[error("Unsupported node type: {0}")]
    UnsupportedNodeType(NodeType),
    #[error("Options do not belong to node {node} of type {node_type}")]
    OptionsMismatch { node: NodeId, node_type: NodeType },
    #[error("Resource '{resource}' has unsupported type {resource_type}")]
    UnsupportedResourceType {
        resource: String,
        resource_type: ResourceType,
    },
    #[error("Cannot connect {0} to itself")]
    SelfLoop(NodeId),
    #[error("Edge {edge} must connect an output to an input ({from} -> {to})")]
    InvalidDirection { edge: EdgeId, from: String, to: String },
    #[error("Type mismatch on {from} -> {to}: expected {expected}, found {found}")]
    TypeMismatch {
        from: String,
        to: String,
        expected: ResourceType,
        found: ResourceType,
    },
    #[error("Input '{resource}' of {node} has more than one producer")]
    DuplicateProducer { node: String, resource: String },
    #[error("Resource key '{0}' was created twice")]
    DuplicateResource(String),
    #[error("Required input '{resource}' of {node} is not connected")]
    MissingInput { node: String, resource: String },
    #[error("Graph must contain a SceneProvider node")]
    MissingSceneProvider,
    #[error("No active scene in the graph context")]
    MissingScene,
    #[error("Given graph was not acyclic")]
    NotAcyclic,
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Reasons the editor refuses an interactive connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("Node {node} has no resource named '{resource}'")]
    UnknownResource { node: NodeId, resource: String },
    #[error("Cannot connect {0} to itself")]
    SelfLoop(NodeId),
    #[error("Connection must join an output with an input ({from} -> {to})")]
    InvalidDirection { from: String, to: String },
    #[error("{from} and {to} are already connected")]
    AlreadyConnected { from: String, to: String },
    #[error("{0} already has an input attached")]
    InputAlreadyConnected(String),
    #[error("{from} ({from_type}) is not compatible with {to} ({to_type})")]
    Incompatible {
        from: String,
        to: String,
        from_type: ResourceType,
        to_type: ResourceType,
    },
}

/// Errors raised by runtime nodes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("{node} has no resource bound to '{resource}'")]
    MissingBinding { node: String, resource: String },
    #[error("{0} was executed before initialization")]
    NotInitialized(String),
}

/// Errors raised while executing a compiled render path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderPathError {
    #[error("Failed to initialize {node}: {source}")]
    Initialize {
        node: String,
        #[source]
        source: NodeError,
    },
    #[error("Failed to execute {node}: {source}")]
    Execute {
        node: String,
        #[source]
        source: NodeError,
    },
    #[error("Render path is poisoned by an earlier initialization failure")]
    Poisoned,
}
