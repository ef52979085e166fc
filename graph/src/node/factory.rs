//! Construction of editor and runtime nodes.
//!
//! This is the only place that maps a [`NodeType`] to concrete types. Adding
//! a node type means extending the enum, its slot table and both matches
//! below.

use crate::context::GraphContext;
use crate::editor::EditorNode;
use crate::error::{GraphError, GraphResult};
use crate::id::IdGenerator;

use super::passes::{
    AmbientOcclusionNode, AntiAliasingNode, BloomNode, GBufferNode, GaussianBlurNode, HairRendererNode,
    LightingNode, PresentNode, RayTracingNode, SceneProviderNode,
};
use super::{Node, NodeType};

/// Builds nodes with dependencies taken from a [`GraphContext`].
pub struct NodeFactory<'a> {
    context: &'a GraphContext,
}

impl<'a> NodeFactory<'a> {
    pub fn new(context: &'a GraphContext) -> Self {
        Self { context }
    }

    /// Create the runtime node for `editor`.
    pub fn create(&self, editor: &EditorNode) -> GraphResult<Box<dyn Node>> {
        let name = editor.label();
        let device = self.context.device().clone();
        let options = &editor.options;

        let node: Box<dyn Node> = match editor.node_type {
            NodeType::SceneProvider => Box::new(SceneProviderNode::new(name, device)),
            NodeType::AmbientOcclusion => {
                Box::new(AmbientOcclusionNode::new(name, device, options.ambient_occlusion()))
            }
            NodeType::AntiAliasing => Box::new(AntiAliasingNode::new(name, device)),
            NodeType::Bloom => Box::new(BloomNode::new(name, device, options.bloom())),
            NodeType::GaussianBlur => Box::new(GaussianBlurNode::new(name, device, options.blur())),
            NodeType::GBufferPass => Box::new(GBufferNode::new(name, device)),
            NodeType::LightingPass => Box::new(LightingNode::new(name, device, options.lighting())),
            NodeType::RayTracing => Box::new(RayTracingNode::new(name, device)),
            NodeType::Present => Box::new(PresentNode::new(name, self.context.swapchain().clone())),
            NodeType::HairRenderer => Box::new(HairRendererNode::new(name, device)),
            NodeType::Unknown => return Err(GraphError::UnsupportedNodeType(editor.node_type)),
        };
        log::debug!("Created runtime node {}", node.name());
        Ok(node)
    }

    /// Create the editor-side node for `node_type` with fresh ids.
    ///
    /// Editor nodes carry only the slot layout and options; no GPU objects
    /// are created.
    pub fn create_editor(node_type: NodeType, ids: &mut IdGenerator) -> GraphResult<EditorNode> {
        if node_type == NodeType::Unknown {
            return Err(GraphError::UnsupportedNodeType(node_type));
        }
        Ok(EditorNode::materialize(node_type, ids))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::DummyDevice;
    use crate::context::GraphContextDescriptor;
    use crate::types::Extent2d;
    use rstest::rstest;

    fn context() -> GraphContext {
        GraphContext::new(
            Arc::new(DummyDevice::new()),
            GraphContextDescriptor::default().with_target_resolution(Extent2d::new(64, 64)),
        )
        .unwrap()
    }

    #[test]
    fn test_create_editor_allocates_ids() {
        let mut ids = IdGenerator::new();
        let node = NodeFactory::create_editor(NodeType::RayTracing, &mut ids).unwrap();

        assert_eq!(node.id.raw(), 1);
        assert_eq!(node.resources.len(), 4);
        assert_eq!(node.resources[0].id.raw(), 2);
        assert!(node.resources.iter().all(|r| !r.input_is_connected));
        assert_eq!(node.color, NodeType::RayTracing.color());
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let mut ids = IdGenerator::new();
        assert_eq!(
            NodeFactory::create_editor(NodeType::Unknown, &mut ids).unwrap_err(),
            GraphError::UnsupportedNodeType(NodeType::Unknown)
        );

        let context = context();
        let mut editor = NodeFactory::create_editor(NodeType::Present, &mut ids).unwrap();
        editor.node_type = NodeType::Unknown;
        assert!(matches!(
            NodeFactory::new(&context).create(&editor),
            Err(GraphError::UnsupportedNodeType(NodeType::Unknown))
        ));
    }

    #[rstest]
    #[case(NodeType::SceneProvider)]
    #[case(NodeType::AmbientOcclusion)]
    #[case(NodeType::AntiAliasing)]
    #[case(NodeType::Bloom)]
    #[case(NodeType::GaussianBlur)]
    #[case(NodeType::GBufferPass)]
    #[case(NodeType::LightingPass)]
    #[case(NodeType::RayTracing)]
    #[case(NodeType::Present)]
    #[case(NodeType::HairRenderer)]
    fn test_runtime_node_matches_editor_type(#[case] node_type: NodeType) {
        let context = context();
        let mut ids = IdGenerator::new();
        let editor = NodeFactory::create_editor(node_type, &mut ids).unwrap();
        let node = NodeFactory::new(&context).create(&editor).unwrap();

        assert_eq!(node.node_type(), node_type);
        assert_eq!(node.name(), editor.label());
        assert!(node.bindings().is_empty());
    }
}
