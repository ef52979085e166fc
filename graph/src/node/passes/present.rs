use std::sync::Arc;

use crate::backend::{FrameContext, ImageLayout, Swapchain};
use crate::error::NodeError;
use crate::node::{Node, NodeBindings, NodeType};

/// Copies the final image into the swapchain image of the current frame.
pub struct PresentNode {
    name: String,
    bindings: NodeBindings,
    swapchain: Arc<Swapchain>,
}

impl PresentNode {
    pub fn new(name: impl Into<String>, swapchain: Arc<Swapchain>) -> Self {
        let name = name.into();
        Self {
            bindings: NodeBindings::new(name.clone(), NodeType::Present),
            name,
            swapchain,
        }
    }
}

impl Node for PresentNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_type(&self) -> NodeType {
        NodeType::Present
    }

    fn bindings(&self) -> &NodeBindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut NodeBindings {
        &mut self.bindings
    }

    fn initialize(&mut self) -> Result<(), NodeError> {
        let source = self.bindings.image("Final Image");
        if source.extent() != self.swapchain.extent() {
            log::debug!(
                "{}: final image {}x{} is scaled to swapchain {}x{}",
                self.name,
                source.extent().width,
                source.extent().height,
                self.swapchain.extent().width,
                self.swapchain.extent().height
            );
        }
        Ok(())
    }

    fn execute(&mut self, frame: &mut FrameContext) -> Result<(), NodeError> {
        let source = self.bindings.image("Final Image");
        let target = self.swapchain.image(frame.frame_in_flight);

        frame.cmd.image_barrier(source, ImageLayout::TransferSrc);
        frame.cmd.image_barrier(target, ImageLayout::TransferDst);
        frame.cmd.copy_image(source, target);
        frame.cmd.image_barrier(target, ImageLayout::PresentSrc);
        Ok(())
    }
}
