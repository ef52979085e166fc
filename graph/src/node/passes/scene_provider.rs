use std::sync::Arc;

use crate::backend::{FrameContext, GpuBuffer, GpuDevice};
use crate::error::NodeError;
use crate::node::{Node, NodeBindings, NodeType};
use crate::scene::CameraUniform;
use crate::types::{BufferDescriptor, BufferUsage};

use super::initialized;

/// Root of every graph: publishes the active scene as resources and keeps
/// the camera uniform buffer current.
pub struct SceneProviderNode {
    name: String,
    bindings: NodeBindings,
    device: Arc<dyn GpuDevice>,
    camera_buffer: Option<Arc<GpuBuffer>>,
}

impl SceneProviderNode {
    pub fn new(name: impl Into<String>, device: Arc<dyn GpuDevice>) -> Self {
        let name = name.into();
        Self {
            bindings: NodeBindings::new(name.clone(), NodeType::SceneProvider),
            name,
            device,
            camera_buffer: None,
        }
    }
}

impl Node for SceneProviderNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_type(&self) -> NodeType {
        NodeType::SceneProvider
    }

    fn bindings(&self) -> &NodeBindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut NodeBindings {
        &mut self.bindings
    }

    fn initialize(&mut self) -> Result<(), NodeError> {
        let descriptor = BufferDescriptor::new(
            std::mem::size_of::<CameraUniform>() as u64,
            BufferUsage::UNIFORM | BufferUsage::COPY_DST,
        )
        .with_label(format!("{}-camera", self.name));
        self.camera_buffer = Some(self.device.create_buffer(&descriptor)?);
        Ok(())
    }

    fn execute(&mut self, frame: &mut FrameContext) -> Result<(), NodeError> {
        let buffer = initialized(&self.camera_buffer, &self.name)?;
        let uniform = self.bindings.resource("Camera").camera().read().uniform();
        frame.cmd.update_buffer(buffer, bytemuck::bytes_of(&uniform));
        Ok(())
    }
}
