use std::sync::Arc;

use crate::backend::{FrameContext, GpuBuffer, GpuDevice, GpuPipeline, ImageLayout, PipelineDescriptor, PipelineKind};
use crate::error::NodeError;
use crate::node::{Node, NodeBindings, NodeType};
use crate::scene::CameraUniform;
use crate::types::{BufferDescriptor, BufferUsage};

use super::initialized;

const SHADER_GROUP_HANDLE_SIZE: u64 = 64;

/// Path-traces the scene into the `Output` image.
pub struct RayTracingNode {
    name: String,
    bindings: NodeBindings,
    device: Arc<dyn GpuDevice>,
    pipeline: Option<Arc<GpuPipeline>>,
    binding_table: Option<Arc<GpuBuffer>>,
}

impl RayTracingNode {
    pub fn new(name: impl Into<String>, device: Arc<dyn GpuDevice>) -> Self {
        let name = name.into();
        Self {
            bindings: NodeBindings::new(name.clone(), NodeType::RayTracing),
            name,
            device,
            pipeline: None,
            binding_table: None,
        }
    }
}

impl Node for RayTracingNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_type(&self) -> NodeType {
        NodeType::RayTracing
    }

    fn bindings(&self) -> &NodeBindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut NodeBindings {
        &mut self.bindings
    }

    fn initialize(&mut self) -> Result<(), NodeError> {
        let descriptor = PipelineDescriptor::new(format!("{}-pipeline", self.name), PipelineKind::RayTracing)
            .with_shader("raygen")
            .with_shader("miss")
            .with_shader("closest_hit")
            .with_push_constants(std::mem::size_of::<CameraUniform>());
        let groups = descriptor.shaders.len() as u64;
        self.pipeline = Some(self.device.create_pipeline(&descriptor)?);
        self.binding_table = Some(self.device.create_buffer(
            &BufferDescriptor::new(
                groups * SHADER_GROUP_HANDLE_SIZE,
                BufferUsage::SHADER_BINDING_TABLE | BufferUsage::COPY_DST,
            )
            .with_label(format!("{}-sbt", self.name)),
        )?);
        Ok(())
    }

    fn execute(&mut self, frame: &mut FrameContext) -> Result<(), NodeError> {
        let pipeline = initialized(&self.pipeline, &self.name)?;
        let output = self.bindings.image("Output");
        let uniform = self.bindings.resource("Camera").camera().read().uniform();

        frame.cmd.image_barrier(output, ImageLayout::General);
        frame.cmd.bind_pipeline(pipeline);
        frame.cmd.update_descriptor(0, self.bindings.resource("TLAS").name());
        frame.cmd.update_descriptor(1, self.bindings.resource("Objects").name());
        frame.cmd.update_descriptor(2, self.bindings.resource("Output").name());
        frame.cmd.push_constants(bytemuck::bytes_of(&uniform));

        let extent = output.extent();
        frame.cmd.trace_rays(extent.width, extent.height);
        Ok(())
    }
}
