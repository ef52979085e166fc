use std::sync::Arc;

use bytemuck::{Pod, Zeroable};

use crate::backend::{FrameContext, GpuDevice, GpuImage, GpuPipeline, ImageLayout, PipelineDescriptor, PipelineKind};
use crate::error::NodeError;
use crate::node::{dispatch_size, BlurOptions, Node, NodeBindings, NodeType};

use super::{initialized, sample_inputs, WORKGROUP_SIZE};

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct BlurParams {
    direction: [f32; 2],
    radius: u32,
    _padding: u32,
}

/// Separable Gaussian blur: a horizontal pass into a private image followed
/// by a vertical pass into `Blur Output`.
pub struct GaussianBlurNode {
    name: String,
    bindings: NodeBindings,
    device: Arc<dyn GpuDevice>,
    options: BlurOptions,
    pipeline: Option<Arc<GpuPipeline>>,
    intermediate: Option<Arc<GpuImage>>,
}

impl GaussianBlurNode {
    pub fn new(name: impl Into<String>, device: Arc<dyn GpuDevice>, options: BlurOptions) -> Self {
        let name = name.into();
        Self {
            bindings: NodeBindings::new(name.clone(), NodeType::GaussianBlur),
            name,
            device,
            options,
            pipeline: None,
            intermediate: None,
        }
    }

    fn params(&self, direction: [f32; 2]) -> BlurParams {
        BlurParams {
            direction,
            radius: self.options.radius,
            _padding: 0,
        }
    }
}

impl Node for GaussianBlurNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_type(&self) -> NodeType {
        NodeType::GaussianBlur
    }

    fn bindings(&self) -> &NodeBindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut NodeBindings {
        &mut self.bindings
    }

    fn initialize(&mut self) -> Result<(), NodeError> {
        let descriptor = PipelineDescriptor::new(format!("{}-pipeline", self.name), PipelineKind::Compute)
            .with_shader("gaussian_blur")
            .with_push_constants(std::mem::size_of::<BlurParams>());
        self.pipeline = Some(self.device.create_pipeline(&descriptor)?);

        let intermediate = self
            .bindings
            .image("Blur Output")
            .descriptor()
            .clone()
            .with_label(format!("{}-intermediate", self.name));
        self.intermediate = Some(self.device.create_image(&intermediate)?);
        Ok(())
    }

    fn execute(&mut self, frame: &mut FrameContext) -> Result<(), NodeError> {
        let pipeline = initialized(&self.pipeline, &self.name)?;
        let intermediate = initialized(&self.intermediate, &self.name)?;
        let output = self.bindings.image("Blur Output");
        let groups = dispatch_size(output.extent(), WORKGROUP_SIZE);

        frame.cmd.bind_pipeline(pipeline);

        sample_inputs(&mut frame.cmd, &self.bindings, &["Blur Input"], 0);
        frame.cmd.image_barrier(intermediate, ImageLayout::General);
        frame.cmd.update_descriptor(1, format!("{}-intermediate", self.name));
        frame.cmd.push_constants(bytemuck::bytes_of(&self.params([1.0, 0.0])));
        frame.cmd.dispatch(groups);

        frame.cmd.image_barrier(intermediate, ImageLayout::ShaderReadOnly);
        frame.cmd.image_barrier(output, ImageLayout::General);
        frame.cmd.update_descriptor(0, format!("{}-intermediate", self.name));
        frame.cmd.update_descriptor(1, self.bindings.resource("Blur Output").name());
        frame.cmd.push_constants(bytemuck::bytes_of(&self.params([0.0, 1.0])));
        frame.cmd.dispatch(groups);
        Ok(())
    }
}
