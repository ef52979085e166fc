use std::sync::Arc;

use bytemuck::{Pod, Zeroable};

use crate::backend::{FrameContext, GpuDevice, GpuPipeline, ImageLayout, PipelineDescriptor, PipelineKind};
use crate::error::NodeError;
use crate::node::{dispatch_size, BloomOptions, Node, NodeBindings, NodeType};

use super::{initialized, sample_inputs, WORKGROUP_SIZE};

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct BloomParams {
    threshold: f32,
    intensity: f32,
    texel_size: [f32; 2],
}

/// Bright-pass extraction and additive composite.
pub struct BloomNode {
    name: String,
    bindings: NodeBindings,
    device: Arc<dyn GpuDevice>,
    options: BloomOptions,
    extract: Option<Arc<GpuPipeline>>,
    composite: Option<Arc<GpuPipeline>>,
}

impl BloomNode {
    pub fn new(name: impl Into<String>, device: Arc<dyn GpuDevice>, options: BloomOptions) -> Self {
        let name = name.into();
        Self {
            bindings: NodeBindings::new(name.clone(), NodeType::Bloom),
            name,
            device,
            options,
            extract: None,
            composite: None,
        }
    }
}

impl Node for BloomNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_type(&self) -> NodeType {
        NodeType::Bloom
    }

    fn bindings(&self) -> &NodeBindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut NodeBindings {
        &mut self.bindings
    }

    fn initialize(&mut self) -> Result<(), NodeError> {
        let push_constants = std::mem::size_of::<BloomParams>();
        self.extract = Some(self.device.create_pipeline(
            &PipelineDescriptor::new(format!("{}-extract", self.name), PipelineKind::Compute)
                .with_shader("bloom_extract")
                .with_push_constants(push_constants),
        )?);
        self.composite = Some(self.device.create_pipeline(
            &PipelineDescriptor::new(format!("{}-composite", self.name), PipelineKind::Compute)
                .with_shader("bloom_composite")
                .with_push_constants(push_constants),
        )?);
        Ok(())
    }

    fn execute(&mut self, frame: &mut FrameContext) -> Result<(), NodeError> {
        let extract = initialized(&self.extract, &self.name)?;
        let composite = initialized(&self.composite, &self.name)?;
        let output = self.bindings.image("Bloom Output");
        let extent = output.extent();
        let params = BloomParams {
            threshold: self.options.threshold,
            intensity: self.options.intensity,
            texel_size: extent.reciprocal(),
        };

        sample_inputs(&mut frame.cmd, &self.bindings, &["Bloom Input"], 0);
        frame.cmd.image_barrier(output, ImageLayout::General);
        frame.cmd.update_descriptor(1, self.bindings.resource("Bloom Output").name());
        frame.cmd.push_constants(bytemuck::bytes_of(&params));

        for pipeline in [extract, composite] {
            frame.cmd.bind_pipeline(pipeline);
            frame.cmd.dispatch(dispatch_size(extent, WORKGROUP_SIZE));
        }
        Ok(())
    }
}
