use std::sync::Arc;

use crate::backend::{FrameContext, GpuDevice, GpuPipeline, ImageLayout, PipelineDescriptor, PipelineKind};
use crate::error::NodeError;
use crate::node::{Node, NodeBindings, NodeType};

use super::initialized;

const STRANDS_PER_OBJECT: u32 = 1024;
const SEGMENTS_PER_STRAND: u32 = 16;

/// Draws strand geometry as line strips with its own depth target.
pub struct HairRendererNode {
    name: String,
    bindings: NodeBindings,
    device: Arc<dyn GpuDevice>,
    pipeline: Option<Arc<GpuPipeline>>,
}

impl HairRendererNode {
    pub fn new(name: impl Into<String>, device: Arc<dyn GpuDevice>) -> Self {
        let name = name.into();
        Self {
            bindings: NodeBindings::new(name.clone(), NodeType::HairRenderer),
            name,
            device,
            pipeline: None,
        }
    }
}

impl Node for HairRendererNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_type(&self) -> NodeType {
        NodeType::HairRenderer
    }

    fn bindings(&self) -> &NodeBindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut NodeBindings {
        &mut self.bindings
    }

    fn initialize(&mut self) -> Result<(), NodeError> {
        let descriptor = PipelineDescriptor::new(format!("{}-pipeline", self.name), PipelineKind::Graphics)
            .with_shader("hair_vs")
            .with_shader("hair_fs")
            .with_push_constants(std::mem::size_of::<[f32; 16]>());
        self.pipeline = Some(self.device.create_pipeline(&descriptor)?);
        Ok(())
    }

    fn execute(&mut self, frame: &mut FrameContext) -> Result<(), NodeError> {
        let pipeline = initialized(&self.pipeline, &self.name)?;
        let scene = self.bindings.resource("Scene Data").scene();

        frame
            .cmd
            .image_barrier(self.bindings.image("Output"), ImageLayout::ColorAttachment);
        frame.cmd.image_barrier(
            self.bindings.resource("Depth").depth_image(),
            ImageLayout::DepthAttachment,
        );
        frame.cmd.bind_pipeline(pipeline);

        for object in scene.objects().iter() {
            frame
                .cmd
                .push_constants(bytemuck::cast_slice(&object.transform.to_cols_array()));
            frame.cmd.draw(SEGMENTS_PER_STRAND * 2, STRANDS_PER_OBJECT);
        }
        Ok(())
    }
}
