use std::sync::Arc;

use crate::backend::{FrameContext, GpuDevice, GpuPipeline, ImageLayout, PipelineDescriptor, PipelineKind};
use crate::error::NodeError;
use crate::node::{dispatch_size, Node, NodeBindings, NodeType};

use super::{initialized, sample_inputs, WORKGROUP_SIZE};

/// Edge-aware anti-aliasing resolve.
pub struct AntiAliasingNode {
    name: String,
    bindings: NodeBindings,
    device: Arc<dyn GpuDevice>,
    pipeline: Option<Arc<GpuPipeline>>,
}

impl AntiAliasingNode {
    pub fn new(name: impl Into<String>, device: Arc<dyn GpuDevice>) -> Self {
        let name = name.into();
        Self {
            bindings: NodeBindings::new(name.clone(), NodeType::AntiAliasing),
            name,
            device,
            pipeline: None,
        }
    }
}

impl Node for AntiAliasingNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_type(&self) -> NodeType {
        NodeType::AntiAliasing
    }

    fn bindings(&self) -> &NodeBindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut NodeBindings {
        &mut self.bindings
    }

    fn initialize(&mut self) -> Result<(), NodeError> {
        let descriptor = PipelineDescriptor::new(format!("{}-pipeline", self.name), PipelineKind::Compute)
            .with_shader("fxaa");
        self.pipeline = Some(self.device.create_pipeline(&descriptor)?);
        Ok(())
    }

    fn execute(&mut self, frame: &mut FrameContext) -> Result<(), NodeError> {
        let pipeline = initialized(&self.pipeline, &self.name)?;
        let output = self.bindings.image("Anti-Aliasing Output");

        sample_inputs(&mut frame.cmd, &self.bindings, &["Anti-Aliasing Input"], 0);
        frame.cmd.image_barrier(output, ImageLayout::General);
        frame.cmd.bind_pipeline(pipeline);
        frame
            .cmd
            .update_descriptor(1, self.bindings.resource("Anti-Aliasing Output").name());
        frame.cmd.dispatch(dispatch_size(output.extent(), WORKGROUP_SIZE));
        Ok(())
    }
}
