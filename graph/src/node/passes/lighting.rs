use std::sync::Arc;

use bytemuck::{Pod, Zeroable};

use crate::backend::{FrameContext, GpuDevice, GpuPipeline, ImageLayout, PipelineDescriptor, PipelineKind};
use crate::error::NodeError;
use crate::node::{dispatch_size, LightingOptions, Node, NodeBindings, NodeType};

use super::{initialized, sample_inputs, WORKGROUP_SIZE};

const SAMPLED_INPUTS: [&str; 7] = [
    "Position",
    "Normal",
    "Albedo",
    "Depth Image",
    "AO Image",
    "AA Image",
    "Shadow Maps",
];

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct LightingParams {
    use_ambient_occlusion: u32,
    ray_traced_shadows: u32,
    use_anti_aliased_input: u32,
    shadow_map_layers: u32,
}

/// Deferred shading of the G-buffer.
///
/// The optional inputs (ambient occlusion, anti-aliased colour, shadow maps)
/// are used only when connected.
pub struct LightingNode {
    name: String,
    bindings: NodeBindings,
    device: Arc<dyn GpuDevice>,
    options: LightingOptions,
    pipeline: Option<Arc<GpuPipeline>>,
}

impl LightingNode {
    pub fn new(name: impl Into<String>, device: Arc<dyn GpuDevice>, options: LightingOptions) -> Self {
        let name = name.into();
        Self {
            bindings: NodeBindings::new(name.clone(), NodeType::LightingPass),
            name,
            device,
            options,
            pipeline: None,
        }
    }

    fn params(&self) -> LightingParams {
        let shadow_map_layers = self
            .bindings
            .get("Shadow Maps")
            .map_or(0, |maps| maps.image_array().len() as u32);
        LightingParams {
            use_ambient_occlusion: (self.options.use_ambient_occlusion
                && self.bindings.is_bound("AO Image")) as u32,
            ray_traced_shadows: self.options.ray_traced_shadows as u32,
            use_anti_aliased_input: self.bindings.is_bound("AA Image") as u32,
            shadow_map_layers,
        }
    }
}

impl Node for LightingNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_type(&self) -> NodeType {
        NodeType::LightingPass
    }

    fn bindings(&self) -> &NodeBindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut NodeBindings {
        &mut self.bindings
    }

    fn initialize(&mut self) -> Result<(), NodeError> {
        let descriptor = PipelineDescriptor::new(format!("{}-pipeline", self.name), PipelineKind::Compute)
            .with_shader("deferred_lighting")
            .with_push_constants(std::mem::size_of::<LightingParams>());
        self.pipeline = Some(self.device.create_pipeline(&descriptor)?);
        Ok(())
    }

    fn execute(&mut self, frame: &mut FrameContext) -> Result<(), NodeError> {
        let pipeline = initialized(&self.pipeline, &self.name)?;
        let output = self.bindings.image("Lighting Result");
        let params = self.params();

        sample_inputs(&mut frame.cmd, &self.bindings, &SAMPLED_INPUTS, 0);
        frame.cmd.image_barrier(output, ImageLayout::General);
        frame.cmd.bind_pipeline(pipeline);

        let next = SAMPLED_INPUTS.len() as u32;
        frame.cmd.update_descriptor(next, self.bindings.resource("Camera").name());
        if self.options.ray_traced_shadows {
            frame.cmd.update_descriptor(next + 1, self.bindings.resource("TLAS").name());
        }
        frame
            .cmd
            .update_descriptor(next + 2, self.bindings.resource("Lighting Result").name());
        frame.cmd.push_constants(bytemuck::bytes_of(&params));
        frame.cmd.dispatch(dispatch_size(output.extent(), WORKGROUP_SIZE));
        Ok(())
    }
}
