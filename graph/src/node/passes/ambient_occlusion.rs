use std::sync::Arc;

use bytemuck::{Pod, Zeroable};

use crate::backend::{FrameContext, GpuDevice, GpuPipeline, ImageLayout, PipelineDescriptor, PipelineKind};
use crate::error::NodeError;
use crate::node::{dispatch_size, AmbientOcclusionMode, AmbientOcclusionOptions, Node, NodeBindings, NodeType};

use super::{initialized, sample_inputs, WORKGROUP_SIZE};

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct AmbientOcclusionParams {
    samples: u32,
    radius: f32,
    frame_index: u32,
    _padding: u32,
}

/// Computes an occlusion factor per pixel from the G-buffer position and
/// normal images, either by tracing short rays or in screen space.
pub struct AmbientOcclusionNode {
    name: String,
    bindings: NodeBindings,
    device: Arc<dyn GpuDevice>,
    options: AmbientOcclusionOptions,
    pipeline: Option<Arc<GpuPipeline>>,
}

impl AmbientOcclusionNode {
    pub fn new(name: impl Into<String>, device: Arc<dyn GpuDevice>, options: AmbientOcclusionOptions) -> Self {
        let name = name.into();
        Self {
            bindings: NodeBindings::new(name.clone(), NodeType::AmbientOcclusion),
            name,
            device,
            options,
            pipeline: None,
        }
    }

    pub fn options(&self) -> &AmbientOcclusionOptions {
        &self.options
    }
}

impl Node for AmbientOcclusionNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_type(&self) -> NodeType {
        NodeType::AmbientOcclusion
    }

    fn bindings(&self) -> &NodeBindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut NodeBindings {
        &mut self.bindings
    }

    fn initialize(&mut self) -> Result<(), NodeError> {
        let label = format!("{}-pipeline", self.name);
        let descriptor = match self.options.mode {
            AmbientOcclusionMode::RayTraced => PipelineDescriptor::new(label, PipelineKind::RayTracing)
                .with_shader("ao_raygen")
                .with_shader("ao_miss"),
            AmbientOcclusionMode::ScreenSpace => {
                PipelineDescriptor::new(label, PipelineKind::Compute).with_shader("ssao")
            }
        }
        .with_push_constants(std::mem::size_of::<AmbientOcclusionParams>());
        self.pipeline = Some(self.device.create_pipeline(&descriptor)?);
        Ok(())
    }

    fn execute(&mut self, frame: &mut FrameContext) -> Result<(), NodeError> {
        let pipeline = initialized(&self.pipeline, &self.name)?;
        let output = self.bindings.image("AO Image");

        sample_inputs(&mut frame.cmd, &self.bindings, &["Position Buffer", "Normal Buffer"], 0);
        frame.cmd.image_barrier(output, ImageLayout::General);
        frame.cmd.bind_pipeline(pipeline);
        frame.cmd.update_descriptor(2, self.bindings.resource("AO Image").name());

        let params = AmbientOcclusionParams {
            samples: self.options.samples,
            radius: self.options.radius,
            frame_index: frame.frame_index as u32,
            _padding: 0,
        };
        frame.cmd.push_constants(bytemuck::bytes_of(&params));

        let extent = output.extent();
        match self.options.mode {
            AmbientOcclusionMode::RayTraced => {
                frame.cmd.update_descriptor(3, self.bindings.resource("TLAS").name());
                frame.cmd.trace_rays(extent.width, extent.height);
            }
            AmbientOcclusionMode::ScreenSpace => {
                frame.cmd.update_descriptor(3, self.bindings.resource("Camera").name());
                frame.cmd.dispatch(dispatch_size(extent, WORKGROUP_SIZE));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Command, DummyDevice};
    use crate::node::passes::test_util::{image, scene_resources};
    use crate::scene::Scene;
    use rstest::rstest;

    #[rstest]
    #[case(AmbientOcclusionMode::RayTraced, PipelineKind::RayTracing)]
    #[case(AmbientOcclusionMode::ScreenSpace, PipelineKind::Compute)]
    fn test_mode_selects_pipeline(#[case] mode: AmbientOcclusionMode, #[case] kind: PipelineKind) {
        let device = Arc::new(DummyDevice::new());
        let scene = Arc::new(Scene::demo());
        let options = AmbientOcclusionOptions {
            mode,
            ..Default::default()
        };
        let mut node = AmbientOcclusionNode::new("Ambient Occlusion#4", device.clone(), options);
        node.set_resource("Position Buffer", image(&device, "Position-1"));
        node.set_resource("Normal Buffer", image(&device, "Normal-2"));
        node.set_resource("AO Image", image(&device, "AO Image-3"));
        for (key, resource) in scene_resources(&scene) {
            node.set_resource(key, resource);
        }

        node.initialize().unwrap();
        let mut frame = FrameContext::new(3, 2);
        node.execute(&mut frame).unwrap();

        let bound = frame.cmd.commands().iter().find_map(|command| match command {
            Command::BindPipeline { kind, .. } => Some(*kind),
            _ => None,
        });
        assert_eq!(bound, Some(kind));
    }
}
