use std::sync::Arc;

use crate::backend::{FrameContext, GpuDevice, GpuPipeline, ImageLayout, PipelineDescriptor, PipelineKind};
use crate::error::NodeError;
use crate::node::{Node, NodeBindings, NodeType};

use super::initialized;

const COLOR_TARGETS: [&str; 4] = ["Position", "Normal", "Albedo", "Motion Vectors"];

/// Rasterises the scene into the G-buffer targets.
pub struct GBufferNode {
    name: String,
    bindings: NodeBindings,
    device: Arc<dyn GpuDevice>,
    pipeline: Option<Arc<GpuPipeline>>,
}

impl GBufferNode {
    pub fn new(name: impl Into<String>, device: Arc<dyn GpuDevice>) -> Self {
        let name = name.into();
        Self {
            bindings: NodeBindings::new(name.clone(), NodeType::GBufferPass),
            name,
            device,
            pipeline: None,
        }
    }
}

impl Node for GBufferNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_type(&self) -> NodeType {
        NodeType::GBufferPass
    }

    fn bindings(&self) -> &NodeBindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut NodeBindings {
        &mut self.bindings
    }

    fn initialize(&mut self) -> Result<(), NodeError> {
        let descriptor = PipelineDescriptor::new(format!("{}-pipeline", self.name), PipelineKind::Graphics)
            .with_shader("gbuffer_vs")
            .with_shader("gbuffer_fs")
            .with_push_constants(std::mem::size_of::<[f32; 16]>());
        self.pipeline = Some(self.device.create_pipeline(&descriptor)?);
        Ok(())
    }

    fn execute(&mut self, frame: &mut FrameContext) -> Result<(), NodeError> {
        let pipeline = initialized(&self.pipeline, &self.name)?;
        let scene = self.bindings.resource("Scene Data").scene();

        for target in COLOR_TARGETS {
            frame
                .cmd
                .image_barrier(self.bindings.image(target), ImageLayout::ColorAttachment);
        }
        frame.cmd.image_barrier(
            self.bindings.resource("Depth").depth_image(),
            ImageLayout::DepthAttachment,
        );
        frame.cmd.bind_pipeline(pipeline);

        for object in scene.objects().iter() {
            let model = object.transform.to_cols_array();
            frame.cmd.push_constants(bytemuck::cast_slice(&model));
            frame.cmd.draw(object.vertex_count, 1);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Command, DummyDevice};
    use crate::node::passes::test_util::{depth, image, scene_resources};
    use crate::scene::Scene;

    #[test]
    fn test_draws_every_object() {
        let device = Arc::new(DummyDevice::new());
        let scene = Arc::new(Scene::demo());
        let mut node = GBufferNode::new("G-Buffer#3", device.clone());
        let [.., (_, scene_data)] = scene_resources(&scene);
        assert!(node.set_resource("Scene Data", scene_data));
        for target in COLOR_TARGETS {
            assert!(node.set_resource(target, image(&device, target)));
        }
        assert!(node.set_resource("Depth", depth(&device, "Depth")));
        assert!(!node.set_resource("Depth", image(&device, "not-depth")));

        node.initialize().unwrap();
        let mut frame = FrameContext::new(0, 1);
        node.execute(&mut frame).unwrap();

        let draws = frame
            .cmd
            .commands()
            .iter()
            .filter(|command| matches!(command, Command::Draw { .. }))
            .count();
        assert_eq!(draws, scene.objects().len());
    }
}
