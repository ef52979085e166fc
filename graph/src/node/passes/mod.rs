//! Concrete passes, one per [`NodeType`](super::NodeType).
//!
//! The passes record the command stream a real backend would replay. Shader
//! bodies live behind the pipeline names they create.

mod ambient_occlusion;
mod anti_aliasing;
mod bloom;
mod gaussian_blur;
mod gbuffer;
mod hair_renderer;
mod lighting;
mod present;
mod ray_tracing;
mod scene_provider;

pub use ambient_occlusion::AmbientOcclusionNode;
pub use anti_aliasing::AntiAliasingNode;
pub use bloom::BloomNode;
pub use gaussian_blur::GaussianBlurNode;
pub use gbuffer::GBufferNode;
pub use hair_renderer::HairRendererNode;
pub use lighting::LightingNode;
pub use present::PresentNode;
pub use ray_tracing::RayTracingNode;
pub use scene_provider::SceneProviderNode;

use crate::backend::{CommandBuffer, ImageLayout};
use crate::error::NodeError;

use super::NodeBindings;

/// Local workgroup size of the full-screen compute passes.
pub(crate) const WORKGROUP_SIZE: u32 = 8;

/// Object allocated in `initialize`, or `NotInitialized`.
pub(crate) fn initialized<'a, T>(slot: &'a Option<T>, node: &str) -> Result<&'a T, NodeError> {
    slot.as_ref()
        .ok_or_else(|| NodeError::NotInitialized(node.to_string()))
}

/// Transition the image inputs in `keys` for sampling and bind them in order.
///
/// Unbound keys are skipped so optional inputs can be listed too.
pub(crate) fn sample_inputs(cmd: &mut CommandBuffer, bindings: &NodeBindings, keys: &[&str], first_binding: u32) {
    for (offset, key) in keys.iter().enumerate() {
        let Some(resource) = bindings.get(key) else {
            continue;
        };
        for image in resource
            .try_image()
            .into_iter()
            .chain(resource.try_depth_image())
            .chain(resource.try_image_array().into_iter().flatten())
        {
            cmd.image_barrier(image, ImageLayout::ShaderReadOnly);
        }
        cmd.update_descriptor(first_binding + offset as u32, resource.name());
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::Arc;

    use crate::backend::{DummyDevice, GpuDevice};
    use crate::resource::{Resource, ResourceKind};
    use crate::scene::Scene;
    use crate::types::{Extent2d, ImageDescriptor, TextureFormat, TextureUsage};

    pub fn image(device: &DummyDevice, name: &str) -> Arc<Resource> {
        let image = device
            .create_image(
                &ImageDescriptor::new(Extent2d::new(16, 16), TextureFormat::Rgba32Float, TextureUsage::default())
                    .with_label(name),
            )
            .unwrap();
        Arc::new(Resource::new(name, ResourceKind::Image(image)))
    }

    pub fn depth(device: &DummyDevice, name: &str) -> Arc<Resource> {
        let image = device
            .create_image(&ImageDescriptor::depth(Extent2d::new(16, 16)).with_label(name))
            .unwrap();
        Arc::new(Resource::new(name, ResourceKind::DepthImage(image)))
    }

    pub fn scene_resources(scene: &Arc<Scene>) -> [(&'static str, Arc<Resource>); 4] {
        [
            ("Objects", Arc::new(Resource::new("Objects-1", ResourceKind::Objects(scene.objects().clone())))),
            ("Camera", Arc::new(Resource::new("Camera-2", ResourceKind::Camera(scene.camera().clone())))),
            ("TLAS", Arc::new(Resource::new("TLAS-3", ResourceKind::Tlas(scene.tlas().clone())))),
            ("Scene", Arc::new(Resource::new("Scene-4", ResourceKind::Scene(scene.clone())))),
        ]
    }
}
