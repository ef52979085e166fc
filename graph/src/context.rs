//! Shared dependencies of a render graph.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::backend::{FrameContext, GpuDevice, Swapchain};
use crate::error::{BackendResult, RenderPathError};
use crate::render_path::RenderPath;
use crate::scene::Scene;
use crate::types::Extent2d;

/// Construction parameters of a [`GraphContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphContextDescriptor {
    /// Resolution graph images are allocated at.
    pub render_resolution: Extent2d,
    /// Resolution of the swapchain.
    pub target_resolution: Extent2d,
    /// Number of frames recorded ahead of the GPU.
    pub frames_in_flight: usize,
}

impl Default for GraphContextDescriptor {
    fn default() -> Self {
        Self {
            render_resolution: Extent2d::default(),
            target_resolution: Extent2d::default(),
            frames_in_flight: 2,
        }
    }
}

impl GraphContextDescriptor {
    pub fn with_render_resolution(mut self, extent: Extent2d) -> Self {
        self.render_resolution = extent;
        self
    }

    pub fn with_target_resolution(mut self, extent: Extent2d) -> Self {
        self.target_resolution = extent;
        self
    }

    pub fn with_frames_in_flight(mut self, frames: usize) -> Self {
        self.frames_in_flight = frames;
        self
    }
}

/// Dependency locator handed to the node factory and the compile strategies.
///
/// The context never creates render paths itself; a successful compile
/// installs one with [`set_render_path`](Self::set_render_path).
#[derive(Debug)]
pub struct GraphContext {
    device: Arc<dyn GpuDevice>,
    swapchain: Arc<Swapchain>,
    scene: RwLock<Option<Arc<Scene>>>,
    render_path: Mutex<Option<RenderPath>>,
    render_resolution: Extent2d,
    frames_in_flight: usize,
}

impl GraphContext {
    /// Create a context and its swapchain on `device`.
    pub fn new(device: Arc<dyn GpuDevice>, descriptor: GraphContextDescriptor) -> BackendResult<Self> {
        let frames_in_flight = descriptor.frames_in_flight.max(1);
        let swapchain = Swapchain::new(device.as_ref(), descriptor.target_resolution, frames_in_flight)?;
        log::info!(
            "Graph context on {}: render {}x{}, target {}x{}, {} frames in flight",
            device.name(),
            descriptor.render_resolution.width,
            descriptor.render_resolution.height,
            descriptor.target_resolution.width,
            descriptor.target_resolution.height,
            frames_in_flight
        );
        Ok(Self {
            device,
            swapchain: Arc::new(swapchain),
            scene: RwLock::new(None),
            render_path: Mutex::new(None),
            render_resolution: descriptor.render_resolution,
            frames_in_flight,
        })
    }

    pub fn device(&self) -> &Arc<dyn GpuDevice> {
        &self.device
    }

    pub fn swapchain(&self) -> &Arc<Swapchain> {
        &self.swapchain
    }

    /// Active scene, if the host has set one.
    pub fn scene(&self) -> Option<Arc<Scene>> {
        self.scene.read().clone()
    }

    pub fn set_scene(&self, scene: Arc<Scene>) {
        *self.scene.write() = Some(scene);
    }

    pub fn render_resolution(&self) -> Extent2d {
        self.render_resolution
    }

    pub fn target_resolution(&self) -> Extent2d {
        self.swapchain.extent()
    }

    pub fn frames_in_flight(&self) -> usize {
        self.frames_in_flight
    }

    /// Run `f` with the installed render path.
    pub fn render_path<R>(&self, f: impl FnOnce(Option<&mut RenderPath>) -> R) -> R {
        f(self.render_path.lock().as_mut())
    }

    /// Install a new render path and return the previous one.
    pub fn set_render_path(&self, path: RenderPath) -> Option<RenderPath> {
        self.render_path.lock().replace(path)
    }

    pub fn has_render_path(&self) -> bool {
        self.render_path.lock().is_some()
    }

    /// Execute the installed render path for one frame.
    ///
    /// Returns `Ok(false)` when no render path is installed.
    pub fn execute_frame(&self, frame: &mut FrameContext) -> Result<bool, RenderPathError> {
        match self.render_path.lock().as_mut() {
            Some(path) => path.execute(frame).map(|()| true),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DummyDevice;

    #[test]
    fn test_context_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GraphContext>();
    }

    #[test]
    fn test_context_resolutions() {
        let descriptor = GraphContextDescriptor::default()
            .with_render_resolution(Extent2d::new(640, 360))
            .with_target_resolution(Extent2d::new(1280, 720))
            .with_frames_in_flight(0);
        let context = GraphContext::new(Arc::new(DummyDevice::new()), descriptor).unwrap();

        assert_eq!(context.render_resolution(), Extent2d::new(640, 360));
        assert_eq!(context.target_resolution(), Extent2d::new(1280, 720));
        assert_eq!(context.frames_in_flight(), 1);
        assert!(context.scene().is_none());
    }

    #[test]
    fn test_execute_without_render_path() {
        let context =
            GraphContext::new(Arc::new(DummyDevice::new()), GraphContextDescriptor::default()).unwrap();
        let mut frame = FrameContext::new(0, 2);
        assert!(!context.execute_frame(&mut frame).unwrap());
        assert!(!context.has_render_path());
    }
}
