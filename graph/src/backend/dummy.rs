//! Dummy GPU device for testing and headless runs.
//!
//! This device doesn't perform actual GPU operations. It hands out unique
//! handles, counts allocations and can be told to fail, which is enough to
//! drive compilation and execution without GPU hardware.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{BackendError, BackendResult};
use crate::types::{BufferDescriptor, ImageDescriptor};

use super::{
    BufferHandle, GpuBuffer, GpuDevice, GpuImage, GpuPipeline, ImageHandle, PipelineDescriptor,
    PipelineHandle,
};

/// Dummy GPU device.
#[derive(Debug, Default)]
pub struct DummyDevice {
    next_handle: AtomicU64,
    images: AtomicU64,
    buffers: AtomicU64,
    pipelines: AtomicU64,
    fail_images: AtomicBool,
    fail_pipelines: AtomicBool,
}

impl DummyDevice {
    /// Create a new dummy device.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&self) -> u64 {
        self.next_handle.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of images created so far.
    pub fn image_count(&self) -> u64 {
        self.images.load(Ordering::Relaxed)
    }

    /// Number of buffers created so far.
    pub fn buffer_count(&self) -> u64 {
        self.buffers.load(Ordering::Relaxed)
    }

    /// Number of pipelines created so far.
    pub fn pipeline_count(&self) -> u64 {
        self.pipelines.load(Ordering::Relaxed)
    }

    /// Make every following image creation fail.
    pub fn fail_image_creation(&self, fail: bool) {
        self.fail_images.store(fail, Ordering::Relaxed);
    }

    /// Make every following pipeline creation fail.
    pub fn fail_pipeline_creation(&self, fail: bool) {
        self.fail_pipelines.store(fail, Ordering::Relaxed);
    }
}

impl GpuDevice for DummyDevice {
    fn name(&self) -> &str {
        "Dummy Device"
    }

    fn create_image(&self, descriptor: &ImageDescriptor) -> BackendResult<Arc<GpuImage>> {
        let label = descriptor.label.as_deref().unwrap_or("unnamed");
        if self.fail_images.load(Ordering::Relaxed) {
            return Err(BackendError::ImageCreationFailed(format!("{label}: allocation disabled")));
        }
        log::trace!(
            "DummyDevice: creating image {} ({}x{}, {:?})",
            label,
            descriptor.extent.width,
            descriptor.extent.height,
            descriptor.format
        );
        self.images.fetch_add(1, Ordering::Relaxed);
        Ok(Arc::new(GpuImage::new(
            ImageHandle(self.next_handle()),
            descriptor.clone(),
        )))
    }

    fn create_buffer(&self, descriptor: &BufferDescriptor) -> BackendResult<Arc<GpuBuffer>> {
        log::trace!(
            "DummyDevice: creating buffer {:?} (size: {})",
            descriptor.label,
            descriptor.size
        );
        self.buffers.fetch_add(1, Ordering::Relaxed);
        Ok(Arc::new(GpuBuffer::new(
            BufferHandle(self.next_handle()),
            descriptor.clone(),
        )))
    }

    fn create_pipeline(&self, descriptor: &PipelineDescriptor) -> BackendResult<Arc<GpuPipeline>> {
        if self.fail_pipelines.load(Ordering::Relaxed) {
            return Err(BackendError::PipelineCreationFailed(format!(
                "{}: pipeline creation disabled",
                descriptor.label
            )));
        }
        log::trace!(
            "DummyDevice: creating {:?} pipeline '{}'",
            descriptor.kind,
            descriptor.label
        );
        self.pipelines.fetch_add(1, Ordering::Relaxed);
        Ok(Arc::new(GpuPipeline::new(
            PipelineHandle(self.next_handle()),
            descriptor.clone(),
        )))
    }
}
