//! The device trait implemented by graphics API bindings.

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::BackendResult;
use crate::types::{BufferDescriptor, ImageDescriptor};

use super::{GpuBuffer, GpuImage, GpuPipeline, PipelineDescriptor};

/// Creates GPU objects for the render graph.
///
/// Compilation creates the images that flow between passes; nodes create
/// their pipelines and private buffers in `initialize`.
pub trait GpuDevice: Debug + Send + Sync {
    /// Human readable name of the device.
    fn name(&self) -> &str;

    /// Create an image.
    fn create_image(&self, descriptor: &ImageDescriptor) -> BackendResult<Arc<GpuImage>>;

    /// Create a buffer.
    fn create_buffer(&self, descriptor: &BufferDescriptor) -> BackendResult<Arc<GpuBuffer>>;

    /// Create a pipeline.
    fn create_pipeline(&self, descriptor: &PipelineDescriptor) -> BackendResult<Arc<GpuPipeline>>;
}
