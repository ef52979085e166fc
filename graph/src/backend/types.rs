//! GPU object handles shared between the device and the graph.

use parking_lot::Mutex;

use crate::types::{BufferDescriptor, Extent2d, ImageDescriptor, TextureFormat};

/// Handle to a GPU image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub(crate) u64);

/// Handle to a GPU buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub(crate) u64);

/// Handle to a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineHandle(pub(crate) u64);

/// Layout an image is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageLayout {
    #[default]
    Undefined,
    /// Working layout of every graph image between passes.
    General,
    ColorAttachment,
    DepthAttachment,
    ShaderReadOnly,
    TransferSrc,
    TransferDst,
    PresentSrc,
}

/// A GPU image with tracked layout.
///
/// The layout is the only mutable state and changes only when a barrier is
/// recorded through [`CommandBuffer::image_barrier`](super::CommandBuffer::image_barrier).
#[derive(Debug)]
pub struct GpuImage {
    handle: ImageHandle,
    descriptor: ImageDescriptor,
    layout: Mutex<ImageLayout>,
}

impl GpuImage {
    pub(crate) fn new(handle: ImageHandle, descriptor: ImageDescriptor) -> Self {
        Self {
            handle,
            descriptor,
            layout: Mutex::new(ImageLayout::Undefined),
        }
    }

    pub fn handle(&self) -> ImageHandle {
        self.handle
    }

    pub fn descriptor(&self) -> &ImageDescriptor {
        &self.descriptor
    }

    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }

    pub fn extent(&self) -> Extent2d {
        self.descriptor.extent
    }

    pub fn format(&self) -> TextureFormat {
        self.descriptor.format
    }

    /// Current layout of the image.
    pub fn layout(&self) -> ImageLayout {
        *self.layout.lock()
    }

    pub(crate) fn set_layout(&self, layout: ImageLayout) -> ImageLayout {
        std::mem::replace(&mut *self.layout.lock(), layout)
    }
}

/// A GPU buffer.
#[derive(Debug)]
pub struct GpuBuffer {
    handle: BufferHandle,
    descriptor: BufferDescriptor,
}

impl GpuBuffer {
    pub(crate) fn new(handle: BufferHandle, descriptor: BufferDescriptor) -> Self {
        Self { handle, descriptor }
    }

    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    pub fn descriptor(&self) -> &BufferDescriptor {
        &self.descriptor
    }

    pub fn size(&self) -> u64 {
        self.descriptor.size
    }
}

/// Kind of pipeline a pass binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    Graphics,
    Compute,
    RayTracing,
}

/// Descriptor for creating a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineDescriptor {
    /// Debug label for the pipeline.
    pub label: String,
    /// Pipeline kind.
    pub kind: PipelineKind,
    /// Shader stages by entry name, in binding order.
    pub shaders: Vec<String>,
    /// Size of the push constant block in bytes.
    pub push_constant_size: u32,
}

impl PipelineDescriptor {
    /// Create a new pipeline descriptor.
    pub fn new(label: impl Into<String>, kind: PipelineKind) -> Self {
        Self {
            label: label.into(),
            kind,
            shaders: Vec::new(),
            push_constant_size: 0,
        }
    }

    /// Add a shader stage.
    pub fn with_shader(mut self, shader: impl Into<String>) -> Self {
        self.shaders.push(shader.into());
        self
    }

    /// Set the push constant block size.
    pub fn with_push_constants(mut self, size: usize) -> Self {
        self.push_constant_size = size as u32;
        self
    }
}

/// A created pipeline.
#[derive(Debug)]
pub struct GpuPipeline {
    handle: PipelineHandle,
    descriptor: PipelineDescriptor,
}

impl GpuPipeline {
    pub(crate) fn new(handle: PipelineHandle, descriptor: PipelineDescriptor) -> Self {
        Self { handle, descriptor }
    }

    pub fn handle(&self) -> PipelineHandle {
        self.handle
    }

    pub fn kind(&self) -> PipelineKind {
        self.descriptor.kind
    }

    pub fn label(&self) -> &str {
        &self.descriptor.label
    }
}
