//! Buffers the graph allocates: per-pass uniforms, storage outputs and
//! shader binding tables.

use bitflags::bitflags;

bitflags! {
    /// How a graph buffer is accessed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BufferUsage: u32 {
        const UNIFORM = 1 << 0;
        const STORAGE = 1 << 1;
        const COPY_SRC = 1 << 2;
        const COPY_DST = 1 << 3;
        /// Ray tracing shader group handles.
        const SHADER_BINDING_TABLE = 1 << 4;
    }
}

/// Size, usage and label of a buffer to allocate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BufferDescriptor {
    pub label: Option<String>,
    /// Size in bytes.
    pub size: u64,
    pub usage: BufferUsage,
}

impl BufferDescriptor {
    pub fn new(size: u64, usage: BufferUsage) -> Self {
        Self {
            label: None,
            size,
            usage,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether the host writes this buffer through copy commands.
    pub fn is_host_updated(&self) -> bool {
        self.usage.contains(BufferUsage::COPY_DST)
    }
}
