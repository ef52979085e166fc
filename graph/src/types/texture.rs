//! Image formats, usage flags and descriptors.

use super::Extent2d;
use bitflags::bitflags;

/// Pixel formats graph images can be allocated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFormat {
    /// Single-channel occlusion and mask targets.
    R32Float,
    /// Albedo.
    Rgba8Unorm,
    /// Swapchain images.
    Bgra8UnormSrgb,
    /// Resolved and motion vector targets.
    Rgba16Float,
    /// Default for HDR color targets.
    #[default]
    Rgba32Float,
    Depth32Float,
}

impl TextureFormat {
    pub fn is_depth(&self) -> bool {
        matches!(self, Self::Depth32Float)
    }

    /// Bytes per pixel.
    pub fn block_size(&self) -> u32 {
        match self {
            Self::R32Float | Self::Rgba8Unorm | Self::Bgra8UnormSrgb | Self::Depth32Float => 4,
            Self::Rgba16Float => 8,
            Self::Rgba32Float => 16,
        }
    }
}

bitflags! {
    /// Ways a pass may access a graph image.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureUsage: u32 {
        const COPY_SRC = 1 << 0;
        const COPY_DST = 1 << 1;
        /// Sampled from shaders.
        const TEXTURE_BINDING = 1 << 2;
        /// Written by compute and ray tracing passes.
        const STORAGE_BINDING = 1 << 3;
        /// Raster color or depth attachment.
        const RENDER_ATTACHMENT = 1 << 4;
    }
}

impl Default for TextureUsage {
    fn default() -> Self {
        Self::COPY_SRC
            .union(Self::TEXTURE_BINDING)
            .union(Self::STORAGE_BINDING)
    }
}

bitflags! {
    /// Aspects of an image addressed by views and barriers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ImageAspect: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
    }
}

/// Everything a device needs to allocate one graph image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageDescriptor {
    /// Resource key the image was created for.
    pub label: Option<String>,
    pub extent: Extent2d,
    pub format: TextureFormat,
    pub sample_count: u32,
    pub usage: TextureUsage,
    /// Aspects covered by the default view.
    pub aspect: ImageAspect,
}

impl ImageDescriptor {
    /// Single-sampled color image.
    pub fn new(extent: Extent2d, format: TextureFormat, usage: TextureUsage) -> Self {
        Self {
            label: None,
            extent,
            format,
            sample_count: 1,
            usage,
            aspect: ImageAspect::COLOR,
        }
    }

    /// Depth attachment that later passes can sample.
    pub fn depth(extent: Extent2d) -> Self {
        Self {
            aspect: ImageAspect::DEPTH,
            ..Self::new(
                extent,
                TextureFormat::Depth32Float,
                TextureUsage::RENDER_ATTACHMENT | TextureUsage::TEXTURE_BINDING,
            )
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Allocation size in bytes, ignoring alignment.
    pub fn byte_size(&self) -> u64 {
        self.extent.area() * self.format.block_size() as u64 * self.sample_count as u64
    }
}
