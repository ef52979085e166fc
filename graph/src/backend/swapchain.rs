//! Presentation target of the render graph.

use std::sync::Arc;

use crate::error::{BackendError, BackendResult};
use crate::types::{Extent2d, ImageDescriptor, TextureFormat, TextureUsage};

use super::{GpuDevice, GpuImage};

/// A set of presentable images with a shared extent.
#[derive(Debug)]
pub struct Swapchain {
    extent: Extent2d,
    format: TextureFormat,
    images: Vec<Arc<GpuImage>>,
}

impl Swapchain {
    /// Create a swapchain with `image_count` images.
    pub fn new(device: &dyn GpuDevice, extent: Extent2d, image_count: usize) -> BackendResult<Self> {
        if image_count == 0 {
            return Err(BackendError::SwapchainCreationFailed(
                "image count must be at least 1".to_string(),
            ));
        }
        let format = TextureFormat::Bgra8UnormSrgb;
        let images = (0..image_count)
            .map(|index| {
                device.create_image(
                    &ImageDescriptor::new(
                        extent,
                        format,
                        TextureUsage::COPY_DST | TextureUsage::RENDER_ATTACHMENT,
                    )
                    .with_label(format!("swapchain-{index}")),
                )
            })
            .collect::<BackendResult<Vec<_>>>()?;

        log::debug!(
            "Created swapchain {}x{} with {} images",
            extent.width,
            extent.height,
            image_count
        );
        Ok(Self {
            extent,
            format,
            images,
        })
    }

    pub fn extent(&self) -> Extent2d {
        self.extent
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Image that frame slot `index` renders into.
    pub fn image(&self, index: usize) -> &Arc<GpuImage> {
        &self.images[index % self.images.len()]
    }
}
