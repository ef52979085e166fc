//! GPU boundary used by the render graph.
//!
//! The graph never talks to a graphics API directly. It creates objects
//! through a [`GpuDevice`] and records work into a [`CommandBuffer`]; a
//! concrete API binding implements the device and replays the commands.
//!
//! | Type | Role |
//! |------|------|
//! | [`GpuDevice`] | Creates images, buffers and pipelines |
//! | [`DummyDevice`] | Headless device used by tests and the app |
//! | [`Swapchain`] | Presentation images and extent |
//! | [`CommandBuffer`] | Recorded command stream for one frame |
//! | [`FrameContext`] | Command buffer plus frame indices |

mod command;
mod device;
mod dummy;
mod swapchain;
mod types;

pub use command::{Command, CommandBuffer, FrameContext};
pub use device::GpuDevice;
pub use dummy::DummyDevice;
pub use swapchain::Swapchain;
pub use types::{
    BufferHandle, GpuBuffer, GpuImage, GpuPipeline, ImageHandle, ImageLayout, PipelineDescriptor,
    PipelineHandle, PipelineKind,
};
