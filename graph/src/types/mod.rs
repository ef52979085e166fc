//! Common types and descriptors for graph resources.
//!
//! This module contains format enums, usage flags, and descriptor structs
//! shared by resource specifications and the GPU boundary.

mod buffer;
mod common;
mod texture;

pub use buffer::{BufferDescriptor, BufferUsage};
pub use common::Extent2d;
pub use texture::{ImageAspect, ImageDescriptor, TextureFormat, TextureUsage};
