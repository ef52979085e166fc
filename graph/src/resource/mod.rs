//! Resource model of the render graph.
//!
//! Resources are the typed slots through which nodes exchange data. Every
//! node type declares a fixed list of [`ResourceSpecification`]s; an editor
//! node materialises them into [`ResourceDescription`]s with fresh ids, and
//! compilation binds each connected slot to a concrete [`Resource`].
//!
//! | Type | Bound to | Created by |
//! |------|----------|------------|
//! | `Image`, `DepthImage`, `ImageArray` | GPU images | device at compile |
//! | `Buffer` | GPU buffer | device at compile |
//! | `Camera`, `Objects`, `Tlas`, `Scene` | scene data | graph context scene |
//!
//! Role and type never change after a description is created. Only the
//! binding changes when the graph is recompiled.

mod bound;
mod specification;

use std::fmt;

pub use bound::{Resource, ResourceKind};
pub use specification::{ResourceDescription, ResourceSpecification};

/// Direction of a resource slot on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceRole {
    Input,
    Output,
}

impl fmt::Display for ResourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Output => write!(f, "Output"),
        }
    }
}

/// Type of data carried by a resource slot.
///
/// Two slots are compatible only when their types are equal. `Image` and
/// `DepthImage` are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    Buffer,
    Camera,
    DepthImage,
    Image,
    ImageArray,
    Objects,
    Scene,
    Tlas,
    Unknown,
}

impl ResourceType {
    /// Types backed by GPU images.
    pub fn is_gpu_resource(&self) -> bool {
        matches!(self, Self::Image | Self::DepthImage | Self::ImageArray)
    }

    /// Types produced from the active scene rather than allocated.
    pub fn is_scene_resource(&self) -> bool {
        matches!(self, Self::Camera | Self::Objects | Self::Scene | Self::Tlas)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buffer => "Buffer",
            Self::Camera => "Camera",
            Self::DepthImage => "Depth Image",
            Self::Image => "Image",
            Self::ImageArray => "Image Array",
            Self::Objects => "Objects",
            Self::Scene => "Scene",
            Self::Tlas => "TLAS",
            Self::Unknown => "Unknown",
        }
    }

    /// Pin colour in the graph editor.
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Buffer => [251, 191, 36],
            Self::Camera => [236, 72, 153],
            Self::DepthImage => [20, 184, 166],
            Self::Image => [59, 130, 246],
            Self::Objects => [244, 63, 94],
            Self::Scene => [14, 165, 233],
            Self::Tlas => [217, 70, 239],
            Self::ImageArray | Self::Unknown => [128, 128, 128],
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
