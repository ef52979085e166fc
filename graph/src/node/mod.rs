//! Node abstraction and the closed set of node types.
//!
//! A node is a unit of rendering work with a fixed list of input and output
//! slots. The list is decided by its [`NodeType`]; editing a graph only
//! changes which slots are connected.
//!
//! # Lifecycle
//!
//! ```text
//! NodeFactory::create ──► set_resource (per slot) ──► initialize (once)
//!                                                         │
//!                                     execute (per frame) ◄┘
//! ```
//!
//! `initialize` allocates pipelines and private buffers. `execute` only
//! records barriers, descriptor updates and draw/dispatch/trace commands
//! against resources already bound to the node.

mod bindings;
mod factory;
mod options;
pub mod passes;

use std::fmt;
use std::sync::Arc;

use crate::backend::FrameContext;
use crate::error::NodeError;
use crate::resource::{Resource, ResourceSpecification, ResourceType};
use crate::types::{Extent2d, TextureFormat};

pub use bindings::NodeBindings;
pub use factory::NodeFactory;
pub use options::{
    AmbientOcclusionMode, AmbientOcclusionOptions, BloomOptions, BlurOptions, LightingOptions,
    NodeOptions,
};

use ResourceType as T;

/// Kinds of nodes the graph can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    SceneProvider,
    AmbientOcclusion,
    AntiAliasing,
    Bloom,
    GaussianBlur,
    GBufferPass,
    LightingPass,
    RayTracing,
    Present,
    HairRenderer,
    Unknown,
}

/// Title and hover colours of a node in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeColor {
    pub title: [u8; 3],
    pub hover: [u8; 3],
}

impl NodeColor {
    const fn new(title: [u8; 3], hover: [u8; 3]) -> Self {
        Self { title, hover }
    }
}

const SCENE_PROVIDER: &[ResourceSpecification] = &[
    ResourceSpecification::output("Objects", T::Objects),
    ResourceSpecification::output("Camera", T::Camera),
    ResourceSpecification::output("TLAS", T::Tlas),
    ResourceSpecification::output("Scene", T::Scene),
];

const RAY_TRACING: &[ResourceSpecification] = &[
    ResourceSpecification::input("Objects", T::Objects),
    ResourceSpecification::input("Camera", T::Camera),
    ResourceSpecification::input("TLAS", T::Tlas),
    ResourceSpecification::output("Output", T::Image),
];

const PRESENT: &[ResourceSpecification] = &[ResourceSpecification::input("Final Image", T::Image)];

const AMBIENT_OCCLUSION: &[ResourceSpecification] = &[
    ResourceSpecification::input("Position Buffer", T::Image),
    ResourceSpecification::input("Normal Buffer", T::Image),
    ResourceSpecification::input("Camera", T::Camera),
    ResourceSpecification::input("TLAS", T::Tlas),
    ResourceSpecification::output("AO Image", T::Image).with_format(TextureFormat::R32Float),
];

const ANTI_ALIASING: &[ResourceSpecification] = &[
    ResourceSpecification::input("Anti-Aliasing Input", T::Image),
    ResourceSpecification::output("Anti-Aliasing Output", T::Image).with_format(TextureFormat::Rgba16Float),
];

const GAUSSIAN_BLUR: &[ResourceSpecification] = &[
    ResourceSpecification::input("Blur Input", T::Image),
    ResourceSpecification::output("Blur Output", T::Image),
];

const BLOOM: &[ResourceSpecification] = &[
    ResourceSpecification::input("Bloom Input", T::Image),
    ResourceSpecification::output("Bloom Output", T::Image),
];

const GBUFFER: &[ResourceSpecification] = &[
    ResourceSpecification::input("Scene Data", T::Scene),
    ResourceSpecification::output("Position", T::Image),
    ResourceSpecification::output("Normal", T::Image),
    ResourceSpecification::output("Albedo", T::Image).with_format(TextureFormat::Rgba8Unorm),
    ResourceSpecification::output("Depth", T::DepthImage),
    ResourceSpecification::output("Motion Vectors", T::Image).with_format(TextureFormat::Rgba16Float),
];

const LIGHTING: &[ResourceSpecification] = &[
    ResourceSpecification::input("Position", T::Image),
    ResourceSpecification::input("Normal", T::Image),
    ResourceSpecification::input("Albedo", T::Image),
    ResourceSpecification::input("Depth Image", T::DepthImage),
    ResourceSpecification::input("Camera", T::Camera),
    ResourceSpecification::input("TLAS", T::Tlas),
    ResourceSpecification::input("AO Image", T::Image).optional(),
    ResourceSpecification::input("AA Image", T::Image).optional(),
    ResourceSpecification::input("Shadow Maps", T::ImageArray).optional(),
    ResourceSpecification::output("Lighting Result", T::Image),
];

const HAIR_RENDERER: &[ResourceSpecification] = &[
    ResourceSpecification::input("Scene Data", T::Scene),
    ResourceSpecification::output("Output", T::Image),
    ResourceSpecification::output("Depth", T::DepthImage),
];

impl NodeType {
    /// Every instantiable node type.
    pub const ALL: [NodeType; 10] = [
        NodeType::SceneProvider,
        NodeType::AmbientOcclusion,
        NodeType::AntiAliasing,
        NodeType::Bloom,
        NodeType::GaussianBlur,
        NodeType::GBufferPass,
        NodeType::LightingPass,
        NodeType::RayTracing,
        NodeType::Present,
        NodeType::HairRenderer,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SceneProvider => "Scene Provider",
            Self::AmbientOcclusion => "Ambient Occlusion",
            Self::AntiAliasing => "Anti-Aliasing",
            Self::Bloom => "Bloom",
            Self::GaussianBlur => "Gaussian Blur",
            Self::GBufferPass => "G-Buffer",
            Self::LightingPass => "Lighting",
            Self::RayTracing => "Ray Tracing",
            Self::Present => "Present",
            Self::HairRenderer => "Hair Renderer",
            Self::Unknown => "Unknown",
        }
    }

    /// Editor colours, grouped by the kind of work the node does.
    pub fn color(&self) -> NodeColor {
        match self {
            Self::AmbientOcclusion => NodeColor::new([220, 38, 38], [248, 113, 113]),
            Self::AntiAliasing => NodeColor::new([101, 163, 13], [163, 230, 53]),
            Self::GaussianBlur | Self::Bloom => NodeColor::new([8, 145, 178], [34, 211, 238]),
            Self::GBufferPass | Self::HairRenderer => NodeColor::new([79, 70, 229], [129, 140, 248]),
            Self::LightingPass => NodeColor::new([217, 119, 6], [251, 191, 36]),
            Self::Present => NodeColor::new([192, 38, 211], [232, 121, 249]),
            Self::SceneProvider => NodeColor::new([37, 99, 235], [96, 165, 250]),
            Self::RayTracing => NodeColor::new([124, 58, 237], [167, 139, 250]),
            Self::Unknown => NodeColor::new([128, 128, 128], [160, 160, 160]),
        }
    }

    /// Slots declared by this node type. Empty for `Unknown`.
    pub fn resource_specs(&self) -> &'static [ResourceSpecification] {
        match self {
            Self::SceneProvider => SCENE_PROVIDER,
            Self::AmbientOcclusion => AMBIENT_OCCLUSION,
            Self::AntiAliasing => ANTI_ALIASING,
            Self::Bloom => BLOOM,
            Self::GaussianBlur => GAUSSIAN_BLUR,
            Self::GBufferPass => GBUFFER,
            Self::LightingPass => LIGHTING,
            Self::RayTracing => RAY_TRACING,
            Self::Present => PRESENT,
            Self::HairRenderer => HAIR_RENDERER,
            Self::Unknown => &[],
        }
    }

    /// Look up a declared slot by name.
    pub fn spec(&self, name: &str) -> Option<&'static ResourceSpecification> {
        self.resource_specs().iter().find(|spec| spec.name == name)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A runtime node of a compiled render path.
pub trait Node: Send {
    fn name(&self) -> &str;

    fn node_type(&self) -> NodeType;

    fn bindings(&self) -> &NodeBindings;

    fn bindings_mut(&mut self) -> &mut NodeBindings;

    /// Bind `resource` to the slot named `key`.
    ///
    /// Returns false when the slot is not declared or the type differs.
    fn set_resource(&mut self, key: &str, resource: Arc<Resource>) -> bool {
        self.bindings_mut().bind(key, resource)
    }

    /// Allocate GPU objects. Called once, after all slots are bound.
    fn initialize(&mut self) -> Result<(), NodeError>;

    /// Record this node's work for one frame.
    fn execute(&mut self, frame: &mut FrameContext) -> Result<(), NodeError>;
}

/// Workgroup count covering `extent` with square groups of `local` threads.
pub fn dispatch_size(extent: Extent2d, local: u32) -> [u32; 3] {
    [extent.width.div_ceil(local), extent.height.div_ceil(local), 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slot_names_unique_per_type() {
        for ty in NodeType::ALL {
            let names: HashSet<_> = ty.resource_specs().iter().map(|s| s.name).collect();
            assert_eq!(names.len(), ty.resource_specs().len(), "{ty}");
        }
    }

    #[test]
    fn test_unknown_has_no_slots() {
        assert!(NodeType::Unknown.resource_specs().is_empty());
        assert!(!NodeType::ALL.contains(&NodeType::Unknown));
    }

    #[test]
    fn test_lighting_optional_inputs() {
        let optional: Vec<_> = NodeType::LightingPass
            .resource_specs()
            .iter()
            .filter(|s| s.optional)
            .map(|s| s.name)
            .collect();
        assert_eq!(optional, ["AO Image", "AA Image", "Shadow Maps"]);
    }

    #[test]
    fn test_ray_tracing_output_spec() {
        let spec = NodeType::RayTracing.spec("Output").unwrap();
        assert!(spec.is_output());
        assert_eq!(spec.resource_type, ResourceType::Image);
        assert!(NodeType::RayTracing.spec("Missing").is_none());
    }

    #[test]
    fn test_dispatch_size_rounds_up() {
        assert_eq!(dispatch_size(Extent2d::new(17, 8), 8), [3, 1, 1]);
    }
}
