//! Per-node settings edited in the graph editor.

use super::NodeType;

/// How ambient occlusion is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AmbientOcclusionMode {
    #[default]
    RayTraced,
    ScreenSpace,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientOcclusionOptions {
    pub mode: AmbientOcclusionMode,
    pub samples: u32,
    pub radius: f32,
}

impl Default for AmbientOcclusionOptions {
    fn default() -> Self {
        Self {
            mode: AmbientOcclusionMode::default(),
            samples: 4,
            radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightingOptions {
    pub use_ambient_occlusion: bool,
    pub ray_traced_shadows: bool,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            use_ambient_occlusion: true,
            ray_traced_shadows: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurOptions {
    /// Kernel radius in pixels.
    pub radius: u32,
}

impl Default for BlurOptions {
    fn default() -> Self {
        Self { radius: 4 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomOptions {
    pub threshold: f32,
    pub intensity: f32,
}

impl Default for BloomOptions {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            intensity: 0.8,
        }
    }
}

/// Settings carried from an editor node to the runtime node built from it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NodeOptions {
    #[default]
    None,
    AmbientOcclusion(AmbientOcclusionOptions),
    Lighting(LightingOptions),
    Blur(BlurOptions),
    Bloom(BloomOptions),
}

impl NodeOptions {
    /// Default settings for a node type.
    pub fn for_type(node_type: NodeType) -> Self {
        match node_type {
            NodeType::AmbientOcclusion => Self::AmbientOcclusion(AmbientOcclusionOptions::default()),
            NodeType::LightingPass => Self::Lighting(LightingOptions::default()),
            NodeType::GaussianBlur => Self::Blur(BlurOptions::default()),
            NodeType::Bloom => Self::Bloom(BloomOptions::default()),
            _ => Self::None,
        }
    }

    pub fn ambient_occlusion(&self) -> AmbientOcclusionOptions {
        match self {
            Self::AmbientOcclusion(options) => *options,
            _ => AmbientOcclusionOptions::default(),
        }
    }

    pub fn lighting(&self) -> LightingOptions {
        match self {
            Self::Lighting(options) => *options,
            _ => LightingOptions::default(),
        }
    }

    pub fn blur(&self) -> BlurOptions {
        match self {
            Self::Blur(options) => *options,
            _ => BlurOptions::default(),
        }
    }

    pub fn bloom(&self) -> BloomOptions {
        match self {
            Self::Bloom(options) => *options,
            _ => BloomOptions::default(),
        }
    }
}
