//! Static slot declarations and their per-node descriptions.

use crate::id::ResourceId;
use crate::types::{Extent2d, ImageAspect, ImageDescriptor, TextureFormat, TextureUsage};

use super::{ResourceRole, ResourceType};

/// Declaration of one input or output slot of a node type.
///
/// Specifications are `const` so each node type can keep its slot list in a
/// static table. GPU fields are only meaningful for image and buffer types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpecification {
    pub name: &'static str,
    pub role: ResourceRole,
    pub resource_type: ResourceType,
    /// Optional inputs may stay unconnected.
    pub optional: bool,
    pub format: TextureFormat,
    pub usage: TextureUsage,
    pub aspect: ImageAspect,
    /// Fixed extent, or `None` for the render resolution.
    pub extent: Option<Extent2d>,
    pub sample_count: u32,
    /// Layer count of `ImageArray` slots.
    pub array_layers: u32,
    /// Size of `Buffer` slots in bytes.
    pub buffer_size: u64,
}

impl ResourceSpecification {
    const DEFAULT_USAGE: TextureUsage = TextureUsage::COPY_SRC
        .union(TextureUsage::TEXTURE_BINDING)
        .union(TextureUsage::STORAGE_BINDING);

    const fn new(name: &'static str, role: ResourceRole, resource_type: ResourceType) -> Self {
        let (format, aspect, usage) = match resource_type {
            ResourceType::DepthImage => (
                TextureFormat::Depth32Float,
                ImageAspect::DEPTH,
                TextureUsage::RENDER_ATTACHMENT.union(TextureUsage::TEXTURE_BINDING),
            ),
            _ => (TextureFormat::Rgba32Float, ImageAspect::COLOR, Self::DEFAULT_USAGE),
        };
        Self {
            name,
            role,
            resource_type,
            optional: false,
            format,
            usage,
            aspect,
            extent: None,
            sample_count: 1,
            array_layers: 1,
            buffer_size: 256,
        }
    }

    /// Declare an input slot.
    pub const fn input(name: &'static str, resource_type: ResourceType) -> Self {
        Self::new(name, ResourceRole::Input, resource_type)
    }

    /// Declare an output slot.
    pub const fn output(name: &'static str, resource_type: ResourceType) -> Self {
        Self::new(name, ResourceRole::Output, resource_type)
    }

    pub const fn with_format(self, format: TextureFormat) -> Self {
        Self { format, ..self }
    }

    /// Mark an input as optional.
    pub const fn optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }

    pub fn is_input(&self) -> bool {
        self.role == ResourceRole::Input
    }

    pub fn is_output(&self) -> bool {
        self.role == ResourceRole::Output
    }

    /// Image descriptor for this slot at the given render resolution.
    pub fn image_descriptor(&self, label: impl Into<String>, render_extent: Extent2d) -> ImageDescriptor {
        ImageDescriptor {
            label: Some(label.into()),
            extent: self.extent.unwrap_or(render_extent),
            format: self.format,
            sample_count: self.sample_count,
            usage: self.usage,
            aspect: self.aspect,
        }
    }
}

/// A slot materialised on an editor node.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDescription {
    pub(crate) id: ResourceId,
    pub(crate) spec: ResourceSpecification,
    /// True once an edge feeds this input.
    pub(crate) input_is_connected: bool,
}

impl ResourceDescription {
    pub fn new(id: ResourceId, spec: ResourceSpecification) -> Self {
        Self {
            id,
            spec,
            input_is_connected: false,
        }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Declared layout of the slot.
    pub fn spec(&self) -> &ResourceSpecification {
        &self.spec
    }

    /// Whether an edge currently feeds this input.
    pub fn is_connected(&self) -> bool {
        self.input_is_connected
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn role(&self) -> ResourceRole {
        self.spec.role
    }

    pub fn resource_type(&self) -> ResourceType {
        self.spec.resource_type
    }

    /// Key of the bound resource created for this slot.
    pub fn resource_key(&self) -> String {
        format!("{}-{}", self.spec.name, self.id.raw())
    }

    /// Whether `candidate` may feed this slot.
    ///
    /// Only an output can feed an input, and only with the exact same type.
    pub fn validate(&self, candidate: &ResourceDescription) -> bool {
        self.role() == ResourceRole::Input
            && candidate.role() == ResourceRole::Output
            && self.resource_type() == candidate.resource_type()
    }
}
