//! Concrete resources bound to node slots after compilation.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::backend::{GpuBuffer, GpuImage};
use crate::scene::{Camera, Object, Scene, Tlas};

use super::ResourceType;

/// The object a resource is bound to.
#[derive(Debug, Clone)]
pub enum ResourceKind {
    Image(Arc<GpuImage>),
    DepthImage(Arc<GpuImage>),
    ImageArray(Vec<Arc<GpuImage>>),
    Buffer(Arc<GpuBuffer>),
    Camera(Arc<RwLock<Camera>>),
    Objects(Arc<Vec<Object>>),
    Scene(Arc<Scene>),
    Tlas(Arc<Tlas>),
}

impl ResourceKind {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Self::Image(_) => ResourceType::Image,
            Self::DepthImage(_) => ResourceType::DepthImage,
            Self::ImageArray(_) => ResourceType::ImageArray,
            Self::Buffer(_) => ResourceType::Buffer,
            Self::Camera(_) => ResourceType::Camera,
            Self::Objects(_) => ResourceType::Objects,
            Self::Scene(_) => ResourceType::Scene,
            Self::Tlas(_) => ResourceType::Tlas,
        }
    }
}

/// A named resource shared between the producing node and its consumers.
#[derive(Debug)]
pub struct Resource {
    name: String,
    kind: ResourceKind,
}

macro_rules! typed_access {
    ($get:ident, $try_get:ident, $variant:ident, $ty:ty) => {
        /// Typed access; panics if the resource holds another kind.
        pub fn $get(&self) -> &$ty {
            match self.$try_get() {
                Some(value) => value,
                None => panic!(
                    "resource '{}' is {}, not {}",
                    self.name,
                    self.resource_type(),
                    ResourceType::$variant
                ),
            }
        }

        pub fn $try_get(&self) -> Option<&$ty> {
            match &self.kind {
                ResourceKind::$variant(value) => Some(value),
                _ => None,
            }
        }
    };
}

impl Resource {
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    pub fn resource_type(&self) -> ResourceType {
        self.kind.resource_type()
    }

    typed_access!(image, try_image, Image, Arc<GpuImage>);
    typed_access!(depth_image, try_depth_image, DepthImage, Arc<GpuImage>);
    typed_access!(image_array, try_image_array, ImageArray, Vec<Arc<GpuImage>>);
    typed_access!(buffer, try_buffer, Buffer, Arc<GpuBuffer>);
    typed_access!(camera, try_camera, Camera, Arc<RwLock<Camera>>);
    typed_access!(objects, try_objects, Objects, Arc<Vec<Object>>);
    typed_access!(scene, try_scene, Scene, Arc<Scene>);
    typed_access!(tlas, try_tlas, Tlas, Arc<Tlas>);

    /// Images that live in the graph's working layout between passes.
    pub fn working_images(&self) -> &[Arc<GpuImage>] {
        match &self.kind {
            ResourceKind::Image(image) => std::slice::from_ref(image),
            ResourceKind::ImageArray(images) => images,
            _ => &[],
        }
    }
}
