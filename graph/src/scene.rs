//! Scene data consumed by the render graph.
//!
//! The scene is owned by the host and shared with the graph through the
//! [`GraphContext`](crate::GraphContext). The `SceneProvider` node exposes its
//! parts as graph resources: the object list, the camera, the top-level
//! acceleration structure and the scene itself.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use parking_lot::RwLock;

/// A perspective camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a camera looking from `position` at `target`.
    pub fn look_at(position: Vec3, target: Vec3, aspect: f32) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y: 60f32.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// GPU layout of the camera.
    pub fn uniform(&self) -> CameraUniform {
        let view = self.view();
        let projection = self.projection();
        CameraUniform {
            view_projection: (projection * view).to_cols_array_2d(),
            inverse_view: view.inverse().to_cols_array_2d(),
            inverse_projection: projection.inverse().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::look_at(Vec3::new(0.0, 2.0, 6.0), Vec3::ZERO, 16.0 / 9.0)
    }
}

/// Camera data as uploaded to the uniform buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    pub inverse_view: [[f32; 4]; 4],
    pub inverse_projection: [[f32; 4]; 4],
    pub position: [f32; 4],
}

/// A renderable object.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub name: String,
    pub transform: Mat4,
    pub vertex_count: u32,
}

impl Object {
    pub fn new(name: impl Into<String>, transform: Mat4, vertex_count: u32) -> Self {
        Self {
            name: name.into(),
            transform,
            vertex_count,
        }
    }
}

/// Instance record of the top-level acceleration structure.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TlasInstance {
    /// Row-major 3x4 object-to-world transform.
    pub transform: [f32; 12],
    pub custom_index: u32,
    pub mask: u32,
}

/// Top-level acceleration structure over the scene objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Tlas {
    instances: Vec<TlasInstance>,
}

impl Tlas {
    /// Build instance records for `objects`.
    pub fn build(objects: &[Object]) -> Self {
        let instances = objects
            .iter()
            .enumerate()
            .map(|(index, object)| {
                let rows = object.transform.transpose().to_cols_array();
                let mut transform = [0.0; 12];
                transform.copy_from_slice(&rows[..12]);
                TlasInstance {
                    transform,
                    custom_index: index as u32,
                    mask: 0xff,
                }
            })
            .collect();
        Self { instances }
    }

    pub fn instances(&self) -> &[TlasInstance] {
        &self.instances
    }

    /// Instance records as uploaded to the GPU.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

/// The active scene.
#[derive(Debug)]
pub struct Scene {
    objects: Arc<Vec<Object>>,
    camera: Arc<RwLock<Camera>>,
    tlas: Arc<Tlas>,
}

impl Scene {
    pub fn new(objects: Vec<Object>, camera: Camera) -> Self {
        let tlas = Arc::new(Tlas::build(&objects));
        Self {
            objects: Arc::new(objects),
            camera: Arc::new(RwLock::new(camera)),
            tlas,
        }
    }

    /// A small scene of three cubes on a ground plane.
    pub fn demo() -> Self {
        let objects = vec![
            Object::new(
                "ground",
                Mat4::from_scale(Vec3::new(10.0, 0.1, 10.0)),
                36,
            ),
            Object::new("cube-left", Mat4::from_translation(Vec3::new(-2.0, 1.0, 0.0)), 36),
            Object::new("cube-center", Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)), 36),
            Object::new("cube-right", Mat4::from_translation(Vec3::new(2.0, 1.0, 0.0)), 36),
        ];
        Self::new(objects, Camera::default())
    }

    pub fn objects(&self) -> &Arc<Vec<Object>> {
        &self.objects
    }

    /// Shared camera; the host may move it between frames.
    pub fn camera(&self) -> &Arc<RwLock<Camera>> {
        &self.camera
    }

    pub fn tlas(&self) -> &Arc<Tlas> {
        &self.tlas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tlas_has_one_instance_per_object() {
        let scene = Scene::demo();
        assert_eq!(scene.tlas().instances().len(), scene.objects().len());
        assert_eq!(
            scene.tlas().as_bytes().len(),
            scene.objects().len() * std::mem::size_of::<TlasInstance>()
        );
    }

    #[test]
    fn test_tlas_transform_translation() {
        let tlas = Tlas::build(&[Object::new(
            "moved",
            Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            3,
        )]);
        let transform = tlas.instances()[0].transform;
        assert_eq!([transform[3], transform[7], transform[11]], [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_camera_uniform_position() {
        let camera = Camera::look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 1.0);
        let uniform = camera.uniform();
        assert_eq!(uniform.position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(
            bytemuck::bytes_of(&uniform).len(),
            std::mem::size_of::<CameraUniform>()
        );
    }
}
