mod light;
mod material;

pub use light::{Light, LightCollection};
pub use material::Material;

use crate::geometry::Mesh;
use crate::math::{Matrix4, Quaternion, Vec4};

use std::sync::Arc;

#[derive(Copy, Clone, Debug)]
pub struct Camera {
    pub position: Vec4,
    pub rotation: Quaternion,
}

impl Camera {
    /// World-to-view transform: the inverse of the camera's rigid placement.
    pub fn view_matrix(&self) -> Matrix4 {
        (Matrix4::translate(self.position) * Matrix4::rotate(&self.rotation)).quick_inverse()
    }
}

impl Default for Camera {
    fn default() -> Camera {
        Camera {
            position: Vec4::ORIGIN,
            rotation: Quaternion::IDENTITY,
        }
    }
}

/// A placed instance of a mesh with a material.
#[derive(Clone, Debug)]
pub struct Object {
    pub position: Vec4,
    pub rotation: Quaternion,
    pub scale: Vec4,
    pub mesh: Arc<Mesh>,
    pub material: Arc<Material>,
}

impl Object {
    pub fn model_matrix(&self) -> Matrix4 {
        Matrix4::translate(self.position)
            * Matrix4::rotate(&self.rotation)
            * Matrix4::scale(self.scale)
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    /// Horizontal field of view in degrees.
    pub fov: f32,
    pub camera: Camera,
    pub lights: LightCollection,
    pub objects: Vec<Object>,
}

impl Scene {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn test_view_matrix_inverts_camera_placement() {
        let camera = Camera {
            position: Vec4::point(1.0, 2.0, 3.0),
            rotation: Quaternion::from_axis_angle(Vec3::Y, 0.5),
        };
        let view = camera.view_matrix();
        // the camera's own position maps to the view-space origin
        let origin = view * camera.position;
        assert!(origin.xyz().norm() < 1e-5);
        assert!((origin.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_camera_view_is_identity() {
        let view = Camera::default().view_matrix();
        let point = Vec4::point(0.5, -0.5, -3.0);
        let mapped = view * point;
        assert!((mapped - point).norm() < 1e-6);
    }

    #[test]
    fn test_model_matrix_scales_before_rotating_and_translating() {
        let object_transform = Matrix4::translate(Vec4::point(5.0, 0.0, 0.0))
            * Matrix4::rotate(&Quaternion::from_axis_angle(
                Vec3::Z,
                std::f32::consts::PI / 2.0,
            ))
            * Matrix4::scale(Vec4::direction(2.0, 1.0, 1.0));
        // unit x scales to length 2, rotates onto +y, then translates
        let mapped = object_transform * Vec4::point(1.0, 0.0, 0.0);
        assert!((mapped - Vec4::point(5.0, 2.0, 0.0)).norm() < 1e-5);
    }
}
