use super::Vec3;

use std::ops::Mul;

/// A unit rotation quaternion `q = w + xi + yj + zk`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Quaternion {
        Quaternion { w, x, y, z }
    }

    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Quaternion {
        let axis = axis.normalized();
        let (sin, cos) = (angle / 2.0).sin_cos();
        Quaternion {
            w: cos,
            x: axis.x * sin,
            y: axis.y * sin,
            z: axis.z * sin,
        }
        .normalized()
    }

    pub fn dot(&self, other: Quaternion) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm_squared(&self) -> f32 {
        self.dot(*self)
    }

    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    pub fn normalized(&self) -> Quaternion {
        let norm = self.norm();
        if norm == 0.0 {
            return Quaternion::IDENTITY;
        }
        Quaternion::new(self.w / norm, self.x / norm, self.y / norm, self.z / norm)
    }

    /// The inverse rotation; equal to the inverse for unit quaternions.
    pub fn conjugate(&self) -> Quaternion {
        Quaternion::new(self.w, -self.x, -self.y, -self.z)
    }

    /// The imaginary (bivector) component.
    pub fn bivector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Applies this rotation to a vector.
    pub fn rotate(&self, vector: Vec3) -> Vec3 {
        let bivector = self.bivector();
        let t = bivector.cross(vector) * 2.0;
        vector + t * self.w + bivector.cross(t)
    }

    pub fn right(&self) -> Vec3 {
        self.rotate(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.rotate(Vec3::Y)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotate(Vec3::Z)
    }
}

impl Default for Quaternion {
    fn default() -> Quaternion {
        Quaternion::IDENTITY
    }
}

/// Hamilton product: the combined rotation applies `rhs` first, then `lhs`.
/// The result is re-normalized so compositions stay unit length.
impl Mul for Quaternion {
    type Output = Quaternion;
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
        .normalized()
    }
}
