use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Threshold below which a value is considered zero.
pub const ALMOST_ZERO: f32 = 8e-7;

pub fn almost_zero(value: f32) -> bool {
    -ALMOST_ZERO < value && value < ALMOST_ZERO
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3 { x, y, z }
    }
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub fn dot(&self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn norm_squared(&self) -> f32 {
        self.dot(*self)
    }

    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Returns the zero vector when the magnitude is nearly zero.
    pub fn normalized(&self) -> Vec3 {
        let squared = self.norm_squared();
        if almost_zero(squared) {
            return Vec3::ZERO;
        }
        *self / squared.sqrt()
    }

    pub fn lerp(&self, other: Vec3, t: f32) -> Vec3 {
        *self + (other - *self) * t
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Vec3) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Vec3) {
        *self = *self - other;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, other: f32) -> Vec3 {
        Vec3::new(self.x * other, self.y * other, self.z * other)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;
    fn mul(self, other: Vec3) -> Vec3 {
        other * self
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    fn div(self, other: f32) -> Vec3 {
        Vec3::new(self.x / other, self.y / other, self.z / other)
    }
}

/// A homogeneous 4-vector. Positions carry `w = 1`, directions `w = 0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
        Vec4 { x, y, z, w }
    }
    pub const fn point(x: f32, y: f32, z: f32) -> Vec4 {
        Vec4::new(x, y, z, 1.0)
    }
    pub const fn direction(x: f32, y: f32, z: f32) -> Vec4 {
        Vec4::new(x, y, z, 0.0)
    }
    pub const ZERO: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.0);
    pub const ORIGIN: Vec4 = Vec4::point(0.0, 0.0, 0.0);

    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Dot product over x, y, z. `w` is carried through arithmetic but never
    /// measured.
    pub fn dot(&self, other: Vec4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm_squared(&self) -> f32 {
        self.dot(*self)
    }

    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Normalizes x, y, z and preserves `w`. Returns the zero vector (with
    /// `w` preserved) when the magnitude is nearly zero.
    pub fn normalized(&self) -> Vec4 {
        let squared = self.norm_squared();
        if almost_zero(squared) {
            return Vec4::new(0.0, 0.0, 0.0, self.w);
        }
        let inverse = 1.0 / squared.sqrt();
        Vec4::new(self.x * inverse, self.y * inverse, self.z * inverse, self.w)
    }

    pub fn lerp(&self, other: Vec4, t: f32) -> Vec4 {
        *self + (other - *self) * t
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    fn add(self, other: Vec4) -> Vec4 {
        Vec4::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl Sub for Vec4 {
    type Output = Vec4;
    fn sub(self, other: Vec4) -> Vec4 {
        Vec4::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl Neg for Vec4 {
    type Output = Vec4;
    fn neg(self) -> Vec4 {
        Vec4::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;
    fn mul(self, other: f32) -> Vec4 {
        Vec4::new(
            self.x * other,
            self.y * other,
            self.z * other,
            self.w * other,
        )
    }
}

impl Mul<Vec4> for f32 {
    type Output = Vec4;
    fn mul(self, other: Vec4) -> Vec4 {
        other * self
    }
}

impl Div<f32> for Vec4 {
    type Output = Vec4;
    fn div(self, other: f32) -> Vec4 {
        Vec4::new(
            self.x / other,
            self.y / other,
            self.z / other,
            self.w / other,
        )
    }
}

impl From<Vec3> for Vec4 {
    fn from(v: Vec3) -> Vec4 {
        Vec4::point(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_dot_and_cross() {
        let x = Vec3::X;
        let y = Vec3::Y;
        assert_eq!(x.dot(y), 0.0);
        assert_eq!(x.cross(y), Vec3::Z);
        assert_eq!(y.cross(x), -Vec3::Z);
    }

    #[test]
    fn test_normalize_returns_zero_for_tiny_input() {
        let tiny = Vec3::new(1e-8, -1e-8, 0.0);
        assert_eq!(tiny.normalized(), Vec3::ZERO);
        let v = Vec3::new(3.0, 0.0, 4.0).normalized();
        assert!((v.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_homogeneous_arithmetic() {
        let a = Vec4::point(1.0, 2.0, 3.0);
        let b = Vec4::point(4.0, 4.0, 4.0);
        let difference = b - a;
        // point minus point yields a direction
        assert_eq!(difference.w, 0.0);
        assert_eq!(a.dot(b), 4.0 + 8.0 + 12.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let b = Vec4::new(2.0, -2.0, 4.0, 3.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert_eq!(mid, Vec4::new(1.0, -1.0, 2.0, 2.0));
    }

    #[test]
    fn test_vec4_normalized_preserves_w() {
        let n = Vec4::direction(0.0, 3.0, 0.0).normalized();
        assert_eq!(n, Vec4::direction(0.0, 1.0, 0.0));
        let p = Vec4::point(0.0, 0.0, 2.0).normalized();
        assert_eq!(p.w, 1.0);
    }
}
