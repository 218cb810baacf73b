use super::{Quaternion, Vec3, Vec4};

use std::ops::Mul;

/// A column-major 4x4 matrix.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix4 {
    data: [f32; 16],
}

impl Matrix4 {
    pub const fn zero() -> Matrix4 {
        Matrix4 { data: [0.0; 16] }
    }

    pub fn identity() -> Matrix4 {
        let mut matrix = Matrix4::zero();
        matrix.data[0] = 1.0;
        matrix.data[5] = 1.0;
        matrix.data[10] = 1.0;
        matrix.data[15] = 1.0;
        matrix
    }

    pub fn at(&self, row: usize, col: usize) -> f32 {
        assert!(row < 4 && col < 4, "matrix access out of bounds");
        self.data[row + col * 4]
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut f32 {
        assert!(row < 4 && col < 4, "matrix access out of bounds");
        &mut self.data[row + col * 4]
    }

    pub fn translate(translation: Vec4) -> Matrix4 {
        let mut matrix = Matrix4::identity();
        *matrix.at_mut(0, 3) = translation.x;
        *matrix.at_mut(1, 3) = translation.y;
        *matrix.at_mut(2, 3) = translation.z;
        matrix
    }

    pub fn rotate(rotation: &Quaternion) -> Matrix4 {
        let (r, i, j, k) = (rotation.w, rotation.x, rotation.y, rotation.z);
        let mut matrix = Matrix4::identity();
        *matrix.at_mut(0, 0) = 1.0 - 2.0 * (j * j + k * k);
        *matrix.at_mut(0, 1) = 2.0 * (i * j - r * k);
        *matrix.at_mut(0, 2) = 2.0 * (i * k + r * j);
        *matrix.at_mut(1, 0) = 2.0 * (i * j + r * k);
        *matrix.at_mut(1, 1) = 1.0 - 2.0 * (i * i + k * k);
        *matrix.at_mut(1, 2) = 2.0 * (j * k - r * i);
        *matrix.at_mut(2, 0) = 2.0 * (i * k - r * j);
        *matrix.at_mut(2, 1) = 2.0 * (j * k + r * i);
        *matrix.at_mut(2, 2) = 1.0 - 2.0 * (i * i + j * j);
        matrix
    }

    pub fn scale(factors: Vec4) -> Matrix4 {
        let mut matrix = Matrix4::identity();
        *matrix.at_mut(0, 0) = factors.x;
        *matrix.at_mut(1, 1) = factors.y;
        *matrix.at_mut(2, 2) = factors.z;
        matrix
    }

    /// A rotation-translation matrix looking from `eye` to `target`.
    pub fn look_at(eye: Vec4, target: Vec4, up_direction: Vec3) -> Matrix4 {
        let forward = (eye - target).xyz().normalized();
        let left = up_direction.cross(forward).normalized();
        let up = forward.cross(left);

        let mut matrix = Matrix4::identity();
        *matrix.at_mut(0, 0) = left.x;
        *matrix.at_mut(0, 1) = left.y;
        *matrix.at_mut(0, 2) = left.z;
        *matrix.at_mut(1, 0) = up.x;
        *matrix.at_mut(1, 1) = up.y;
        *matrix.at_mut(1, 2) = up.z;
        *matrix.at_mut(2, 0) = forward.x;
        *matrix.at_mut(2, 1) = forward.y;
        *matrix.at_mut(2, 2) = forward.z;

        let eye = eye.xyz();
        *matrix.at_mut(0, 3) = -left.dot(eye);
        *matrix.at_mut(1, 3) = -up.dot(eye);
        *matrix.at_mut(2, 3) = -forward.dot(eye);
        matrix
    }

    /// Inverts a rotation-translation matrix by transposing the rotation
    /// block and reverse-rotating the negated translation. Only valid for
    /// rigid transforms.
    pub fn quick_inverse(&self) -> Matrix4 {
        let mut matrix = Matrix4::identity();
        for row in 0..3 {
            for col in 0..3 {
                *matrix.at_mut(row, col) = self.at(col, row);
            }
        }
        let translation = Vec3::new(self.at(0, 3), self.at(1, 3), self.at(2, 3));
        for row in 0..3 {
            let column = Vec3::new(self.at(0, row), self.at(1, row), self.at(2, row));
            *matrix.at_mut(row, 3) = -column.dot(translation);
        }
        matrix
    }

    /// A symmetric perspective frustum with a horizontal field of view.
    ///
    /// Takes view space to clip space with `w' = -z`; after the perspective
    /// divide, depth lands in `[0, 1]` between `near` and `far`.
    /// `fov` is measured in degrees, `aspect_ratio` is `width / height`, and
    /// `near`/`far` are distances along the negative z-axis.
    pub fn perspective_projection(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4 {
        let tangent = (fov.to_radians() / 2.0).tan();

        let mut matrix = Matrix4::zero();
        *matrix.at_mut(0, 0) = 1.0 / tangent;
        *matrix.at_mut(1, 1) = aspect_ratio / tangent;
        *matrix.at_mut(2, 2) = -far / (far - near);
        *matrix.at_mut(2, 3) = -(far * near) / (far - near);
        *matrix.at_mut(3, 2) = -1.0;
        matrix
    }

    /// An orthographic projection with the same `[0, 1]` depth convention as
    /// the perspective frustum.
    pub fn orthographic_projection(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix4 {
        let mut matrix = Matrix4::identity();
        *matrix.at_mut(0, 0) = 2.0 / (right - left);
        *matrix.at_mut(0, 3) = -(right + left) / (right - left);
        *matrix.at_mut(1, 1) = 2.0 / (top - bottom);
        *matrix.at_mut(1, 3) = -(top + bottom) / (top - bottom);
        *matrix.at_mut(2, 2) = -1.0 / (far - near);
        *matrix.at_mut(2, 3) = -near / (far - near);
        matrix
    }

    /// Maps NDC `[-1, 1]` to pixel coordinates with `(0, 0)` at the top
    /// left. The y-axis flips; z passes through.
    pub fn viewport(width: u32, height: u32) -> Matrix4 {
        let (w, h) = (width as f32, height as f32);
        let mut matrix = Matrix4::identity();
        *matrix.at_mut(0, 0) = w / 2.0;
        *matrix.at_mut(0, 3) = w / 2.0;
        *matrix.at_mut(1, 1) = -h / 2.0;
        *matrix.at_mut(1, 3) = h / 2.0;
        matrix
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;
    fn mul(self, rhs: Matrix4) -> Matrix4 {
        let mut matrix = Matrix4::zero();
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * rhs.at(k, col);
                }
                *matrix.at_mut(row, col) = sum;
            }
        }
        matrix
    }
}

impl Mul<Vec4> for Matrix4 {
    type Output = Vec4;
    fn mul(self, rhs: Vec4) -> Vec4 {
        Vec4::new(
            self.at(0, 0) * rhs.x + self.at(0, 1) * rhs.y + self.at(0, 2) * rhs.z + self.at(0, 3) * rhs.w,
            self.at(1, 0) * rhs.x + self.at(1, 1) * rhs.y + self.at(1, 2) * rhs.z + self.at(1, 3) * rhs.w,
            self.at(2, 0) * rhs.x + self.at(2, 1) * rhs.y + self.at(2, 2) * rhs.z + self.at(2, 3) * rhs.w,
            self.at(3, 0) * rhs.x + self.at(3, 1) * rhs.y + self.at(3, 2) * rhs.z + self.at(3, 3) * rhs.w,
        )
    }
}
