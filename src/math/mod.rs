mod matrix;
mod quaternion;
mod vec;

pub use matrix::Matrix4;
pub use quaternion::Quaternion;
pub use vec::{almost_zero, Vec3, Vec4, ALMOST_ZERO};
