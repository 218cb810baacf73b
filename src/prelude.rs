pub use crate::color::{saturate, Color};
pub use crate::film::{DepthBuffer, Film};
pub use crate::math::{almost_zero, Matrix4, Quaternion, Vec3, Vec4};
