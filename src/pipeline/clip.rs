use super::VertexBuffer;

use crate::math::Vec4;

/// The six half-spaces bounding the homogeneous clip volume
/// `-w <= x, y, z <= w`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

/// Clipping order: -x, +x, -y, +y, -z, +z.
pub const CLIP_PLANES: [ClipPlane; 6] = [
    ClipPlane::Left,
    ClipPlane::Right,
    ClipPlane::Bottom,
    ClipPlane::Top,
    ClipPlane::Near,
    ClipPlane::Far,
];

impl ClipPlane {
    /// Signed distance in homogeneous coordinates; `d > 0` is inside.
    pub fn signed_distance(&self, clip: Vec4) -> f32 {
        match self {
            ClipPlane::Left => clip.w + clip.x,
            ClipPlane::Right => clip.w - clip.x,
            ClipPlane::Bottom => clip.w + clip.y,
            ClipPlane::Top => clip.w - clip.y,
            ClipPlane::Near => clip.w + clip.z,
            ClipPlane::Far => clip.w - clip.z,
        }
    }
}

/// Sutherland-Hodgman clipping of a convex polygon against the clip volume.
///
/// `polygon` holds vertex indices in winding order and is rewritten in
/// place. Boundary crossings append interpolated vertices to `vertices`;
/// a fully outside polygon comes back empty. Never fails.
pub fn sutherland_hodgman(polygon: &mut Vec<u32>, vertices: &mut VertexBuffer) {
    let mut input = Vec::with_capacity(polygon.len() + 4);

    for plane in CLIP_PLANES {
        if polygon.is_empty() {
            return;
        }
        std::mem::swap(&mut input, polygon);
        polygon.clear();

        let mut start = *input.last().unwrap();
        let mut start_distance = plane.signed_distance(vertices[start].clip);
        for &end in &input {
            let end_distance = plane.signed_distance(vertices[end].clip);
            let start_inside = start_distance > 0.0;
            let end_inside = end_distance > 0.0;

            if start_inside != end_inside {
                let t = start_distance / (start_distance - end_distance);
                polygon.push(vertices.lerp_append(start, end, t));
            }
            if end_inside {
                polygon.push(end);
            }

            start = end;
            start_distance = end_distance;
        }
        input.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{Matrix4, Vec3};
    use crate::pipeline::Vertex;

    fn project_triangle(points: [Vec4; 3]) -> (Vec<u32>, VertexBuffer) {
        let projection = Matrix4::perspective_projection(90.0, 1.0, 0.1, 100.0);
        let mut vertices = VertexBuffer::with_capacity(3);
        let mut polygon = Vec::new();
        for point in points {
            polygon.push(vertices.push(Vertex {
                world: point,
                normal: Vec4::direction(0.0, 0.0, 1.0),
                clip: projection * point,
                texcoord: Vec3::ZERO,
                screen: Vec3::ZERO,
            }));
        }
        (polygon, vertices)
    }

    fn assert_contained(polygon: &[u32], vertices: &VertexBuffer) {
        for &index in polygon {
            let clip = vertices[index].clip;
            let bound = clip.w + 1e-4;
            assert!(clip.x.abs() <= bound, "{:?} outside x", clip);
            assert!(clip.y.abs() <= bound, "{:?} outside y", clip);
            assert!(clip.z.abs() <= bound, "{:?} outside z", clip);
        }
    }

    #[test]
    fn test_fully_inside_polygon_is_unchanged() {
        let (mut polygon, mut vertices) = project_triangle([
            Vec4::point(-0.5, -0.5, -2.0),
            Vec4::point(0.5, -0.5, -2.0),
            Vec4::point(0.0, 0.5, -2.0),
        ]);
        sutherland_hodgman(&mut polygon, &mut vertices);
        assert_eq!(polygon, vec![0, 1, 2]);
        assert_eq!(vertices.len(), 3);
    }

    #[test]
    fn test_fully_outside_polygon_becomes_empty() {
        // entirely to the right of the frustum
        let (mut polygon, mut vertices) = project_triangle([
            Vec4::point(10.0, 0.0, -2.0),
            Vec4::point(11.0, 0.0, -2.0),
            Vec4::point(10.0, 1.0, -2.0),
        ]);
        sutherland_hodgman(&mut polygon, &mut vertices);
        assert!(polygon.is_empty());
    }

    #[test]
    fn test_one_vertex_past_the_near_boundary_yields_a_quad() {
        // two vertices lie well inside; the apex sits nearer than the near
        // boundary so exactly one plane cuts the triangle
        let (mut polygon, mut vertices) = project_triangle([
            Vec4::point(-0.5, -0.5, -1.0),
            Vec4::point(0.5, -0.5, -1.0),
            Vec4::point(0.0, 0.001, -0.01),
        ]);
        sutherland_hodgman(&mut polygon, &mut vertices);
        assert_eq!(polygon.len(), 4);
        assert_contained(&polygon, &vertices);
        // fan triangulation of a quad yields two triangles
        assert_eq!(polygon.len() - 2, 2);
        // the two interpolated vertices were appended past the originals
        assert!(polygon.iter().filter(|&&index| index >= 3).count() == 2);
    }

    #[test]
    fn test_straddling_triangle_is_contained_after_clipping() {
        let (mut polygon, mut vertices) = project_triangle([
            Vec4::point(-4.0, -1.0, -2.0),
            Vec4::point(4.0, -1.0, -2.0),
            Vec4::point(0.0, 4.0, -2.0),
        ]);
        sutherland_hodgman(&mut polygon, &mut vertices);
        assert!(polygon.len() >= 3);
        assert_contained(&polygon, &vertices);
    }

    #[test]
    fn test_clipped_attributes_interpolate() {
        let projection = Matrix4::perspective_projection(90.0, 1.0, 0.1, 100.0);
        let mut vertices = VertexBuffer::with_capacity(3);
        let points = [
            Vec4::point(0.0, -0.5, -1.0),
            Vec4::point(4.0, -0.5, -1.0),
            Vec4::point(0.0, 0.5, -1.0),
        ];
        let mut polygon = Vec::new();
        for (index, point) in points.iter().enumerate() {
            polygon.push(vertices.push(Vertex {
                world: *point,
                normal: Vec4::direction(0.0, 0.0, 1.0),
                clip: projection * *point,
                texcoord: Vec3::new(index as f32, 0.0, 0.0),
                screen: Vec3::ZERO,
            }));
        }
        sutherland_hodgman(&mut polygon, &mut vertices);
        assert_contained(&polygon, &vertices);
        for &index in &polygon {
            if index >= 3 {
                // appended vertices interpolate between their endpoints
                let u = vertices[index].texcoord.x;
                assert!((0.0..=2.0).contains(&u));
                let world = vertices[index].world;
                assert!((world.w - 1.0).abs() < 1e-5);
            }
        }
    }
}
