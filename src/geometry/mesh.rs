use crate::math::{Vec3, Vec4};

use std::error::Error;

/// An indexed triangle mesh.
///
/// The three attribute arrays run in lockstep: one index selects a position,
/// a texture coordinate, and a normal. `elements` holds three indices per
/// triangle.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub positions: Vec<Vec4>,
    pub texcoords: Vec<Vec3>,
    pub normals: Vec<Vec4>,
    pub elements: Vec<u32>,
}

impl Mesh {
    pub fn new(
        positions: Vec<Vec4>,
        texcoords: Vec<Vec3>,
        normals: Vec<Vec4>,
        elements: Vec<u32>,
    ) -> Result<Mesh, Box<dyn Error>> {
        if elements.len() % 3 != 0 {
            return Err(format!(
                "mesh has a dangling face: {} indices is not a multiple of three",
                elements.len()
            )
            .into());
        }
        if texcoords.len() != positions.len() || normals.len() != positions.len() {
            return Err(format!(
                "mesh attribute arrays disagree: {} positions, {} texcoords, {} normals",
                positions.len(),
                texcoords.len(),
                normals.len()
            )
            .into());
        }
        if let Some(&bad) = elements
            .iter()
            .find(|&&index| index as usize >= positions.len())
        {
            return Err(format!(
                "mesh references vertex {} but only {} exist",
                bad,
                positions.len()
            )
            .into());
        }
        Ok(Mesh {
            positions,
            texcoords,
            normals,
            elements,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.elements.len() / 3
    }

    /// Synthesizes per-vertex normals by summing the unnormalized face cross
    /// products of adjacent triangles. The cross product's magnitude is
    /// twice the face area, which provides the area weighting.
    pub fn smooth_normals(positions: &[Vec4], elements: &[u32]) -> Vec<Vec4> {
        let mut accumulated = vec![Vec3::ZERO; positions.len()];
        for triangle in elements.chunks_exact(3) {
            let (i0, i1, i2) = (
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            );
            let edge1 = (positions[i1] - positions[i0]).xyz();
            let edge2 = (positions[i2] - positions[i0]).xyz();
            let face = edge1.cross(edge2);
            accumulated[i0] += face;
            accumulated[i1] += face;
            accumulated[i2] += face;
        }
        accumulated
            .into_iter()
            .map(|normal| {
                let normal = normal.normalized();
                Vec4::direction(normal.x, normal.y, normal.z)
            })
            .collect()
    }
}
