use crate::geometry::Mesh;
use crate::math::{Vec3, Vec4};

use std::error::Error;
use std::path::Path;

/// Loads a Wavefront OBJ file into a single mesh.
///
/// `single_index` welds each distinct `v/t/n` triple into one shared index;
/// `triangulate` fan-triangulates polygon faces. Multiple models in one
/// file merge into one index space. Models without normals get smooth
/// per-vertex normals synthesized from adjacent faces.
pub fn load_obj_file(path: &Path) -> Result<Mesh, Box<dyn Error>> {
    info!("loading mesh from {}", path.display());
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )?;
    convert_models(&models)
}

pub fn convert_models(models: &[tobj::Model]) -> Result<Mesh, Box<dyn Error>> {
    let mut positions = Vec::new();
    let mut texcoords = Vec::new();
    let mut normals = Vec::new();
    let mut elements = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let base = positions.len() as u32;
        let count = mesh.positions.len() / 3;

        let model_positions: Vec<Vec4> = (0..count)
            .map(|i| {
                Vec4::point(
                    mesh.positions[3 * i],
                    mesh.positions[3 * i + 1],
                    mesh.positions[3 * i + 2],
                )
            })
            .collect();
        let model_elements: Vec<u32> = mesh.indices.clone();

        if mesh.texcoords.is_empty() {
            texcoords.extend(std::iter::repeat(Vec3::ZERO).take(count));
        } else {
            texcoords.extend(
                (0..count).map(|i| Vec3::new(mesh.texcoords[2 * i], mesh.texcoords[2 * i + 1], 0.0)),
            );
        }

        if mesh.normals.is_empty() {
            info!(
                "model '{}' carries no normals; synthesizing smooth normals",
                model.name
            );
            normals.extend(Mesh::smooth_normals(&model_positions, &model_elements));
        } else {
            normals.extend((0..count).map(|i| {
                Vec4::direction(
                    mesh.normals[3 * i],
                    mesh.normals[3 * i + 1],
                    mesh.normals[3 * i + 2],
                )
            }));
        }

        positions.extend(model_positions);
        elements.extend(model_elements.into_iter().map(|index| base + index));
    }

    let mesh = Mesh::new(positions, texcoords, normals, elements)?;
    info!(
        "loaded mesh: {} vertices, {} triangles",
        mesh.positions.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

#[cfg(test)]
mod test {
    use super::*;

    use ahash::AHashMap;
    use std::io::BufReader;

    fn load_from_str(obj: &str) -> Mesh {
        let mut reader = BufReader::new(obj.as_bytes());
        let (models, _) = tobj::load_obj_buf(
            &mut reader,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
            |_| Ok((Vec::new(), AHashMap::new())),
        )
        .unwrap();
        convert_models(&models).unwrap()
    }

    #[test]
    fn test_triangle_with_full_attributes() {
        let mesh = load_from_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             vt 0 0\nvt 1 0\nvt 0 1\n\
             vn 0 0 1\n\
             f 1/1/1 2/2/1 3/3/1\n",
        );
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions.len(), 3);
        assert!((mesh.texcoords[mesh.elements[1] as usize].x - 1.0).abs() < 1e-6);
        for &index in &mesh.elements {
            assert!((mesh.normals[index as usize].z - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_quad_face_is_fan_triangulated() {
        let mesh = load_from_str(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
             f 1 2 3 4\n",
        );
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.elements.len() % 3, 0);
        assert!(mesh
            .elements
            .iter()
            .all(|&index| (index as usize) < mesh.positions.len()));
    }

    #[test]
    fn test_missing_normals_are_synthesized() {
        let mesh = load_from_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             f 1 2 3\n",
        );
        for &index in &mesh.elements {
            let normal = mesh.normals[index as usize];
            assert!((normal.xyz() - Vec3::Z).norm() < 1e-6);
            assert_eq!(normal.w, 0.0);
        }
    }

    #[test]
    fn test_shared_corner_with_distinct_uvs_is_duplicated() {
        // the same position appears with two texture coordinates, so the
        // shared index space must keep two vertices
        let mesh = load_from_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\n\
             vt 0 0\nvt 1 0\nvt 0 1\nvt 1 1\n\
             vn 0 0 1\n\
             f 1/1/1 2/2/1 3/3/1\n\
             f 2/1/1 4/4/1 3/3/1\n",
        );
        assert_eq!(mesh.triangle_count(), 2);
        // position 2 is referenced with vt 2 and vt 1; welding keeps both
        assert!(mesh.positions.len() > 4);
    }
}
