pub mod materials;
pub mod meshes;

pub use materials::load_mtl_file;
pub use meshes::load_obj_file;

use crate::color::Color;
use crate::geometry::Mesh;
use crate::math::{Quaternion, Vec3, Vec4};
use crate::scene::{Camera, Light, LightCollection, Material, Object, Scene};

use serde::Deserialize;

use std::collections::HashMap;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;

pub type Vec3Data = [f32; 3];
pub type Vec4Data = [f32; 4];

#[derive(Deserialize, Copy, Clone)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

#[derive(Deserialize, Copy, Clone)]
pub struct CameraData {
    pub position: Vec3Data,
    /// Axis-angle: `[ax, ay, az, angle]`, angle in radians.
    pub rotation: Vec4Data,
}

#[derive(Deserialize, Copy, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LightData {
    Directional {
        color: Vec3Data,
        direction: Vec3Data,
    },
    Point {
        color: Vec3Data,
        intensity: f32,
        position: Vec3Data,
    },
    Spot {
        color: Vec3Data,
        /// Half-cone angle in radians.
        angle: f32,
        taper: f32,
        direction: Vec3Data,
        position: Vec3Data,
    },
}

#[derive(Deserialize, Clone)]
pub struct ObjectData {
    pub mesh: String,
    pub material: String,
    pub position: Vec3Data,
    pub rotation: Vec4Data,
    pub scale: Vec3Data,
}

#[derive(Deserialize, Clone)]
pub struct SceneData {
    pub resolution: Resolution,
    /// Horizontal field of view in degrees.
    pub fov: f32,
    pub camera: Option<CameraData>,
    pub ambient: Option<Vec3Data>,
    #[serde(default)]
    pub lights: Vec<LightData>,
    #[serde(default)]
    pub objects: Vec<ObjectData>,
}

fn point(values: Vec3Data) -> Vec4 {
    Vec4::point(values[0], values[1], values[2])
}

fn direction(values: Vec3Data) -> Vec4 {
    Vec4::direction(values[0], values[1], values[2])
}

fn rotation(values: Vec4Data) -> Quaternion {
    Quaternion::from_axis_angle(Vec3::new(values[0], values[1], values[2]), values[3])
}

impl From<LightData> for Light {
    fn from(data: LightData) -> Light {
        match data {
            LightData::Directional {
                color,
                direction: light_direction,
            } => Light::directional(Color::from(color), direction(light_direction)),
            LightData::Point {
                color,
                intensity,
                position,
            } => Light::point(Color::from(color), intensity, point(position)),
            LightData::Spot {
                color,
                angle,
                taper,
                direction: light_direction,
                position,
            } => Light::spot(
                Color::from(color),
                angle,
                taper,
                direction(light_direction),
                point(position),
            ),
        }
    }
}

pub fn load_scene(path: &Path) -> Result<SceneData, Box<dyn Error>> {
    info!("loading scene configuration from {}", path.display());
    let input = std::fs::read_to_string(path).map_err(|e| {
        error!("could not read {}: {}", path.display(), e);
        e
    })?;
    let scene: SceneData = serde_yaml::from_str(&input).map_err(|e| {
        error!("malformed scene configuration: {}", e);
        e
    })?;
    Ok(scene)
}

/// Loads a scene file and every mesh, material, and texture it references.
///
/// Meshes and materials pool behind their path: repeated references share
/// one instance and each file loads at most once.
pub fn construct_scene(path: &Path) -> Result<Scene, Box<dyn Error>> {
    let data = load_scene(path)?;

    let camera = match data.camera {
        Some(camera) => Camera {
            position: point(camera.position),
            rotation: rotation(camera.rotation),
        },
        None => Camera::default(),
    };

    let mut lights = LightCollection::new(match data.ambient {
        Some(ambient) => Color::from(ambient),
        None => Color::WHITE,
    });
    for light in data.lights {
        lights.lights.push(Light::from(light));
    }
    info!("scene carries {} lights", lights.lights.len());

    let mut meshes: HashMap<String, Arc<Mesh>> = HashMap::new();
    let mut materials: HashMap<String, Arc<Material>> = HashMap::new();
    let mut objects = Vec::new();
    for object in data.objects {
        let mesh = match meshes.get(&object.mesh) {
            Some(mesh) => Arc::clone(mesh),
            None => {
                let loaded = Arc::new(load_obj_file(Path::new(&object.mesh))?);
                meshes.insert(object.mesh.clone(), Arc::clone(&loaded));
                loaded
            }
        };
        let material = match materials.get(&object.material) {
            Some(material) => Arc::clone(material),
            None => {
                let loaded = Arc::new(load_mtl_file(Path::new(&object.material))?);
                materials.insert(object.material.clone(), Arc::clone(&loaded));
                loaded
            }
        };
        objects.push(Object {
            position: point(object.position),
            rotation: rotation(object.rotation),
            scale: direction(object.scale),
            mesh,
            material,
        });
    }
    info!(
        "scene constructed: {} objects, {} unique meshes, {} unique materials",
        objects.len(),
        meshes.len(),
        materials.len()
    );

    Ok(Scene {
        width: data.resolution.width,
        height: data.resolution.height,
        fov: data.fov,
        camera,
        lights,
        objects,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    use std::fs;

    #[test]
    fn test_parse_each_light_kind() {
        let document = "\
resolution: { width: 640, height: 480 }
fov: 70.0
camera:
  position: [0.0, 1.0, 5.0]
  rotation: [0.0, 1.0, 0.0, 0.5]
lights:
  - type: directional
    color: [1.0, 1.0, 1.0]
    direction: [0.0, -1.0, 0.0]
  - type: point
    color: [1.0, 0.5, 0.25]
    intensity: 4.0
    position: [0.0, 3.0, 0.0]
  - type: spot
    color: [0.0, 1.0, 0.0]
    angle: 0.6
    taper: 2.0
    direction: [0.0, -1.0, 0.0]
    position: [1.0, 2.0, 3.0]
";
        let data: SceneData = serde_yaml::from_str(document).unwrap();
        assert_eq!(data.resolution.width, 640);
        assert_eq!(data.lights.len(), 3);
        assert!(matches!(data.lights[0], LightData::Directional { .. }));
        assert!(matches!(data.lights[1], LightData::Point { intensity, .. } if intensity == 4.0));
        assert!(matches!(data.lights[2], LightData::Spot { taper, .. } if taper == 2.0));
        assert!(data.objects.is_empty());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let document = "resolution: [not, a, mapping]\nfov: 70.0\n";
        assert!(serde_yaml::from_str::<SceneData>(document).is_err());
    }

    #[test]
    fn test_missing_resolution_is_an_error() {
        let document = "fov: 70.0\n";
        assert!(serde_yaml::from_str::<SceneData>(document).is_err());
    }

    #[test]
    fn test_construct_scene_pools_repeated_references() {
        let dir = std::env::temp_dir();
        let obj_path = dir.join("rust_rasterizer_pool_test.obj");
        let mtl_path = dir.join("rust_rasterizer_pool_test.mtl");
        fs::write(
            &obj_path,
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n",
        )
        .unwrap();
        fs::write(&mtl_path, "newmtl flat\nKd 1.0 1.0 1.0\n").unwrap();

        let scene_path = dir.join("rust_rasterizer_pool_test.yaml");
        let document = format!(
            "\
resolution: {{ width: 8, height: 8 }}
fov: 90.0
objects:
  - mesh: {obj}
    material: {mtl}
    position: [0.0, 0.0, -2.0]
    rotation: [0.0, 1.0, 0.0, 0.0]
    scale: [1.0, 1.0, 1.0]
  - mesh: {obj}
    material: {mtl}
    position: [1.0, 0.0, -3.0]
    rotation: [0.0, 1.0, 0.0, 0.0]
    scale: [2.0, 2.0, 2.0]
",
            obj = obj_path.display(),
            mtl = mtl_path.display()
        );
        fs::write(&scene_path, document).unwrap();

        let scene = construct_scene(&scene_path).unwrap();
        fs::remove_file(&obj_path).ok();
        fs::remove_file(&mtl_path).ok();
        fs::remove_file(&scene_path).ok();

        assert_eq!(scene.objects.len(), 2);
        assert!(Arc::ptr_eq(
            &scene.objects[0].mesh,
            &scene.objects[1].mesh
        ));
        assert!(Arc::ptr_eq(
            &scene.objects[0].material,
            &scene.objects[1].material
        ));
        // defaults: identity camera and white ambient
        assert_eq!(scene.camera.position, Vec4::ORIGIN);
        assert_eq!(scene.lights.ambient, Color::WHITE);
    }

    #[test]
    fn test_missing_mesh_file_fails_loading() {
        let dir = std::env::temp_dir();
        let scene_path = dir.join("rust_rasterizer_missing_mesh.yaml");
        fs::write(
            &scene_path,
            "\
resolution: { width: 8, height: 8 }
fov: 90.0
objects:
  - mesh: does_not_exist_anywhere.obj
    material: also_missing.mtl
    position: [0.0, 0.0, 0.0]
    rotation: [0.0, 1.0, 0.0, 0.0]
    scale: [1.0, 1.0, 1.0]
",
        )
        .unwrap();
        let result = construct_scene(&scene_path);
        fs::remove_file(&scene_path).ok();
        assert!(result.is_err());
    }
}
