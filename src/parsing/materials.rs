use crate::color::Color;
use crate::film::Film;
use crate::scene::Material;

use std::error::Error;
use std::path::Path;

/// Loads the first material definition from an MTL file.
///
/// Recognized keys are `Ns`, `Ka`, `Kd`, `Ks`, and `map_Kd`; anything else
/// is ignored. A `map_Kd` path resolves relative to the MTL file and is
/// decoded to linear light.
pub fn load_mtl_file(path: &Path) -> Result<Material, Box<dyn Error>> {
    info!("loading material from {}", path.display());
    let (definitions, _) = tobj::load_mtl(path)?;
    let definition = definitions
        .into_iter()
        .next()
        .ok_or_else(|| format!("no material definitions in {}", path.display()))?;

    let texture_map = match Some(definition.diffuse_texture.as_str()).filter(|name| !name.is_empty())
    {
        Some(name) => {
            let texture_path = path.parent().unwrap_or_else(|| Path::new("")).join(name);
            info!("loading texture from {}", texture_path.display());
            Some(Film::read_png(&texture_path)?)
        }
        None => None,
    };

    Ok(Material {
        shininess: definition.shininess,
        ambient: Color::from(definition.ambient),
        diffuse: Color::from(definition.diffuse),
        specular: Color::from(definition.specular),
        texture_map,
    })
}
