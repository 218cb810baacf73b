use crate::color::{saturate, Color};
use crate::film::Film;
use crate::math::{Vec3, Vec4};
use crate::scene::LightCollection;

/// Blinn-Phong surface parameters, loaded from an MTL definition.
#[derive(Clone, Debug)]
pub struct Material {
    pub shininess: f32,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub texture_map: Option<Film<Color>>,
}

impl Material {
    /// Shades one surface sample.
    ///
    /// `normal` must already be unit length; `world` and `camera_position`
    /// are world-space points. The result is saturated to `[0, 1]`.
    pub fn shade(
        &self,
        world: Vec4,
        normal: Vec4,
        texcoord: Vec3,
        lights: &LightCollection,
        camera_position: Vec4,
    ) -> Color {
        let view = (camera_position - world).normalized();

        let mut diffuse_sum = Color::BLACK;
        let mut specular_sum = Color::BLACK;
        for light in &lights.lights {
            let toward_light = light.direction(world);
            let attenuation = light.attenuation(world);

            let diffuse_intensity = saturate(normal.dot(toward_light));
            let half = (toward_light + view).normalized();
            let specular_intensity = saturate(normal.dot(half)).powf(self.shininess);

            diffuse_sum += light.color() * (attenuation * diffuse_intensity);
            specular_sum += light.color() * (attenuation * specular_intensity);
        }

        let mut color = self.ambient * lights.ambient
            + self.diffuse * diffuse_sum
            + self.specular * specular_sum;
        if let Some(texture) = &self.texture_map {
            color = color * texture.at_uv(texcoord.x, texcoord.y);
        }
        color.saturate()
    }
}
