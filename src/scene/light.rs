use crate::color::Color;
use crate::math::Vec4;

/// A light source. Stored directions point from the surface toward the
/// light so `dot(normal, direction)` is positive for lit faces.
#[derive(Clone, Debug)]
pub enum Light {
    Directional {
        color: Color,
        direction: Vec4,
    },
    Point {
        color: Color,
        intensity: f32,
        position: Vec4,
    },
    Spot {
        color: Color,
        position: Vec4,
        direction: Vec4,
        cos_cutoff: f32,
        taper: f32,
    },
}

impl Light {
    /// `direction` is the direction the light shines, as authored; it is
    /// negated and normalized for storage.
    pub fn directional(color: Color, direction: Vec4) -> Light {
        Light::Directional {
            color,
            direction: (-direction).normalized(),
        }
    }

    pub fn point(color: Color, intensity: f32, position: Vec4) -> Light {
        Light::Point {
            color,
            intensity,
            position,
        }
    }

    /// `angle` is the half-cone angle in radians; `direction` is the beam
    /// direction as authored.
    pub fn spot(color: Color, angle: f32, taper: f32, direction: Vec4, position: Vec4) -> Light {
        Light::Spot {
            color,
            position,
            direction: (-direction).normalized(),
            cos_cutoff: angle.cos(),
            taper,
        }
    }

    /// Unit vector from the surface point toward the light.
    pub fn direction(&self, point: Vec4) -> Vec4 {
        match self {
            Light::Directional { direction, .. } => *direction,
            Light::Point { position, .. } | Light::Spot { position, .. } => {
                (*position - point).normalized()
            }
        }
    }

    pub fn attenuation(&self, point: Vec4) -> f32 {
        match self {
            Light::Directional { .. } => 1.0,
            Light::Point {
                intensity,
                position,
                ..
            } => intensity / (*position - point).norm_squared(),
            Light::Spot {
                position,
                direction,
                cos_cutoff,
                taper,
                ..
            } => {
                let cos_angle = (*position - point).normalized().dot(*direction);
                let falloff = ((cos_angle - cos_cutoff) / (1.0 - cos_cutoff)).max(0.0);
                falloff.powf(*taper)
            }
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Light::Directional { color, .. }
            | Light::Point { color, .. }
            | Light::Spot { color, .. } => *color,
        }
    }
}

/// An ambient term plus an ordered list of lights.
#[derive(Clone, Debug)]
pub struct LightCollection {
    pub ambient: Color,
    pub lights: Vec<Light>,
}

impl LightCollection {
    pub fn new(ambient: Color) -> LightCollection {
        LightCollection {
            ambient,
            lights: Vec::new(),
        }
    }
}

impl Default for LightCollection {
    fn default() -> LightCollection {
        LightCollection::new(Color::WHITE)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::f32::consts::PI;

    #[test]
    fn test_directional_stores_negated_direction() {
        let light = Light::directional(Color::WHITE, Vec4::direction(0.0, 0.0, -1.0));
        let direction = light.direction(Vec4::ORIGIN);
        assert!((direction.z - 1.0).abs() < 1e-6);
        assert_eq!(light.attenuation(Vec4::point(5.0, 5.0, 5.0)), 1.0);
    }

    #[test]
    fn test_point_light_inverse_square_falloff() {
        let intensity = 4.0;
        let height = 2.0;
        let light = Light::point(Color::WHITE, intensity, Vec4::point(0.0, height, 0.0));
        let below = light.attenuation(Vec4::ORIGIN);
        assert!((below - intensity / (height * height)).abs() < 1e-6);

        // offset r from the axis: attenuation falls as 1 / (h^2 + r^2)
        let offset = 3.0;
        let at_offset = light.attenuation(Vec4::point(offset, 0.0, 0.0));
        let expected = intensity / (height * height + offset * offset);
        assert!((at_offset - expected).abs() / expected < 0.02);
    }

    #[test]
    fn test_spot_axis_and_cone_edge() {
        let light = Light::spot(
            Color::WHITE,
            PI / 4.0,
            1.0,
            Vec4::direction(0.0, -1.0, 0.0),
            Vec4::point(0.0, 1.0, 0.0),
        );
        // directly under the beam the falloff is maximal
        assert!((light.attenuation(Vec4::ORIGIN) - 1.0).abs() < 1e-6);
        // on the cone edge (45 degrees off axis) it reaches zero
        let edge = light.attenuation(Vec4::point(1.0, 0.0, 0.0));
        assert!(edge.abs() < 1e-5);
        // outside the cone it stays zero
        assert_eq!(light.attenuation(Vec4::point(10.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_spot_taper_sharpens_falloff() {
        let soft = Light::spot(
            Color::WHITE,
            PI / 3.0,
            1.0,
            Vec4::direction(0.0, -1.0, 0.0),
            Vec4::point(0.0, 1.0, 0.0),
        );
        let sharp = Light::spot(
            Color::WHITE,
            PI / 3.0,
            8.0,
            Vec4::direction(0.0, -1.0, 0.0),
            Vec4::point(0.0, 1.0, 0.0),
        );
        let off_axis = Vec4::point(0.5, 0.0, 0.0);
        assert!(sharp.attenuation(off_axis) < soft.attenuation(off_axis));
    }
}
