use glam::Vec3;
use id_arena::Id;

use crate::color::Color;

pub type LightId = Id<Light>;

#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Lights every surface equally regardless of orientation.
    Ambient { color: Color, intensity: f32 },
    /// Parallel rays travelling from `position` toward `target`.
    Directional {
        color: Color,
        intensity: f32,
        position: Vec3,
        target: Vec3,
    },
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Light::Ambient { color, intensity }
    }

    /// Aims at the origin.
    pub fn directional(color: Color, intensity: f32, position: Vec3) -> Self {
        Light::Directional {
            color,
            intensity,
            position,
            target: Vec3::ZERO,
        }
    }

    /// Colour premultiplied by intensity.
    pub fn radiance(&self) -> Vec3 {
        match self {
            Light::Ambient { color, intensity } | Light::Directional { color, intensity, .. } => {
                color.to_vec3() * *intensity
            }
        }
    }

    /// Unit vector pointing from the surface toward the light.
    /// `None` for ambient lights and for a directional light whose position equals its target.
    pub fn direction_to_light(&self) -> Option<Vec3> {
        match self {
            Light::Ambient { .. } => None,
            Light::Directional {
                position, target, ..
            } => (*position - *target).try_normalize(),
        }
    }
}
