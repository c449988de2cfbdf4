use glam::Vec3;

use crate::{
    camera::PerspectiveCamera,
    color::Color,
    geometry::SphereParams,
    material::StandardMaterial,
    rendering::config::RenderConfig,
    scene_graph::Light,
    viewport::Viewport,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CameraParams {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraParams {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn build(&self, viewport: Viewport) -> PerspectiveCamera {
        PerspectiveCamera::new(
            self.fov,
            viewport.aspect(),
            self.near,
            self.far,
            self.position(),
        )
    }
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov: 40.0,
            x: 0.0,
            y: 0.0,
            z: 1000.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StageConfig {
    /// DOM id of the canvas the stage renders into on the web.
    pub canvas_id: String,
    pub clear_color: Color,
    pub camera: CameraParams,
    pub lights: Vec<Light>,
    pub power_preference: wgpu::PowerPreference,
}

impl StageConfig {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            clear_color: self.clear_color,
            power_preference: self.power_preference,
        }
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        let render_defaults = RenderConfig::default();

        Self {
            canvas_id: "webgl-canvas".to_string(),
            clear_color: Color::from_hex(0xffffff),
            camera: CameraParams::default(),
            lights: vec![
                Light::ambient(Color::from_hex(0xffffff), 1.0),
                Light::directional(Color::from_hex(0xffffff), 1.0, Vec3::new(1.0, 1.0, 1.0)),
            ],
            power_preference: render_defaults.power_preference,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MeshConfig {
    pub name: String,
    pub sphere: SphereParams,
    /// CSS colour, `#rrggbb` or `#rgb`.
    pub color: String,
    pub wireframe: bool,
}

impl MeshConfig {
    pub fn material(&self) -> anyhow::Result<StandardMaterial> {
        Ok(StandardMaterial {
            color: Color::from_css(&self.color)?,
            wireframe: self.wireframe,
        })
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            name: "Sphere".to_string(),
            sphere: SphereParams::default(),
            color: "#009f8c".to_string(),
            wireframe: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn camera_defaults() {
        let camera = CameraParams::default().build(Viewport::clamped(PhysicalSize::new(1600, 800)));

        assert_eq!(camera.fov, 40.0);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 1000.0));
        assert_eq!(camera.aspect, 2.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 2000.0);
    }

    #[test]
    fn hidden_canvas_gets_unit_aspect() {
        let camera = CameraParams::default().build(Viewport::clamped(PhysicalSize::new(0, 0)));
        assert_eq!(camera.aspect, 1.0);
    }

    #[test]
    fn stage_defaults() {
        let config = StageConfig::default();

        assert_eq!(config.canvas_id, "webgl-canvas");
        assert_eq!(config.clear_color, Color::WHITE);
        assert_eq!(config.lights.len(), 2);
        assert!(matches!(config.lights[0], Light::Ambient { intensity, .. } if intensity == 1.0));
        assert!(matches!(
            config.lights[1],
            Light::Directional { position, target, .. }
                if position == Vec3::ONE && target == Vec3::ZERO
        ));
    }

    #[test]
    fn mesh_defaults() {
        let config = MeshConfig::default();

        assert_eq!(config.sphere.radius, 300.0);
        assert_eq!(config.sphere.width_segments, 30);
        assert_eq!(config.sphere.height_segments, 30);

        let material = config.material().unwrap();
        assert!(material.wireframe);
        assert_eq!(material.color, Color::from_hex(0x009f8c));
    }

    #[test]
    fn bad_mesh_colour_is_an_error() {
        let config = MeshConfig {
            color: "teal".to_string(),
            ..Default::default()
        };

        assert!(config.material().is_err());
    }
}
