use anyhow::Context;

use crate::{
    clock::Clock,
    config::MeshConfig,
    geometry::Geometry,
    scene_graph::{ObjectId, Scene, SceneModel},
    stage::Stage,
};

/// Radians per second around both the X and Y axes.
pub const ROTATION_SPEED: f32 = 0.5;

/// Euler XYZ rotation of the sphere `elapsed` seconds into the animation.
pub fn rotation_at(elapsed: f32) -> (f32, f32, f32) {
    let angle = elapsed * ROTATION_SPEED;
    (angle, angle, 0.0)
}

pub struct WireframeSphere {
    config: MeshConfig,
    /// Starts on the first frame, not at construction.
    clock: Clock,
    object: Option<ObjectId>,
}

impl WireframeSphere {
    pub fn new(config: MeshConfig) -> Self {
        Self {
            config,
            clock: Clock::new(),
            object: None,
        }
    }

    pub fn init(&mut self, stage: &mut Stage) -> anyhow::Result<ObjectId> {
        self.spawn(stage.scene_mut())
    }

    fn spawn(&mut self, scene: &mut Scene) -> anyhow::Result<ObjectId> {
        let context = || format!("Failed to build {}", self.config.name);

        let geometry = Geometry::sphere(&self.config.sphere).with_context(context)?;
        let material = self.config.material().with_context(context)?;

        log::info!(
            "Built {} with {} vertices and {} triangles",
            self.config.name,
            geometry.vertices.len(),
            geometry.triangle_count()
        );

        let model = SceneModel::new(self.config.name.as_str(), geometry, material);
        let object = scene.spawn_model(&self.config.name, model);
        self.object = Some(object);

        Ok(object)
    }

    pub fn on_frame(&mut self, stage: &mut Stage) {
        let elapsed = self.clock.elapsed_time();
        self.update_at(stage.scene_mut(), elapsed);
    }

    fn update_at(&self, scene: &mut Scene, elapsed: f32) {
        let Some(object) = self.object else {
            return;
        };

        let (x, y, z) = rotation_at(elapsed);
        scene.set_object_rotation_euler(object, x, y, z);
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use glam::{EulerRot, Mat4, Quat};

    use super::*;
    use crate::geometry::SphereParams;

    fn world_matrix(scene: &mut Scene, id: ObjectId) -> Mat4 {
        scene.update_transforms();
        scene.objects[id].transform.world_matrix()
    }

    fn expected_matrix(elapsed: f32) -> Mat4 {
        let (x, y, z) = rotation_at(elapsed);
        Mat4::from_quat(Quat::from_euler(EulerRot::XYZ, x, y, z))
    }

    #[test]
    fn rotation_is_proportional_to_elapsed_time() {
        assert_eq!(rotation_at(0.0), (0.0, 0.0, 0.0));
        assert_eq!(rotation_at(2.0), (1.0, 1.0, 0.0));
        assert_eq!(rotation_at(10.0), (5.0, 5.0, 0.0));
    }

    #[test]
    fn spawn_adds_one_wireframe_model() {
        let mut scene = Scene::new();
        let mut sphere = WireframeSphere::new(MeshConfig::default());

        let id = sphere.spawn(&mut scene).unwrap();

        assert_eq!(sphere.object, Some(id));
        assert_eq!(scene.objects.len(), 1);

        let model = scene.get_model(scene.objects[id].model_id).unwrap();
        assert!(model.material.wireframe);
        assert_eq!(model.geometry.vertices.len(), 31 * 31);
        assert!(model.render_model.is_none());
    }

    #[test]
    fn spawn_rejects_invalid_params() {
        let mut scene = Scene::new();
        let mut sphere = WireframeSphere::new(MeshConfig {
            sphere: SphereParams {
                radius: f32::NAN,
                ..Default::default()
            },
            ..Default::default()
        });

        assert!(sphere.spawn(&mut scene).is_err());
        assert_eq!(sphere.object, None);
        assert_eq!(scene.objects.len(), 0);
    }

    #[test]
    fn spawn_rejects_invalid_colour() {
        let mut scene = Scene::new();
        let mut sphere = WireframeSphere::new(MeshConfig {
            color: "#00zz00".to_string(),
            ..Default::default()
        });

        assert!(sphere.spawn(&mut scene).is_err());
        assert_eq!(scene.objects.len(), 0);
    }

    #[test]
    fn update_sets_absolute_rotation() {
        let mut scene = Scene::new();
        let mut sphere = WireframeSphere::new(MeshConfig::default());
        let id = sphere.spawn(&mut scene).unwrap();

        for elapsed in [1.0, 1.0, 4.0, 0.5] {
            sphere.update_at(&mut scene, elapsed);
            sphere.update_at(&mut scene, elapsed);

            let world = world_matrix(&mut scene, id);
            assert!(world.abs_diff_eq(expected_matrix(elapsed), 1e-5), "at t = {elapsed}");
        }
    }

    #[test]
    fn first_frame_is_unrotated_however_long_setup_takes() {
        let mut scene = Scene::new();
        let mut sphere = WireframeSphere::new(MeshConfig::default());

        // Stage creation happens between construction and the first frame
        thread::sleep(Duration::from_millis(50));
        let id = sphere.spawn(&mut scene).unwrap();

        let elapsed = sphere.clock.elapsed_time();
        sphere.update_at(&mut scene, elapsed);

        assert_eq!(elapsed, 0.0);
        assert!(world_matrix(&mut scene, id).abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn update_before_spawn_is_a_no_op() {
        let mut scene = Scene::new();
        let sphere = WireframeSphere::new(MeshConfig::default());

        sphere.update_at(&mut scene, 3.0);

        assert_eq!(scene.objects.len(), 0);
    }
}
