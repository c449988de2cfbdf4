use id_arena::Arena;

use crate::scene_graph::light::{Light, LightId};
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::scene_model::{SceneModel, SceneModelId};

/// Flat collection of objects, the models they draw and the lights. Objects have no parents.
#[derive(Default)]
pub struct Scene {
    pub objects: Arena<Object3D>,
    pub models: Arena<SceneModel>,
    pub lights: Arena<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    pub fn add_model(&mut self, model: SceneModel) -> SceneModelId {
        self.models.alloc(model)
    }

    pub fn get_model(&self, id: SceneModelId) -> Option<&SceneModel> {
        self.models.get(id)
    }

    /// Adds a model and an object that renders it.
    pub fn spawn_model(&mut self, name: &str, model: SceneModel) -> ObjectId {
        let model_id = self.add_model(model);
        self.add_object(Object3D::with_model(name, model_id))
    }

    pub fn add_light(&mut self, light: Light) -> LightId {
        self.lights.alloc(light)
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter().map(|(_, light)| light)
    }

    pub fn set_object_rotation_euler(&mut self, object_id: ObjectId, x: f32, y: f32, z: f32) {
        match self.objects.get_mut(object_id) {
            Some(object) => object.transform.set_rotation_euler(x, y, z),
            None => log::warn!("Cannot rotate missing object {object_id:?}"),
        }
    }

    /// Brings every changed object's world matrix up to date before rendering.
    pub fn update_transforms(&mut self) {
        for (_, object) in self.objects.iter_mut() {
            object.transform.update();
        }
    }
}
