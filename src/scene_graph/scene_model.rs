use id_arena::Id;

use crate::{geometry::Geometry, material::StandardMaterial, rendering::render_model::RenderModelId};

pub type SceneModelId = Id<SceneModel>;

pub struct SceneModel {
    pub name: String,
    pub geometry: Geometry,
    pub material: StandardMaterial,
    /// Set by the renderer once GPU buffers exist.
    pub render_model: Option<RenderModelId>,
}

impl SceneModel {
    pub fn new(name: impl Into<String>, geometry: Geometry, material: StandardMaterial) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            render_model: None,
        }
    }
}
