pub mod light;
pub mod object3d;
pub mod scene;
pub mod scene_model;
pub mod transform;

pub use light::Light;
pub use object3d::ObjectId;
pub use scene::Scene;
pub use scene_model::SceneModel;
