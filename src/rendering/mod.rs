pub mod config;
pub mod instance;
pub mod light_uniform;
pub mod passes;
pub mod render_common;
pub mod render_model;
pub mod renderer;
pub mod texture;
