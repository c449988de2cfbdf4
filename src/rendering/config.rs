use crate::color::Color;

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub clear_color: Color,
    pub power_preference: wgpu::PowerPreference,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::WHITE,
            power_preference: wgpu::PowerPreference::HighPerformance,
        }
    }
}
