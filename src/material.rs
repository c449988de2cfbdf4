use crate::color::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub color: Color,
    /// Draw triangle edges as lines instead of filled faces.
    pub wireframe: bool,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            wireframe: false,
        }
    }
}
