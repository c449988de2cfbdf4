use glam::{EulerRot, Mat4, Quat, Vec3};

/// Object placement with a cached world matrix. Objects are never nested, so the local and
/// world matrices are the same.
#[derive(Debug, Clone)]
pub struct Transform {
    translation: Vec3,
    rotation: Quat,

    world_matrix: Mat4,
    inverse_transpose_world_matrix: Mat4,
    dirty: bool,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            inverse_transpose_world_matrix: Mat4::IDENTITY,
            dirty: true,
        }
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    pub fn inverse_transpose_world_matrix(&self) -> Mat4 {
        self.inverse_transpose_world_matrix
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recomputes the cached matrices if the transform changed since the last call.
    pub fn update(&mut self) {
        if !self.is_dirty() {
            return;
        }

        self.world_matrix = Mat4::from_rotation_translation(self.rotation, self.translation);
        self.inverse_transpose_world_matrix = self.world_matrix.inverse().transpose();
        self.dirty = false;
    }

    /// Euler angles in radians, applied in XYZ order.
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        self.dirty = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euler_xyz_matches_axis_product() {
        let mut transform = Transform::default();
        transform.set_rotation_euler(0.3, 0.7, 0.0);
        transform.update();

        let expected = Mat4::from_rotation_x(0.3) * Mat4::from_rotation_y(0.7);

        assert!(transform.world_matrix().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn matrices_are_cached_until_rotation_changes() {
        let mut transform = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert!(transform.is_dirty());

        transform.update();
        assert!(!transform.is_dirty());
        assert!(transform
            .world_matrix()
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));

        transform.set_rotation_euler(0.0, 0.5, 0.0);
        assert!(transform.is_dirty());
        assert_eq!(transform.world_matrix().transform_point3(Vec3::X), Vec3::new(2.0, 2.0, 3.0));

        transform.update();
        assert!(!transform.is_dirty());
    }

    #[test]
    fn normal_matrix_of_a_rotation_is_the_rotation() {
        let mut transform = Transform::default();
        transform.set_rotation_euler(0.4, 1.1, 0.0);
        transform.update();

        assert!(transform
            .inverse_transpose_world_matrix()
            .abs_diff_eq(transform.world_matrix(), 1e-5));
    }
}
