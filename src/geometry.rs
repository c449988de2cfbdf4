use std::f32::consts::{PI, TAU};

use anyhow::anyhow;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use itertools::iproduct;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SphereParams {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub phi_start: f32,
    pub phi_length: f32,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl SphereParams {
    pub fn validate(&self) -> anyhow::Result<()> {
        let values = [
            ("radius", self.radius),
            ("phi_start", self.phi_start),
            ("phi_length", self.phi_length),
            ("theta_start", self.theta_start),
            ("theta_length", self.theta_length),
        ];

        for (name, value) in values {
            if !value.is_finite() {
                return Err(anyhow!("Sphere parameter {name} is not finite: {value}"));
            }
        }

        Ok(())
    }

    fn theta_end(&self) -> f32 {
        (self.theta_start + self.theta_length).min(PI)
    }
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 300.0,
            width_segments: 30,
            height_segments: 30,
            phi_start: 0.0,
            phi_length: TAU,
            theta_start: 0.0,
            theta_length: PI,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// UV sphere laid out as a `(height + 1) x (width + 1)` vertex grid.
    /// Seam columns are duplicated; pole triangles that would be degenerate are skipped.
    pub fn sphere(params: &SphereParams) -> anyhow::Result<Geometry> {
        params.validate()?;

        let width = params.width_segments.max(3);
        let height = params.height_segments.max(2);
        let theta_end = params.theta_end();
        let stride = width + 1;

        let mut vertices = Vec::with_capacity((stride * (height + 1)) as usize);

        for iy in 0..=height {
            let v = iy as f32 / height as f32;

            let u_offset = if iy == 0 && params.theta_start == 0.0 {
                0.5 / width as f32
            } else if iy == height && theta_end == PI {
                -0.5 / width as f32
            } else {
                0.0
            };

            let theta = params.theta_start + v * params.theta_length;

            for ix in 0..=width {
                let u = ix as f32 / width as f32;
                let phi = params.phi_start + u * params.phi_length;

                let position = Vec3::new(
                    -params.radius * phi.cos() * theta.sin(),
                    params.radius * theta.cos(),
                    params.radius * phi.sin() * theta.sin(),
                );

                vertices.push(Vertex {
                    position,
                    normal: position.normalize_or_zero(),
                    uv: Vec2::new(u + u_offset, 1.0 - v),
                });
            }
        }

        let mut indices = Vec::with_capacity((width * height * 6) as usize);

        for (iy, ix) in iproduct!(0..height, 0..width) {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;

            if iy != 0 || params.theta_start > 0.0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height - 1 || theta_end < PI {
                indices.extend_from_slice(&[b, c, d]);
            }
        }

        Ok(Geometry { vertices, indices })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Line-list indices covering every triangle edge.
    /// Edges shared by two triangles appear twice.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        self.indices
            .chunks_exact(3)
            .flat_map(|tri| [tri[0], tri[1], tri[1], tri[2], tri[2], tri[0]])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(radius: f32, width_segments: u32, height_segments: u32) -> SphereParams {
        SphereParams {
            radius,
            width_segments,
            height_segments,
            ..Default::default()
        }
    }

    #[test]
    fn default_sphere_counts() {
        let geometry = Geometry::sphere(&SphereParams::default()).unwrap();

        assert_eq!(geometry.vertices.len(), 31 * 31);
        // 30x30 quads, minus one triangle per quad on each pole row
        assert_eq!(geometry.triangle_count(), 30 * 30 * 2 - 2 * 30);
    }

    #[test]
    fn vertices_lie_on_radius() {
        let geometry = Geometry::sphere(&params(300.0, 12, 8)).unwrap();

        for vertex in &geometry.vertices {
            assert!((vertex.position.length() - 300.0).abs() < 1e-2);
            assert!((vertex.normal.length() - 1.0).abs() < 1e-4);
            assert!(vertex.normal.dot(vertex.position.normalize()) > 0.999);
        }
    }

    #[test]
    fn first_and_last_rows_are_poles() {
        let geometry = Geometry::sphere(&params(2.0, 4, 3)).unwrap();

        let top = geometry.vertices.first().unwrap().position;
        let bottom = geometry.vertices.last().unwrap().position;

        assert!((top - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        assert!((bottom - Vec3::new(0.0, -2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn pole_uvs_are_offset() {
        let geometry = Geometry::sphere(&params(1.0, 4, 2)).unwrap();

        assert!((geometry.vertices[0].uv - Vec2::new(0.125, 1.0)).length() < 1e-6);
        let last = geometry.vertices.last().unwrap();
        assert!((last.uv - Vec2::new(1.0 - 0.125, 0.0)).length() < 1e-6);
    }

    #[test]
    fn segments_are_clamped() {
        let geometry = Geometry::sphere(&params(1.0, 0, 0)).unwrap();

        assert_eq!(geometry.vertices.len(), 4 * 3);
        assert_eq!(geometry.triangle_count(), 3 * 2 * 2 - 2 * 3);
    }

    #[test]
    fn partial_theta_keeps_cap_triangles() {
        let params = SphereParams {
            theta_start: 0.5,
            theta_length: 1.0,
            ..params(1.0, 6, 4)
        };
        let geometry = Geometry::sphere(&params).unwrap();

        assert_eq!(geometry.triangle_count(), 6 * 4 * 2);
    }

    #[test]
    fn indices_stay_in_bounds() {
        let geometry = Geometry::sphere(&SphereParams::default()).unwrap();
        let count = geometry.vertices.len() as u32;

        assert!(geometry.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn zero_radius_is_allowed() {
        let geometry = Geometry::sphere(&params(0.0, 8, 6)).unwrap();

        assert!(geometry.vertices.iter().all(|v| v.normal == Vec3::ZERO));
    }

    #[test]
    fn non_finite_radius_is_rejected() {
        assert!(Geometry::sphere(&params(f32::NAN, 8, 6)).is_err());
        assert!(Geometry::sphere(&params(f32::INFINITY, 8, 6)).is_err());
    }

    #[test]
    fn wireframe_has_three_edges_per_triangle() {
        let geometry = Geometry::sphere(&params(1.0, 5, 4)).unwrap();
        let lines = geometry.wireframe_indices();

        assert_eq!(lines.len(), geometry.indices.len() * 2);
        let (a, b, c) = (geometry.indices[0], geometry.indices[1], geometry.indices[2]);
        assert_eq!(&lines[..6], &[a, b, b, c, c, a]);
    }
}
