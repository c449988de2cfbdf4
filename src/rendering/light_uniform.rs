use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::scene_graph::light::Light;

pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DirectionalLightData {
    /// Toward the light, w unused.
    pub direction: [f32; 4],
    pub radiance: [f32; 4],
}

// Field order and padding match the `Lights` struct in standard.wgsl
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LightUniformState {
    pub ambient: [f32; 4],
    pub directional_count: u32,
    _padding: [u32; 3],
    pub directional: [DirectionalLightData; MAX_DIRECTIONAL_LIGHTS],
}

impl LightUniformState {
    pub fn from_lights<'a>(lights: impl IntoIterator<Item = &'a Light>) -> Self {
        let mut state = Self::default();
        let mut ambient = Vec3::ZERO;
        let mut dropped = 0;

        for light in lights {
            if let Light::Ambient { .. } = light {
                ambient += light.radiance();
                continue;
            }

            let Some(direction) = light.direction_to_light() else {
                log::warn!("Skipping directional light with zero-length direction");
                continue;
            };

            let index = state.directional_count as usize;
            if index == MAX_DIRECTIONAL_LIGHTS {
                dropped += 1;
                continue;
            }

            state.directional[index] = DirectionalLightData {
                direction: direction.extend(0.0).to_array(),
                radiance: light.radiance().extend(0.0).to_array(),
            };
            state.directional_count += 1;
        }

        if dropped > 0 {
            log::warn!(
                "{dropped} directional light(s) over the limit of {MAX_DIRECTIONAL_LIGHTS} were ignored"
            );
        }

        state.ambient = ambient.extend(0.0).to_array();
        state
    }
}

pub struct LightUniform {
    buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightUniform {
    pub fn new(device: &wgpu::Device, initial_state: LightUniformState) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light uniform buffer"),
            contents: bytemuck::cast_slice(&[initial_state]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Light uniform bind group layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Light uniform bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, state: LightUniformState) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[state]));
    }
}
