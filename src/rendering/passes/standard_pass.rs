use std::sync::Arc;

use anyhow::Context;
use id_arena::Arena;
use wgpu::{
    DepthBiasState, MultisampleState, PipelineCompilationOptions, RenderPassDescriptor,
    StencilState,
};

use crate::{
    color::Color,
    rendering::{
        instance::Instance,
        render_common::RenderCommon,
        render_model::{render_model_instances, RenderModel, Topology, RENDER_MODEL_VBL},
        texture::DepthTexture,
    },
};

const FILL_PRIMITIVE_STATE: wgpu::PrimitiveState = wgpu::PrimitiveState {
    topology: wgpu::PrimitiveTopology::TriangleList,
    strip_index_format: None,
    front_face: wgpu::FrontFace::Ccw,
    cull_mode: Some(wgpu::Face::Back),
    polygon_mode: wgpu::PolygonMode::Fill,
    unclipped_depth: false,
    conservative: false,
};

// PolygonMode::Line is unavailable on WebGL, so wireframes are drawn from line-list indices
const LINE_PRIMITIVE_STATE: wgpu::PrimitiveState = wgpu::PrimitiveState {
    topology: wgpu::PrimitiveTopology::LineList,
    strip_index_format: None,
    front_face: wgpu::FrontFace::Ccw,
    cull_mode: None,
    polygon_mode: wgpu::PolygonMode::Fill,
    unclipped_depth: false,
    conservative: false,
};

pub struct StandardPass {
    fill_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    camera_bind_group: wgpu::BindGroup,
    common: Arc<RenderCommon>,
}

pub struct StandardPassTextureViews<'a> {
    pub color: &'a wgpu::TextureView,
    pub depth: &'a wgpu::TextureView,
}

impl StandardPass {
    /// Builds both pipelines. Shader and pipeline validation errors are returned instead of
    /// being reported through the device's uncaptured error handler.
    pub async fn create(device: &wgpu::Device, common: Arc<RenderCommon>) -> anyhow::Result<Self> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("camera_bind_group_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bind_group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: common.camera_uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Standard pass pipeline layout"),
            bind_group_layouts: &[
                &camera_bind_group_layout,
                &common.light_uniform.bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Standard shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../shaders/standard.wgsl").into()),
        });

        let create_pipeline = |label: &str, primitive: wgpu::PrimitiveState| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[RENDER_MODEL_VBL, Instance::descriptor()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: common.output_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive,
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthTexture::DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: StencilState::default(),
                    bias: DepthBiasState::default(),
                }),
                multisample: MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let fill_pipeline = create_pipeline("Standard fill pipeline", FILL_PRIMITIVE_STATE);
        let line_pipeline = create_pipeline("Standard line pipeline", LINE_PRIMITIVE_STATE);

        if let Some(error) = device.pop_error_scope().await {
            return Err(anyhow::anyhow!("{error}")).context("Failed to create standard pass");
        }

        Ok(Self {
            fill_pipeline,
            line_pipeline,
            camera_bind_group,
            common,
        })
    }

    fn pipeline(&self, topology: Topology) -> &wgpu::RenderPipeline {
        match topology {
            Topology::Triangles => &self.fill_pipeline,
            Topology::Lines => &self.line_pipeline,
        }
    }

    pub fn render(
        &self,
        texture_views: &StandardPassTextureViews,
        encoder: &mut wgpu::CommandEncoder,
        queue: &wgpu::Queue,
        clear_color: Color,
        render_models: &Arena<RenderModel>,
    ) {
        let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Standard Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: texture_views.color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: texture_views.depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.common.light_uniform.bind_group, &[]);

        for (_id, render_model) in render_models.iter() {
            if !render_model.instances.should_render() {
                continue;
            }

            render_pass.set_pipeline(self.pipeline(render_model.topology));
            render_model_instances(&mut render_pass, queue, render_model);
        }
    }
}
