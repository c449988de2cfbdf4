use std::sync::Arc;

use anyhow::Context;
use id_arena::Arena;
use wgpu::CommandEncoderDescriptor;
use winit::window::Window;

use crate::{
    camera::{CameraUniform, PerspectiveCamera},
    rendering::{
        config::RenderConfig,
        instance::gather_instances,
        light_uniform::LightUniformState,
        passes::standard_pass::{StandardPass, StandardPassTextureViews},
        render_common::{self, RenderCommon},
        render_model::RenderModel,
        texture::DepthTexture,
    },
    scene_graph::Scene,
    viewport::Viewport,
};

pub struct Renderer {
    pub window: Arc<Window>,
    pub config: RenderConfig,

    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    viewport: Viewport,
    device: wgpu::Device,
    queue: wgpu::Queue,

    common: Arc<RenderCommon>,
    depth_texture: DepthTexture,
    render_models: Arena<RenderModel>,

    camera_uniform: CameraUniform,

    standard_pass: StandardPass,
}

#[cfg(target_arch = "wasm32")]
fn instance_descriptor() -> wgpu::InstanceDescriptor {
    wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn instance_descriptor() -> wgpu::InstanceDescriptor {
    wgpu::InstanceDescriptor::default()
}

#[cfg(target_arch = "wasm32")]
fn required_limits(adapter: &wgpu::Adapter) -> wgpu::Limits {
    wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
}

#[cfg(not(target_arch = "wasm32"))]
fn required_limits(_adapter: &wgpu::Adapter) -> wgpu::Limits {
    wgpu::Limits::default()
}

impl Renderer {
    pub async fn new(window: Arc<Window>, config: RenderConfig) -> anyhow::Result<Renderer> {
        let viewport = Viewport::clamped(window.inner_size());

        let instance = wgpu::Instance::new(&instance_descriptor());
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter")?;

        log::info!("Using adapter {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: required_limits(&adapter),
                label: Some("Device"),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to request device")?;

        let surface_config = render_common::surface_configuration(&surface, &adapter, viewport)?;
        surface.configure(&device, &surface_config);

        let camera_uniform = CameraUniform::default();
        let common = Arc::new(RenderCommon::new(
            &device,
            render_common::output_format(&surface_config),
            camera_uniform.create_buffer(&device),
        ));

        let depth_texture = DepthTexture::new(&device, viewport, "Depth Texture");
        let standard_pass = StandardPass::create(&device, common.clone()).await?;

        Ok(Self {
            window,
            config,
            surface,
            surface_config,
            viewport,
            device,
            queue,
            common,
            depth_texture,
            render_models: Arena::new(),
            camera_uniform,
            standard_pass,
        })
    }

    /// Creates GPU buffers for scene models added since the last call.
    pub fn sync_models(&mut self, scene: &mut Scene) {
        for (_id, scene_model) in scene.models.iter_mut() {
            if scene_model.render_model.is_some() {
                continue;
            }

            let render_model = RenderModel::from_scene_model(&self.device, scene_model);
            log::debug!(
                "Uploaded model {} with {} indices",
                scene_model.name,
                render_model.num_indices
            );
            scene_model.render_model = Some(self.render_models.alloc(render_model));
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.surface_config.width = viewport.width();
        self.surface_config.height = viewport.height();
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_texture.resize(&self.device, viewport);
    }

    /// Reconfigures the surface at its current size, after it was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.resize(self.viewport);
    }

    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<(), wgpu::SurfaceError> {
        self.camera_uniform.update(camera);
        self.camera_uniform
            .update_buffer(&self.queue, &self.common.camera_uniform_buffer);
        self.common
            .light_uniform
            .update(&self.queue, LightUniformState::from_lights(scene.lights()));

        gather_instances(scene, &mut self.render_models);

        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.common.output_format),
            ..Default::default()
        });

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.standard_pass.render(
            &StandardPassTextureViews {
                color: &view,
                depth: self.depth_texture.view(),
            },
            &mut encoder,
            &self.queue,
            self.config.clear_color,
            &self.render_models,
        );

        self.queue.submit([encoder.finish()]);
        output.present();

        Ok(())
    }
}
