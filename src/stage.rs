use std::sync::Arc;

use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    camera::PerspectiveCamera,
    clock::Clock,
    config::StageConfig,
    rendering::renderer::Renderer,
    scene_graph::Scene,
    viewport::Viewport,
};

/// Owns everything needed to draw a frame: scene, camera, lights and renderer.
pub struct Stage {
    config: StageConfig,
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: Renderer,
    frame_clock: Clock,
}

/// Points the camera at the viewport a resize to `requested` produces. Returns the viewport
/// the surface has to be resized to, or `None` when the request changes nothing.
fn resize_camera(
    camera: &mut PerspectiveCamera,
    current: Viewport,
    requested: PhysicalSize<u32>,
) -> Option<Viewport> {
    let viewport = current.resized(requested);
    if viewport == current {
        return None;
    }

    camera.set_viewport(viewport);
    Some(viewport)
}

impl Stage {
    pub async fn init(window: Arc<Window>, config: StageConfig) -> anyhow::Result<Stage> {
        let scene = Scene::new();
        let renderer = Renderer::new(window, config.render_config()).await?;
        let camera = config.camera.build(renderer.viewport());

        let mut stage = Self {
            config,
            scene,
            camera,
            renderer,
            frame_clock: Clock::new(),
        };
        stage.set_lights();

        let viewport = stage.renderer.viewport();
        log::info!("Stage ready at {}x{}", viewport.width(), viewport.height());

        Ok(stage)
    }

    fn set_lights(&mut self) {
        for light in &self.config.lights {
            self.scene.add_light(light.clone());
        }
    }

    pub fn window(&self) -> &Window {
        &self.renderer.window
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Updates the existing camera and resizes the render targets. Zero sizes are ignored.
    pub fn on_resize(&mut self, new_size: PhysicalSize<u32>) {
        match resize_camera(&mut self.camera, self.renderer.viewport(), new_size) {
            Some(viewport) => self.renderer.resize(viewport),
            None => log::debug!("Ignoring resize to {}x{}", new_size.width, new_size.height),
        }
    }

    pub fn on_frame(&mut self) -> anyhow::Result<()> {
        log::trace!("Frame time {:.2} ms", self.frame_clock.delta() * 1000.0);

        self.renderer.sync_models(&mut self.scene);
        self.scene.update_transforms();

        match self.renderer.render(&self.scene, &self.camera) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                anyhow::bail!("Out of memory while acquiring the next frame");
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timeout");
            }
            Err(other) => {
                log::error!("Unexpected error: {:?}", other);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraParams;

    #[test]
    fn camera_and_surface_agree_after_every_resize() {
        let mut surface = Viewport::clamped(PhysicalSize::new(800, 600));
        let mut camera = CameraParams::default().build(surface);

        let requests = [
            (1920, 1080),
            (0, 1080),
            (640, 0),
            (0, 0),
            (300, 900),
            (300, 900),
            (1, 1),
        ];

        for (width, height) in requests {
            if let Some(viewport) = resize_camera(&mut camera, surface, PhysicalSize::new(width, height)) {
                surface = viewport;
            }

            assert_eq!(camera.aspect, surface.aspect(), "after resize to {width}x{height}");
        }

        assert_eq!((surface.width(), surface.height()), (1, 1));
    }

    #[test]
    fn zero_sized_resize_keeps_camera_and_surface() {
        let surface = Viewport::clamped(PhysicalSize::new(1600, 800));
        let mut camera = CameraParams::default().build(surface);
        let position = camera.position;

        assert_eq!(resize_camera(&mut camera, surface, PhysicalSize::new(0, 800)), None);
        assert_eq!(resize_camera(&mut camera, surface, PhysicalSize::new(1600, 0)), None);

        assert_eq!(camera.aspect, 2.0);
        assert_eq!(camera.position, position);
    }

    #[test]
    fn resize_updates_the_existing_camera() {
        let surface = Viewport::clamped(PhysicalSize::new(800, 800));
        let mut camera = CameraParams::default().build(surface);

        let resized = resize_camera(&mut camera, surface, PhysicalSize::new(1200, 600));

        assert_eq!(resized, Some(Viewport::clamped(PhysicalSize::new(1200, 600))));
        assert_eq!(camera.aspect, 2.0);
        assert_eq!(camera.fov, 40.0);
        assert_eq!(camera.position, CameraParams::default().position());
    }
}
