use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::{MeshConfig, StageConfig},
    sphere::WireframeSphere,
    stage::Stage,
};

pub enum UserEvent {
    /// Stage creation is asynchronous on the web, so it is delivered back through the event loop.
    StageReady(anyhow::Result<Stage>),
}

struct App {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    proxy: EventLoopProxy<UserEvent>,
    config: StageConfig,
    mesh: WireframeSphere,
    stage: Option<Stage>,
    window_created: bool,
}

impl App {
    fn new(proxy: EventLoopProxy<UserEvent>, config: StageConfig, mesh: MeshConfig) -> Self {
        Self {
            proxy,
            config,
            mesh: WireframeSphere::new(mesh),
            stage: None,
            window_created: false,
        }
    }

    fn create_stage(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = window_attributes(&self.config.canvas_id)?;
        let window = event_loop
            .create_window(attributes)
            .context("Failed to create window")?;
        let window = Arc::new(window);
        self.window_created = true;

        let config = self.config.clone();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let stage = pollster::block_on(Stage::init(window, config));
            self.on_stage_ready(event_loop, stage);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let stage = Stage::init(window, config).await;
                if proxy.send_event(UserEvent::StageReady(stage)).is_err() {
                    log::error!("Event loop closed before the stage was ready");
                }
            });
        }

        Ok(())
    }

    fn on_stage_ready(&mut self, event_loop: &ActiveEventLoop, stage: anyhow::Result<Stage>) {
        let mut stage = match stage {
            Ok(stage) => stage,
            Err(err) => {
                log::error!("Failed to initialize stage: {err:#}");
                event_loop.exit();
                return;
            }
        };

        if let Err(err) = self.mesh.init(&mut stage) {
            log::error!("Failed to initialize mesh: {err:#}");
            event_loop.exit();
            return;
        }

        // The canvas may have been resized while the stage was being created
        let size = stage.window().inner_size();
        stage.on_resize(size);

        stage.window().request_redraw();
        self.stage = Some(stage);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn window_attributes(_canvas_id: &str) -> anyhow::Result<WindowAttributes> {
    Ok(Window::default_attributes().with_title("wiresphere"))
}

#[cfg(target_arch = "wasm32")]
fn window_attributes(canvas_id: &str) -> anyhow::Result<WindowAttributes> {
    use wasm_bindgen::JsCast;
    use winit::platform::web::WindowAttributesExtWebSys;

    let canvas = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(canvas_id))
        .with_context(|| format!("No element with id {canvas_id}"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("Element {canvas_id} is not a canvas"))?;

    Ok(Window::default_attributes().with_canvas(Some(canvas)))
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_created {
            return;
        }

        if let Err(err) = self.create_stage(event_loop) {
            log::error!("{err:#}");
            event_loop.exit();
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::StageReady(stage) => self.on_stage_ready(event_loop, stage),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            event_loop.exit();
            return;
        }

        let Some(stage) = self.stage.as_mut() else {
            return;
        };

        match event {
            WindowEvent::Resized(new_size) => {
                stage.on_resize(new_size);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = stage.on_frame() {
                    log::error!("{err:#}");
                    event_loop.exit();
                    return;
                }

                self.mesh.on_frame(stage);
                stage.window().request_redraw();
            }
            _ => (),
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let event_loop = EventLoop::<UserEvent>::with_user_event()
        .build()
        .context("Failed to create event loop")?;
    let app = App::new(
        event_loop.create_proxy(),
        StageConfig::default(),
        MeshConfig::default(),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut app = app;
        event_loop.run_app(&mut app)?;
    }

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::EventLoopExtWebSys;
        event_loop.spawn_app(app);
    }

    Ok(())
}
