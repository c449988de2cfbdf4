mod camera;
mod clock;
mod color;
mod config;
mod geometry;
mod material;
mod rendering;
mod scene_graph;
mod sphere;
mod stage;
mod viewport;
mod window;

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    pretty_env_logger::init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to initialize logger: {err}").into());
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    window::run()
}
