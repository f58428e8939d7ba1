mod app;
mod assets;
mod click;
mod config;
mod ecs;
mod hunger;
mod overlay;
mod render;
mod scene;
mod sprite;
mod util;

fn main() {
    env_logger::init();
    log::info!("Cave starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
