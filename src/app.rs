use std::sync::Arc;

use glam::Vec2;
use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::assets::SceneAssets;
use crate::click::{ClickEvent, ClickState};
use crate::config::{self, SceneConfig};
use crate::overlay::timer::FramePhase;
use crate::overlay::{Overlay, SceneSnapshot};
use crate::render::{GpuState, RenderError};
use crate::scene::Scene;

/// Top-level application state.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    overlay: Option<Overlay>,

    scene: Scene,
    /// Decoded images, handed to the GPU once the window exists.
    assets: Option<SceneAssets>,

    click: ClickState,
    cursor: Vec2,

    last_frame_time: Option<Instant>,

    // Window dimensions
    screen_w: u32,
    screen_h: u32,

    /// Set if GPU init failed; returned from `run`.
    init_error: Option<RenderError>,
}

impl App {
    fn new(config: SceneConfig, assets: SceneAssets) -> Self {
        Self {
            window: None,
            gpu: None,
            overlay: None,
            scene: Scene::new(config),
            assets: Some(assets),
            click: ClickState::new(),
            cursor: Vec2::ZERO,
            last_frame_time: None,
            screen_w: 0,
            screen_h: 0,
            init_error: None,
        }
    }

    fn request_redraw(&self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => {
                log::info!("ESC pressed, exiting");
                event_loop.exit();
            }
            PhysicalKey::Code(KeyCode::F12) => {
                if let Some(overlay) = &mut self.overlay {
                    overlay.toggle_debug();
                }
            }
            _ => {}
        }
    }

    fn on_left_button(&mut self, pressed: bool) {
        match self.click.update(pressed) {
            Some(ClickEvent::Pressed { double }) => {
                let outcome = self.scene.press(self.cursor, double);
                log::trace!("Press at {:?} (double={double}): {outcome:?}", self.cursor);
            }
            Some(ClickEvent::Released) => self.scene.release(),
            None => {}
        }
    }

    /// Advance timers, rebuild the draw list, render sprites + overlay.
    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_frame_time
            .map(|last| now.duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_frame_time = Some(now);

        let (Some(window), Some(gpu), Some(overlay)) =
            (&self.window, &mut self.gpu, &mut self.overlay)
        else {
            return;
        };

        overlay.record_frame(dt);
        self.click.advance(dt);

        // --- Timers ---
        overlay.phase_timers.begin();
        self.scene.update(dt);
        overlay.phase_timers.end(FramePhase::SceneUpdate);

        // --- Draw list ---
        overlay.phase_timers.begin();
        let draws = self
            .scene
            .sprite_draws(self.screen_h as f32, |key| gpu.sprite_size(key));
        overlay.phase_timers.end(FramePhase::BuildDraws);

        overlay.phase_timers.begin();
        gpu.update_sprites(&draws);
        overlay.phase_timers.end(FramePhase::GpuUpload);

        // --- Render ---
        let Some(frame) = gpu.begin_frame() else {
            return;
        };
        let mut encoder = frame.encoder;
        gpu.draw_sprites(&mut encoder, &frame.view);

        overlay.phase_timers.begin();
        let snapshot = SceneSnapshot::capture(&self.scene);
        let (primitives, textures_delta, screen_desc) =
            overlay.run_frame(window, self.screen_w, self.screen_h, snapshot);
        let extra = overlay.prepare_egui(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &primitives,
            &textures_delta,
            &screen_desc,
        );
        {
            let mut pass = GpuState::begin_egui_pass(&mut encoder, &frame.view);
            overlay.render_egui(&mut pass, &primitives, &screen_desc);
        }
        overlay.phase_timers.end(FramePhase::Overlay);

        overlay.phase_timers.begin();
        gpu.finish_frame(encoder, frame.output, extra);
        overlay.free_textures(&textures_delta);
        overlay.phase_timers.end(FramePhase::RenderSubmit);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (w, h) = config::WINDOW_SIZE;
        let attrs = WindowAttributes::default()
            .with_title(config::WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(w, h));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.screen_w = size.width;
        self.screen_h = size.height;
        log::info!("Window created: {}x{}", size.width, size.height);

        let mut gpu = match GpuState::new(window.clone()) {
            Ok(gpu) => gpu,
            Err(e) => {
                self.init_error = Some(e);
                event_loop.exit();
                return;
            }
        };
        if let Some(assets) = self.assets.take() {
            gpu.upload_assets(&assets);
        }
        log::info!("wgpu + sprite pipeline initialized");

        self.overlay = Some(Overlay::new(&window, &gpu));
        self.gpu = Some(gpu);

        // Continuous redraw; Fifo presentation paces the loop.
        event_loop.set_control_flow(ControlFlow::Poll);

        self.window = Some(window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let consumed = match (&self.window, &mut self.overlay) {
            (Some(window), Some(overlay)) => overlay.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some((w, h)) = usable_size(new_size) {
                    if let Some(gpu) = &mut self.gpu {
                        gpu.resize(w, h);
                        self.screen_w = w;
                        self.screen_h = h;
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.on_key(event_loop, &event),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                if self.scene.drag_to(self.cursor) {
                    self.request_redraw();
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } if !consumed || state == ElementState::Released => {
                self.on_left_button(state == ElementState::Pressed);
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

/// Window size worth rendering at. Minimising reports 0x0, which keeps the
/// previous size.
fn usable_size(size: PhysicalSize<u32>) -> Option<(u32, u32)> {
    (size.width > 0 && size.height > 0).then_some((size.width, size.height))
}

/// Load assets, create the event loop and run until exit.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = SceneConfig::default();
    let asset_dir = config::asset_dir();
    let assets = SceneAssets::load(&asset_dir, config.frame_count);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, assets);
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimised_size_is_ignored() {
        assert_eq!(usable_size(PhysicalSize::new(0, 0)), None);
        assert_eq!(usable_size(PhysicalSize::new(1920, 0)), None);
        assert_eq!(usable_size(PhysicalSize::new(0, 1080)), None);
        assert_eq!(usable_size(PhysicalSize::new(800, 600)), Some((800, 600)));
    }
}
