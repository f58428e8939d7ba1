pub mod ring;
pub mod timer;

use winit::window::Window;

use self::ring::RingBuffer;
use self::timer::{FramePhase, PhaseTimers};

use crate::config::{HUNGER_BAR_POS, HUNGER_BAR_SIZE};
use crate::render::GpuState;
use crate::scene::Scene;
use crate::util::Ticker;

/// Frame times averaged for the timing readout.
const FRAME_HISTORY_LEN: usize = 120;
/// Seconds between FPS log lines.
const FPS_LOG_INTERVAL: f64 = 5.0;

/// Scene values the overlay displays, captured once per frame.
#[derive(Debug, Clone, Copy)]
pub struct SceneSnapshot {
    pub hunger_fraction: f32,
    pub hunger_value: u32,
    pub frame_index: usize,
    pub frame_count: usize,
    pub offset: i32,
    pub target: i32,
    pub mirrored: bool,
    pub transition_active: bool,
    pub draggables: usize,
    pub dragging: bool,
}

impl SceneSnapshot {
    pub fn capture(scene: &Scene) -> Self {
        let t = scene.transition();
        Self {
            hunger_fraction: scene.hunger().fraction(),
            hunger_value: scene.hunger().value(),
            frame_index: scene.frame_index(),
            frame_count: scene.frame_count(),
            offset: t.offset(),
            target: t.target(),
            mirrored: t.is_mirrored(),
            transition_active: t.is_active(),
            draggables: scene.draggable_count(),
            dragging: scene.is_dragging(),
        }
    }
}

/// egui layer: the always-on hunger bar plus a toggleable debug panel.
pub struct Overlay {
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,

    /// Debug panel visibility (F12). The hunger bar is always drawn.
    pub debug_visible: bool,

    /// Rolling window of frame times (seconds).
    pub frame_times: RingBuffer<f64>,

    pub fps: f64,
    pub frame_time_avg: f64,
    pub frame_time_min: f64,
    pub frame_time_max: f64,

    pub phase_timers: PhaseTimers,

    frame_count: u64,
    log_ticker: Ticker,
}

impl Overlay {
    pub fn new(window: &Window, gpu: &GpuState) -> Self {
        let egui_ctx = egui::Context::default();

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(gpu.device.limits().max_texture_dimension_2d as usize),
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: true,
                predictable_texture_filtering: false,
            },
        );

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
            debug_visible: false,
            frame_times: RingBuffer::new(FRAME_HISTORY_LEN),
            fps: 0.0,
            frame_time_avg: 0.0,
            frame_time_min: 0.0,
            frame_time_max: 0.0,
            phase_timers: PhaseTimers::new(),
            frame_count: 0,
            log_ticker: Ticker::new(FPS_LOG_INTERVAL),
        }
    }

    /// Record a frame time, refresh the rolling stats and log them every
    /// `FPS_LOG_INTERVAL` seconds.
    pub fn record_frame(&mut self, dt: f64) {
        self.frame_count += 1;
        self.frame_times.push(dt);

        let (sum, min, max) = self
            .frame_times
            .iter()
            .fold((0.0, f64::MAX, 0.0f64), |(sum, min, max), &t| {
                (sum + t, min.min(t), max.max(t))
            });
        self.frame_time_avg = sum / self.frame_times.len() as f64;
        self.frame_time_min = min;
        self.frame_time_max = max;
        self.fps = 1.0 / self.frame_time_avg.max(f64::EPSILON);

        if self.log_ticker.advance(dt) > 0 {
            log::debug!(
                "{:.0} fps, {:.2}ms avg over last {} frames ({} total)",
                self.fps,
                self.frame_time_avg * 1000.0,
                self.frame_times.len(),
                self.frame_count,
            );
        }
    }

    pub fn toggle_debug(&mut self) {
        self.debug_visible = !self.debug_visible;
        log::info!("Debug overlay {}", if self.debug_visible { "shown" } else { "hidden" });
    }

    /// Forward a winit event to egui. Returns true if egui consumed it.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        response.consumed
    }

    /// Run the egui frame and produce paint output.
    /// Returns (clipped_primitives, textures_delta, screen_descriptor).
    pub fn run_frame(
        &mut self,
        window: &Window,
        screen_w: u32,
        screen_h: u32,
        scene: SceneSnapshot,
    ) -> (
        Vec<egui::epaint::ClippedPrimitive>,
        egui::TexturesDelta,
        egui_wgpu::ScreenDescriptor,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);

        // Snapshot read-only state so the closure does not borrow self.
        let ui_state = UiSnapshot {
            debug_visible: self.debug_visible,
            fps: self.fps,
            frame_time_avg: self.frame_time_avg,
            frame_time_min: self.frame_time_min,
            frame_time_max: self.frame_time_max,
            phase_durations: self.phase_timers.durations_us,
            scene,
        };

        let ctx = self.egui_ctx.clone();
        let full_output = ctx.run(raw_input, |ctx| {
            draw_hunger_bar(ctx, &ui_state.scene);
            if ui_state.debug_visible {
                draw_debug_panel(ctx, &ui_state);
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let clipped_primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [screen_w, screen_h],
            pixels_per_point,
        };

        (clipped_primitives, full_output.textures_delta, screen_descriptor)
    }

    /// Upload egui textures and buffers. Call before the egui render pass.
    pub fn prepare_egui(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::epaint::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor)
    }

    /// Render egui into the given render pass.
    pub fn render_egui(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::epaint::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures after present.
    pub fn free_textures(&mut self, textures_delta: &egui::TexturesDelta) {
        for &id in &textures_delta.free {
            self.egui_renderer.free_texture(&id);
        }
    }
}

// ---------------------------------------------------------------------------
// UI snapshot + free-function draw
// ---------------------------------------------------------------------------

struct UiSnapshot {
    debug_visible: bool,
    fps: f64,
    frame_time_avg: f64,
    frame_time_min: f64,
    frame_time_max: f64,
    phase_durations: [f64; FramePhase::ALL.len()],
    scene: SceneSnapshot,
}

fn draw_hunger_bar(ctx: &egui::Context, s: &SceneSnapshot) {
    egui::Area::new(egui::Id::new("hunger_bar"))
        .fixed_pos(HUNGER_BAR_POS)
        .interactable(false)
        .show(ctx, |ui| {
            ui.add_sized(
                HUNGER_BAR_SIZE,
                egui::ProgressBar::new(s.hunger_fraction)
                    .text(format!("Hunger {}", s.hunger_value)),
            );
        });
}

fn draw_debug_panel(ctx: &egui::Context, s: &UiSnapshot) {
    let sc = &s.scene;

    egui::Window::new("Debug")
        .default_pos([10.0, 60.0])
        .default_width(280.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Timing");
            ui.label(format!(
                "{:.0} fps, {:.2}ms avg ({:.2} .. {:.2})",
                s.fps,
                s.frame_time_avg * 1000.0,
                s.frame_time_min * 1000.0,
                s.frame_time_max * 1000.0,
            ));
            let total: f64 = s.phase_durations.iter().sum::<f64>().max(1.0);
            egui::Grid::new("phases").striped(true).show(ui, |ui| {
                for phase in FramePhase::ALL {
                    let us = s.phase_durations[phase as usize];
                    ui.label(phase.label());
                    ui.monospace(format!("{us:>6.0}us"));
                    ui.monospace(format!("{:>3.0}%", us / total * 100.0));
                    ui.end_row();
                }
            });
            ui.separator();

            ui.heading("Scene");
            ui.label(format!("Frame {}/{}", sc.frame_index + 1, sc.frame_count));
            let motion = match (sc.transition_active, sc.mirrored) {
                (true, true) => "moving left",
                (true, false) => "moving right",
                (false, true) => "facing left",
                (false, false) => "facing right",
            };
            ui.label(format!("Bear x {} (target {}), {motion}", sc.offset, sc.target));
            ui.label(format!("Hunger {}", sc.hunger_value));
            ui.label(format!(
                "{} apple(s){}",
                sc.draggables,
                if sc.dragging { ", one in hand" } else { "" }
            ));
            ui.separator();

            ui.small("Double-click moves the bear. F12 hides this, Esc quits.");
        });
}
