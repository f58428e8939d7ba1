pub mod instance;
pub mod pipeline;
pub mod texture;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use winit::window::Window;

use crate::assets::{SceneAssets, SpriteKey};
use crate::scene::SpriteDraw;

use self::instance::{build_batches, DrawBatch, SpriteInstance};
use self::pipeline::SpritePipeline;
use self::texture::SpriteTexture;

/// Panel background shown wherever no sprite covers the window.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.855,
    g: 0.855,
    b: 0.855,
    a: 1.0,
};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("texture error: {0}")]
    Texture(String),
}

/// Core GPU state: device, queue, surface, sprite pipeline and uploaded textures.
pub struct GpuState {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub sprite_pipeline: SpritePipeline,
    textures: HashMap<SpriteKey, SpriteTexture>,
    instances: Vec<SpriteInstance>,
    batches: Vec<DrawBatch>,
}

/// Intermediate frame state returned by `begin_frame`.
pub struct FrameContext {
    pub output: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuState {
    /// Initialize wgpu and the sprite rendering pipeline.
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;

        log::info!(
            "GPU adapter: {:?} ({:?})",
            adapter.get_info().name,
            adapter.get_info().backend
        );

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cavepet_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            },
        ))?;

        let surface_caps = surface.get_capabilities(&adapter);

        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;

        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        // Fifo is guaranteed to be supported.
        let present_mode = wgpu::PresentMode::Fifo;

        log::info!(
            "Surface: format={:?}, alpha_mode={:?}, present_mode={:?}",
            format,
            alpha_mode,
            present_mode,
        );

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let sprite_pipeline = SpritePipeline::new(&device, format);
        sprite_pipeline.update_screen_size(
            &queue,
            surface_config.width as f32,
            surface_config.height as f32,
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            sprite_pipeline,
            textures: HashMap::new(),
            instances: Vec::new(),
            batches: Vec::new(),
        })
    }

    /// Upload every loaded image. A texture that fails to upload is logged
    /// and left out, so its draws are skipped like a missing file.
    pub fn upload_assets(&mut self, assets: &SceneAssets) {
        for (key, image) in assets.loaded() {
            let label = format!("{key:?}");
            match SpriteTexture::from_image(
                &self.device,
                &self.queue,
                &self.sprite_pipeline.texture_bind_group_layout,
                image,
                &label,
            ) {
                Ok(tex) => {
                    self.textures.insert(key, tex);
                }
                Err(e) => log::warn!("Skipping sprite {label}: {e}"),
            }
        }
        log::info!("Uploaded {} sprite textures", self.textures.len());
    }

    /// Natural size of an uploaded sprite, if any.
    pub fn sprite_size(&self, key: SpriteKey) -> Option<(u32, u32)> {
        self.textures.get(&key).map(|t| (t.width, t.height))
    }

    /// Resize the surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.sprite_pipeline
            .update_screen_size(&self.queue, width as f32, height as f32);
    }

    /// Batch this frame's draw list and upload the instance data.
    pub fn update_sprites(&mut self, draws: &[SpriteDraw]) {
        build_batches(draws, &mut self.instances, &mut self.batches);
        self.sprite_pipeline
            .update_instances(&self.device, &self.queue, &self.instances);
    }

    /// Acquire the next surface texture and create a command encoder.
    /// Returns None if the surface is lost/outdated (caller should skip this frame).
    pub fn begin_frame(&self) -> Option<FrameContext> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                return None;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                return None;
            }
            Err(e) => {
                log::warn!("Surface error: {e:?}");
                return None;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        Some(FrameContext {
            output,
            view,
            encoder,
        })
    }

    /// Clear and draw all sprite batches in paint order.
    pub fn draw_sprites(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("sprite_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let p = &self.sprite_pipeline;
        if p.num_instances == 0 {
            return;
        }

        render_pass.set_pipeline(&p.pipeline);
        render_pass.set_bind_group(0, &p.screen_bind_group, &[]);
        render_pass.set_vertex_buffer(0, p.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, p.instance_buffer.slice(..));
        render_pass.set_index_buffer(p.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

        for batch in &self.batches {
            let Some(tex) = self.textures.get(&batch.key) else {
                continue;
            };
            render_pass.set_bind_group(1, &tex.bind_group, &[]);
            render_pass.draw_indexed(0..6, 0, batch.instances.clone());
        }
    }

    /// Create an egui render pass that preserves existing content (LoadOp::Load).
    /// Returns a 'static render pass suitable for egui_wgpu::Renderer::render().
    pub fn begin_egui_pass(
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) -> wgpu::RenderPass<'static> {
        let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("egui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        render_pass.forget_lifetime()
    }

    /// Submit the command encoder and present.
    pub fn finish_frame(
        &self,
        encoder: wgpu::CommandEncoder,
        output: wgpu::SurfaceTexture,
        extra_cmd_bufs: Vec<wgpu::CommandBuffer>,
    ) {
        self.queue.submit(
            extra_cmd_bufs
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        output.present();
    }
}
