//! Lightdeck Renderer: wgpu light buffer + Blinn-Phong light pass + light debug view.

pub mod config;
pub mod debug_pass;
pub mod error;
pub mod light_buffer;
pub mod light_pass;
pub mod resources;

pub use config::LightdeckConfig;
pub use debug_pass::{ArrowDataBuffer, DebugFrame, DebugGeometryFactory, DebugPass, WgpuLine};
pub use error::{RendererError, Result};
pub use light_buffer::LightBuffer;
pub use light_pass::{LightPass, MaterialMaps};
pub use resources::FrameResources;

use glam::{Mat4, Vec3};
use lightdeck_core::{LightManager, LightSource};

pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: LightdeckConfig,
    debug_pass: DebugPass,
    light_pass: LightPass,
    light_buffer: LightBuffer,
    lights: LightManager<WgpuLine, ArrowDataBuffer>,
    frame_resources: Option<FrameResources>,
}

impl Renderer {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Result<Self> {
        Self::new_with_config(device, queue, LightdeckConfig::default())
    }

    pub fn new_with_config(device: wgpu::Device, queue: wgpu::Queue, config: LightdeckConfig) -> Result<Self> {
        let debug_pass = DebugPass::new(&device, config.output_format)?;
        let light_pass = LightPass::new(&device, config.output_format).map_err(RendererError::Pipeline)?;
        let light_buffer = LightBuffer::new(&device, config.max_lights);
        let lights = LightManager::new(&mut DebugGeometryFactory::new(&device)).with_arrow_length(config.arrow_length);
        log::info!(
            "renderer ready: {} light slots, output {:?}, debug view {}",
            light_buffer.slots(),
            config.output_format,
            config.debug_visualization
        );
        Ok(Self {
            device,
            queue,
            config,
            debug_pass,
            light_pass,
            light_buffer,
            lights,
            frame_resources: None,
        })
    }

    pub fn device(&self) -> &wgpu::Device { &self.device }
    pub fn queue(&self) -> &wgpu::Queue { &self.queue }
    pub fn config(&self) -> &LightdeckConfig { &self.config }
    pub fn lights(&self) -> &LightManager<WgpuLine, ArrowDataBuffer> { &self.lights }
    pub fn light_buffer(&self) -> &LightBuffer { &self.light_buffer }

    /// Add a light and upload its debug proxy. Returns the light's index.
    pub fn add_light(&mut self, source: LightSource) -> Result<usize> {
        let mut factory = DebugGeometryFactory::new(&self.device);
        Ok(self.lights.add_light_source(&mut factory, source)?)
    }

    pub fn ensure_frame_resources(&mut self, width: u32, height: u32) -> Result<()> {
        let existing = self.frame_resources.take();
        let new_res = FrameResources::ensure_size(&self.device, existing, width, height)?;
        self.frame_resources = Some(new_res);
        Ok(())
    }

    /// G-buffer to fill before `encode_lighting`.
    pub fn frame_resources(&self) -> Option<&FrameResources> {
        self.frame_resources.as_ref()
    }

    /// Upload the light buffer and encode the light pass into `encoder`.
    /// Call ensure_frame_resources (or render_frame) first.
    pub fn encode_lighting(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        maps: &MaterialMaps,
        view_position: Vec3,
    ) -> Result<()> {
        let frame = self.frame_resources.as_ref().ok_or(RendererError::NoFrameResources)?;
        self.light_buffer.upload(&self.queue, &self.lights);
        self.light_pass.encode(
            encoder,
            &self.device,
            &self.queue,
            frame,
            maps,
            &self.light_buffer,
            view_position.to_array(),
            target,
        );
        Ok(())
    }

    /// Draw light proxies and arrows over `target`. Submits immediately; no-op when the debug
    /// view is disabled in the config.
    pub fn render_debug(&self, target: &wgpu::TextureView, view_projection: &Mat4) {
        if !self.config.debug_visualization {
            return;
        }
        let mut frame = self.debug_pass.frame(&self.device, &self.queue, target);
        self.lights.render_debug_visualization(&mut frame, view_projection);
    }

    /// Light the current G-buffer into `target`, then draw the debug view on top.
    pub fn render_frame(
        &mut self,
        width: u32,
        height: u32,
        target: &wgpu::TextureView,
        maps: &MaterialMaps,
        view_position: Vec3,
        view_projection: &Mat4,
    ) -> Result<()> {
        self.ensure_frame_resources(width, height)?;
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("lightdeck_frame") });
        self.encode_lighting(&mut encoder, target, maps, view_position)?;
        self.queue.submit([encoder.finish()]);
        self.render_debug(target, view_projection);
        Ok(())
    }
}
