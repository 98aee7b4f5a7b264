//! Light debug window: a CPU-built floor G-buffer lit by an omni, a spot and a direct light,
//! with light proxies and direction arrows drawn on top.
//! Run: RUST_LOG=info cargo run -p debug --bin light_debug_window

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3, Vec4};
use lightdeck_core::LightSource;
use lightdeck_renderer::resources::{solid_color_texture, FrameResources, FLAT_NORMAL_RGBA};
use lightdeck_renderer::{LightdeckConfig, MaterialMaps, Renderer};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

const FLOOR_HALF_EXTENT: f32 = 10.0;
const UV_SCALE: f32 = 0.25;

fn camera(size: (u32, u32)) -> (Vec3, Mat4) {
    let (w, h) = size;
    let aspect = if h > 0 { w as f32 / h as f32 } else { 1.0 };
    let eye = Vec3::new(0.0, 7.0, 12.0);
    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, aspect, 0.1, 100.0);
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
    (eye, proj * view)
}

/// Ray-cast the y = 0 floor for every pixel and write the result into the G-buffer.
fn upload_floor(queue: &wgpu::Queue, frame: &FrameResources, view_proj: &Mat4) {
    let (w, h) = (frame.width(), frame.height());
    let inv = view_proj.inverse();
    let texels = (w * h) as usize;
    let mut position = vec![[0.0f32; 4]; texels];
    let mut normal = vec![[0.0f32; 4]; texels];
    let mut tangent = vec![[0.0f32; 4]; texels];
    let mut uv = vec![[0.0f32; 2]; texels];
    for y in 0..h {
        for x in 0..w {
            let ndc_x = (x as f32 + 0.5) / w as f32 * 2.0 - 1.0;
            let ndc_y = 1.0 - (y as f32 + 0.5) / h as f32 * 2.0;
            let near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
            let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
            let origin = near.truncate() / near.w;
            let dir = far.truncate() / far.w - origin;
            if dir.y.abs() < 1e-6 {
                continue;
            }
            let t = -origin.y / dir.y;
            let hit = origin + dir * t;
            if t < 0.0 || hit.x.abs() > FLOOR_HALF_EXTENT || hit.z.abs() > FLOOR_HALF_EXTENT {
                continue;
            }
            let i = (y * w + x) as usize;
            position[i] = hit.extend(1.0).to_array();
            normal[i] = [0.0, 1.0, 0.0, 0.0];
            tangent[i] = [1.0, 0.0, 0.0, 0.0];
            uv[i] = [hit.x * UV_SCALE, hit.z * UV_SCALE];
        }
    }
    let write = |texture: &wgpu::Texture, bytes: &[u8], texel_size: u32| {
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytes,
            wgpu::ImageDataLayout { offset: 0, bytes_per_row: Some(w * texel_size), rows_per_image: Some(h) },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );
    };
    write(&frame.gbuffer_position, bytemuck::cast_slice(&position), 16);
    write(&frame.gbuffer_normal, bytemuck::cast_slice(&normal), 16);
    write(&frame.gbuffer_tangent, bytemuck::cast_slice(&tangent), 16);
    write(&frame.gbuffer_uv, bytemuck::cast_slice(&uv), 8);
    log::debug!("floor G-buffer uploaded: {w}x{h}");
}

struct Gpu {
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    renderer: Renderer,
    maps: MaterialMaps,
    /// Size the floor G-buffer was last built for.
    floor_size: (u32, u32),
}

impl Gpu {
    async fn new(window: Arc<Window>) -> Result<Self, String> {
        let instance = wgpu::Instance::default();
        let size = window.inner_size();
        let surface = instance.create_surface(window).map_err(|e| e.to_string())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or("No adapter")?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default(), None)
            .await
            .map_err(|e| e.to_string())?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats.first().copied().unwrap_or(wgpu::TextureFormat::Rgba8Unorm);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Opaque,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let config = LightdeckConfig { output_format: format, ..LightdeckConfig::default() };
        let mut renderer = Renderer::new_with_config(device, queue, config).map_err(|e| e.to_string())?;
        let lights = [
            LightSource::omni(Vec3::new(-3.0, 2.0, 0.0), Vec3::new(1.0, 0.3, 0.2), 8.0),
            LightSource::spot(
                Vec3::new(3.0, 4.0, 1.0),
                Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
                Vec3::new(0.2, 0.5, 1.0),
                10.0,
                35.0,
            )
            .with_specular(Vec3::splat(0.8)),
            LightSource::direct(Quat::from_rotation_x(2.2), Vec3::splat(0.25)).with_ambient(Vec3::splat(0.08)),
        ];
        for light in lights {
            renderer.add_light(light).map_err(|e| e.to_string())?;
        }

        let view = |label, rgba| {
            Arc::new(solid_color_texture(renderer.device(), renderer.queue(), label, rgba).create_view(&Default::default()))
        };
        let maps = MaterialMaps {
            albedo: view("albedo", [200, 200, 200, 255]),
            normal: view("normal", FLAT_NORMAL_RGBA),
            specular: view("specular", [255; 4]),
        };
        Ok(Self { surface, surface_config, renderer, maps, floor_size: (0, 0) })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width.max(1);
        self.surface_config.height = height.max(1);
        self.surface.configure(self.renderer.device(), &self.surface_config);
    }

    fn render(&mut self) -> Result<(), String> {
        let size = (self.surface_config.width, self.surface_config.height);
        let (eye, view_proj) = camera(size);
        self.renderer.ensure_frame_resources(size.0, size.1).map_err(|e| e.to_string())?;
        if self.floor_size != size {
            if let Some(frame) = self.renderer.frame_resources() {
                upload_floor(self.renderer.queue(), frame, &view_proj);
                self.floor_size = size;
            }
        }

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Outdated) | Err(wgpu::SurfaceError::Lost) => {
                self.surface.configure(self.renderer.device(), &self.surface_config);
                self.surface.get_current_texture().map_err(|e| e.to_string())?
            }
            Err(wgpu::SurfaceError::Timeout) => return Err("Surface get_current_texture timeout".to_string()),
            Err(e) => return Err(e.to_string()),
        };
        let target = frame.texture.create_view(&Default::default());
        self.renderer
            .render_frame(size.0, size.1, &target, &self.maps, eye, &view_proj)
            .map_err(|e| e.to_string())?;
        frame.present();
        Ok(())
    }
}

#[derive(Default)]
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("Lightdeck light debug")
            .with_inner_size(winit::dpi::LogicalSize::new(800, 600));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("create window failed: {e}");
                event_loop.exit();
                return;
            }
        };
        match pollster::block_on(Gpu::new(window.clone())) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                log::error!("gpu init failed: {e}");
                event_loop.exit();
                return;
            }
        }
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(physical.width, physical.height);
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(gpu) = self.gpu.as_mut() {
                    if let Err(e) = gpu.render() {
                        log::warn!("frame skipped: {e}");
                    }
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::init();
    let event_loop = winit::event_loop::EventLoop::new().map_err(|e| e.to_string())?;
    let mut app = App::default();
    event_loop.run_app(&mut app).map_err(|e| e.to_string())?;
    Ok(())
}
