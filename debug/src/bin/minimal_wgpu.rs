//! Minimal wgpu init (no window). Renders one lit frame plus the light debug view offscreen.
//! Run: RUST_LOG=debug cargo run -p debug --bin minimal_wgpu

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use lightdeck_core::LightSource;
use lightdeck_renderer::resources::{solid_color_texture, FLAT_NORMAL_RGBA};
use lightdeck_renderer::{MaterialMaps, Renderer};

const SIZE: u32 = 256;

fn main() -> Result<(), String> {
    env_logger::init();
    pollster::block_on(async {
        let instance = wgpu::Instance::default();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions::default())
            .await
            .ok_or("No adapter")?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default(), None)
            .await
            .map_err(|e| e.to_string())?;
        let mut renderer = Renderer::new(device, queue).map_err(|e| e.to_string())?;

        renderer.add_light(LightSource::omni(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 0.8, 0.6), 6.0)).map_err(|e| e.to_string())?;
        renderer
            .add_light(LightSource::spot(Vec3::new(3.0, 3.0, 0.0), Quat::from_rotation_x(std::f32::consts::FRAC_PI_2), Vec3::Y, 8.0, 30.0))
            .map_err(|e| e.to_string())?;
        renderer
            .add_light(LightSource::direct(Quat::from_rotation_x(1.0), Vec3::splat(0.3)).with_ambient(Vec3::splat(0.05)))
            .map_err(|e| e.to_string())?;

        let target = renderer.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("minimal_target"),
            size: wgpu::Extent3d { width: SIZE, height: SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: renderer.config().output_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let target_view = target.create_view(&Default::default());
        let view = |label, rgba| Arc::new(solid_color_texture(renderer.device(), renderer.queue(), label, rgba).create_view(&Default::default()));
        let maps = MaterialMaps {
            albedo: view("albedo", [255; 4]),
            normal: view("normal", FLAT_NORMAL_RGBA),
            specular: view("specular", [255; 4]),
        };

        let eye = Vec3::new(0.0, 6.0, 8.0);
        let view_proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 100.0) * Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        renderer
            .render_frame(SIZE, SIZE, &target_view, &maps, eye, &view_proj)
            .map_err(|e| e.to_string())?;
        let _ = renderer.device().poll(wgpu::Maintain::Wait);
        println!(
            "Lightdeck minimal_wgpu: OK ({} lights, {} shaded, arrows {})",
            renderer.lights().len(),
            renderer.light_buffer().active_count(),
            renderer.lights().has_arrow_data()
        );
        Ok::<(), String>(())
    })
}
