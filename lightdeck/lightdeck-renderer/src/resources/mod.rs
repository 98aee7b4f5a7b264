//! Frame resources: the G-buffer the light pass reads. Filled by an external G-buffer pass
//! (or `queue.write_texture`), sized to the viewport.
//!
//! Layout: position (xyz world position, w = 1 where a surface was written, 0 elsewhere),
//! normal (xyz geometric normal), tangent (xyz), uv (xy material coordinates).

use wgpu::TextureView;

use crate::error::{RendererError, Result};

pub const GBUFFER_POSITION_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;
pub const GBUFFER_NORMAL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;
pub const GBUFFER_TANGENT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;
pub const GBUFFER_UV_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rg32Float;

pub struct FrameResources {
    pub gbuffer_position: wgpu::Texture,
    pub gbuffer_normal: wgpu::Texture,
    pub gbuffer_tangent: wgpu::Texture,
    pub gbuffer_uv: wgpu::Texture,
    width: u32,
    height: u32,
}

impl FrameResources {
    /// Reuse `existing` when the size matches, otherwise allocate a new G-buffer.
    pub fn ensure_size(device: &wgpu::Device, existing: Option<Self>, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RendererError::InvalidFrameSize { width, height });
        }
        if let Some(r) = existing {
            if r.width == width && r.height == height {
                return Ok(r);
            }
        }
        let make_rt = |label: &str, format: wgpu::TextureFormat| {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            })
        };
        let gbuffer_position = make_rt("gbuffer_position", GBUFFER_POSITION_FORMAT);
        let gbuffer_normal = make_rt("gbuffer_normal", GBUFFER_NORMAL_FORMAT);
        let gbuffer_tangent = make_rt("gbuffer_tangent", GBUFFER_TANGENT_FORMAT);
        let gbuffer_uv = make_rt("gbuffer_uv", GBUFFER_UV_FORMAT);
        log::debug!("frame resources allocated: {width}x{height}");
        Ok(Self { gbuffer_position, gbuffer_normal, gbuffer_tangent, gbuffer_uv, width, height })
    }
    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn position_view(&self) -> TextureView { self.gbuffer_position.create_view(&Default::default()) }
    pub fn normal_view(&self) -> TextureView { self.gbuffer_normal.create_view(&Default::default()) }
    pub fn tangent_view(&self) -> TextureView { self.gbuffer_tangent.create_view(&Default::default()) }
    pub fn uv_view(&self) -> TextureView { self.gbuffer_uv.create_view(&Default::default()) }
}

/// 1x1 texture of a single color, used for missing material maps.
pub fn solid_color_texture(device: &wgpu::Device, queue: &wgpu::Queue, label: &str, rgba: [u8; 4]) -> wgpu::Texture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d { width: 1, height: 1, depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &rgba,
        wgpu::ImageDataLayout { offset: 0, bytes_per_row: Some(4), rows_per_image: Some(1) },
        wgpu::Extent3d { width: 1, height: 1, depth_or_array_layers: 1 },
    );
    texture
}

/// Texel of a flat tangent-space normal map (0, 0, 1) encoded to `[0, 255]`.
pub const FLAT_NORMAL_RGBA: [u8; 4] = [128, 128, 255, 255];
