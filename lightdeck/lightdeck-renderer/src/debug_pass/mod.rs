//! Debug pass: wgpu backend for `render_api` debug drawing (light proxies and direction arrows).
//!
//! Drawing is immediate: each call encodes its own render pass and submits it, so the shared
//! line and arrow uniform buffers can be overwritten by the next call.

use render_api::{ArrowUniforms, DebugDevice, GeometryFactory, LineGeometry, PrimitiveTopology};
use wgpu::util::DeviceExt;

use crate::error::{RendererError, Result};

const LINE_SHADER: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/debug_line.wgsl"));
const ARROW_SHADER: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/arrow.wgsl"));

/// wgpu has no geometry shaders: the arrow vertex shader expands each submitted point into
/// this many line-list vertices (shaft plus two head strokes).
pub const ARROW_VERTICES_PER_POINT: u32 = 6;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LineUniform {
    model_view_proj: [f32; 16],
    tint: [f32; 3],
    _pad0: f32,
}

const LINE_UNIFORM_SIZE: u64 = std::mem::size_of::<LineUniform>() as u64;
const ARROW_UNIFORM_SIZE: u64 = std::mem::size_of::<ArrowUniforms>() as u64;

/// Line-strip vertex buffer of one light proxy.
pub struct WgpuLine {
    vertex_buf: wgpu::Buffer,
    point_count: u32,
}

impl LineGeometry for WgpuLine {
    fn point_count(&self) -> u32 {
        self.point_count
    }
}

/// Uniform buffer backing the arrow program.
pub struct ArrowDataBuffer {
    buffer: wgpu::Buffer,
}

/// Run `f` inside an error scope; a captured error becomes `Err`.
fn scoped<T>(device: &wgpu::Device, filter: wgpu::ErrorFilter, f: impl FnOnce() -> T) -> std::result::Result<T, String> {
    device.push_error_scope(filter);
    let value = f();
    match pollster::block_on(device.pop_error_scope()) {
        Some(e) => Err(e.to_string()),
        None => Ok(value),
    }
}

/// Creates proxy and arrow resources on a device. Used at light insertion.
pub struct DebugGeometryFactory<'a> {
    device: &'a wgpu::Device,
}

impl<'a> DebugGeometryFactory<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }
}

impl GeometryFactory for DebugGeometryFactory<'_> {
    type Line = WgpuLine;
    type ArrowData = ArrowDataBuffer;

    fn create_line_geometry(&mut self, points: &[[f32; 3]]) -> std::result::Result<WgpuLine, String> {
        if points.is_empty() {
            return Err("line geometry needs at least one point".to_string());
        }
        let vertex_buf = scoped(self.device, wgpu::ErrorFilter::OutOfMemory, || {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("light_proxy_vertex"),
                contents: bytemuck::cast_slice(points),
                usage: wgpu::BufferUsages::VERTEX,
            })
        })?;
        Ok(WgpuLine { vertex_buf, point_count: points.len() as u32 })
    }

    fn create_arrow_data(&mut self) -> std::result::Result<ArrowDataBuffer, String> {
        let buffer = scoped(self.device, wgpu::ErrorFilter::OutOfMemory, || {
            self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("arrow_data"),
                size: ARROW_UNIFORM_SIZE,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        })?;
        Ok(ArrowDataBuffer { buffer })
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str, size: u64) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: std::num::NonZeroU64::new(size),
            },
            count: None,
        }],
    })
}

pub struct DebugPass {
    line_pipeline: wgpu::RenderPipeline,
    /// `None` when the arrow pipeline failed to build; arrows are skipped.
    arrow_pipeline: Option<wgpu::RenderPipeline>,
    line_bind_group_layout: wgpu::BindGroupLayout,
    arrow_bind_group_layout: wgpu::BindGroupLayout,
    line_uniform_buf: wgpu::Buffer,
}

impl DebugPass {
    pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat) -> Result<Self> {
        let line_bind_group_layout = uniform_layout(device, "debug_line_bind_group_layout", LINE_UNIFORM_SIZE);
        let arrow_bind_group_layout = uniform_layout(device, "arrow_bind_group_layout", ARROW_UNIFORM_SIZE);

        let line_pipeline = scoped(device, wgpu::ErrorFilter::Validation, || {
            let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("debug_line_shader"),
                source: wgpu::ShaderSource::Wgsl(LINE_SHADER.into()),
            });
            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("debug_line_pipeline_layout"),
                bind_group_layouts: &[&line_bind_group_layout],
                push_constant_ranges: &[],
            });
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("debug_line_pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: 12,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3,
                        }],
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs"),
                    targets: &[Some(output_format.into())],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::LineStrip,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        })
        .map_err(RendererError::Pipeline)?;

        let arrow_pipeline = scoped(device, wgpu::ErrorFilter::Validation, || {
            let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("arrow_shader"),
                source: wgpu::ShaderSource::Wgsl(ARROW_SHADER.into()),
            });
            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("arrow_pipeline_layout"),
                bind_group_layouts: &[&arrow_bind_group_layout],
                push_constant_ranges: &[],
            });
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("arrow_pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs"),
                    targets: &[Some(output_format.into())],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::LineList,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        });
        let arrow_pipeline = match arrow_pipeline {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("arrow pipeline unavailable, direction arrows disabled: {e}");
                None
            }
        };

        let line_uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("debug_line_uniform"),
            size: LINE_UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        log::debug!("debug pass ready (arrows: {})", arrow_pipeline.is_some());
        Ok(Self {
            line_pipeline,
            arrow_pipeline,
            line_bind_group_layout,
            arrow_bind_group_layout,
            line_uniform_buf,
        })
    }

    pub fn has_arrow_program(&self) -> bool {
        self.arrow_pipeline.is_some()
    }

    /// Debug device drawing onto `target` for one frame.
    pub fn frame<'a>(&'a self, device: &'a wgpu::Device, queue: &'a wgpu::Queue, target: &'a wgpu::TextureView) -> DebugFrame<'a> {
        DebugFrame {
            pass: self,
            device,
            queue,
            target,
            arrow_bound: false,
            arrow_bind_group: None,
        }
    }
}

/// Immediate-mode `DebugDevice` over one target view.
pub struct DebugFrame<'a> {
    pass: &'a DebugPass,
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    target: &'a wgpu::TextureView,
    arrow_bound: bool,
    arrow_bind_group: Option<wgpu::BindGroup>,
}

impl DebugFrame<'_> {
    fn submit_pass(&self, label: &str, pipeline: &wgpu::RenderPipeline, bind_group: &wgpu::BindGroup, vertex_buf: Option<&wgpu::Buffer>, vertices: u32) {
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.target,
                    resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rp.set_pipeline(pipeline);
            rp.set_bind_group(0, bind_group, &[]);
            if let Some(vb) = vertex_buf {
                rp.set_vertex_buffer(0, vb.slice(..));
            }
            rp.draw(0..vertices, 0..1);
        }
        self.queue.submit([encoder.finish()]);
    }
}

impl DebugDevice for DebugFrame<'_> {
    type Line = WgpuLine;
    type ArrowData = ArrowDataBuffer;

    fn draw_line(&mut self, line: &WgpuLine, model_view_proj: &[f32; 16], tint: [f32; 3]) {
        let uniform = LineUniform { model_view_proj: *model_view_proj, tint, _pad0: 0.0 };
        self.queue.write_buffer(&self.pass.line_uniform_buf, 0, bytemuck::bytes_of(&uniform));
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("debug_line_bind_group"),
            layout: &self.pass.line_bind_group_layout,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: self.pass.line_uniform_buf.as_entire_binding() }],
        });
        self.submit_pass("debug_line", &self.pass.line_pipeline, &bind_group, Some(&line.vertex_buf), line.point_count);
    }

    fn use_arrow_program(&mut self) -> bool {
        self.arrow_bound = self.pass.arrow_pipeline.is_some();
        self.arrow_bound
    }

    fn write_arrow_data(&mut self, data: &ArrowDataBuffer, uniforms: &ArrowUniforms) {
        self.queue.write_buffer(&data.buffer, 0, bytemuck::bytes_of(uniforms));
    }

    fn bind_arrow_data(&mut self, data: &ArrowDataBuffer) {
        self.arrow_bind_group = Some(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("arrow_bind_group"),
            layout: &self.pass.arrow_bind_group_layout,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: data.buffer.as_entire_binding() }],
        }));
    }

    fn submit_draw(&mut self, topology: PrimitiveTopology, vertex_count: u32) {
        match topology {
            PrimitiveTopology::PointList => {
                let (true, Some(pipeline), Some(bind_group)) =
                    (self.arrow_bound, self.pass.arrow_pipeline.as_ref(), self.arrow_bind_group.as_ref())
                else {
                    log::warn!("arrow draw submitted without a bound arrow program and data");
                    return;
                };
                self.submit_pass("arrow", pipeline, bind_group, None, vertex_count * ARROW_VERTICES_PER_POINT);
            }
            PrimitiveTopology::LineStrip => {
                log::warn!("debug device: bare line-strip draws are not supported, use draw_line");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes() {
        assert_eq!(LINE_UNIFORM_SIZE, 80);
        assert_eq!(ARROW_UNIFORM_SIZE, 112);
    }
}
