//! Plain data passed from the light manager to a debug device each draw.

/// Primitive topology for `DebugDevice::submit_draw`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveTopology {
    PointList,
    LineStrip,
}

/// Per-light constant data for the arrow program. Column-major matrix (WGSL/wgpu convention).
/// Layout matches `ArrowData` in the arrow shader (112 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ArrowUniforms {
    pub view_proj: [f32; 16],
    /// Rotation quaternion (x, y, z, w).
    pub orientation: [f32; 4],
    pub position: [f32; 3],
    /// Arrow length in world units.
    pub length: f32,
    pub color: [f32; 4],
}

impl Default for ArrowUniforms {
    fn default() -> Self {
        Self {
            view_proj: [
                1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
            ],
            orientation: [0.0, 0.0, 0.0, 1.0],
            position: [0.0; 3],
            length: 1.0,
            color: [1.0; 4],
        }
    }
}
