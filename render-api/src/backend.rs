//! Device capabilities consumed by the light manager. A backend (wgpu, or a mock in tests)
//! implements these; the manager is generic over them and never sees the GPU API.

use crate::{ArrowUniforms, PrimitiveTopology};

/// GPU line-strip resource built once from a point list.
pub trait LineGeometry {
    fn point_count(&self) -> u32;
}

/// Resource creation. Used when lights are inserted and when the manager is built.
pub trait GeometryFactory {
    type Line: LineGeometry;
    /// Constant-data resource for the arrow program; reused and overwritten per light.
    type ArrowData;

    /// Upload an ordered point list (line strip) into a new geometry resource.
    fn create_line_geometry(&mut self, points: &[[f32; 3]]) -> Result<Self::Line, String>;

    fn create_arrow_data(&mut self) -> Result<Self::ArrowData, String>;
}

/// Immediate-mode debug drawing. Every call is executed before the next one reads shared state,
/// so overwriting the arrow data between lights is safe.
pub trait DebugDevice {
    type Line: LineGeometry;
    type ArrowData;

    /// Draw a line strip with the given model-view-projection (column-major) and tint.
    fn draw_line(&mut self, line: &Self::Line, model_view_proj: &[f32; 16], tint: [f32; 3]);

    /// Bind the arrow program. `false` means the program is unavailable this frame and
    /// dependent draws must be skipped.
    fn use_arrow_program(&mut self) -> bool;

    fn write_arrow_data(&mut self, data: &Self::ArrowData, uniforms: &ArrowUniforms);

    fn bind_arrow_data(&mut self, data: &Self::ArrowData);

    /// Submit a draw with the currently bound program.
    fn submit_draw(&mut self, topology: PrimitiveTopology, vertex_count: u32);
}
