//! Lightdeck configuration: light slots, debug view, output format.

use lightdeck_core::DEFAULT_ARROW_LENGTH;

/// Renderer configuration.
#[derive(Clone, Debug)]
pub struct LightdeckConfig {
    /// Slots in the structured light buffer. Lights past this count are not shaded.
    pub max_lights: u32,
    /// Draw light proxies and direction arrows in `Renderer::render_debug`.
    pub debug_visualization: bool,
    /// Format of the target the light pass and debug pass render into (e.g. swapchain).
    pub output_format: wgpu::TextureFormat,
    /// Arrow length in world units.
    pub arrow_length: f32,
}

impl Default for LightdeckConfig {
    fn default() -> Self {
        Self {
            max_lights: 16,
            debug_visualization: true,
            output_format: wgpu::TextureFormat::Rgba8Unorm,
            arrow_length: DEFAULT_ARROW_LENGTH,
        }
    }
}
