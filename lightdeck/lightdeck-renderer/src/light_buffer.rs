//! Structured light buffer: one `LightRawData` per slot, rewritten in full every frame.

use lightdeck_core::{LightManager, LightRawData};

pub struct LightBuffer {
    buffer: wgpu::Buffer,
    slots: u32,
    active: u32,
    overflow_warned: bool,
}

/// Number of lights the shader loops over: every light, up to the slot count.
pub fn active_light_count(light_count: usize, slots: u32) -> u32 {
    light_count.min(slots as usize) as u32
}

impl LightBuffer {
    pub fn new(device: &wgpu::Device, slots: u32) -> Self {
        let slots = slots.max(1);
        let size = std::mem::size_of::<LightRawData>() as u64 * slots as u64;
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("light_data"),
            size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        log::info!("light buffer: {slots} slots, {size} bytes");
        Self { buffer, slots, active: 0, overflow_warned: false }
    }

    /// Write a full snapshot of `lights`. Unused slots get the fallback record.
    /// The write lands before any command buffer submitted afterwards.
    pub fn upload<L, A>(&mut self, queue: &wgpu::Queue, lights: &LightManager<L, A>) -> u32
    where
        L: render_api::LineGeometry,
    {
        let records = lights.raw_light_data_snapshot(self.slots as usize);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&records));
        if lights.len() > self.slots as usize && !self.overflow_warned {
            log::warn!("{} lights exceed {} light slots; extra lights are not shaded", lights.len(), self.slots);
            self.overflow_warned = true;
        }
        self.active = active_light_count(lights.len(), self.slots);
        self.active
    }

    pub fn buffer(&self) -> &wgpu::Buffer { &self.buffer }
    pub fn slots(&self) -> u32 { self.slots }
    /// Light count from the last upload.
    pub fn active_count(&self) -> u32 { self.active }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_count_is_clamped_to_slots() {
        assert_eq!(active_light_count(0, 16), 0);
        assert_eq!(active_light_count(3, 16), 3);
        assert_eq!(active_light_count(16, 16), 16);
        assert_eq!(active_light_count(40, 16), 16);
    }

    #[test]
    fn record_stride() {
        assert_eq!(std::mem::size_of::<LightRawData>() % 16, 0);
    }
}
