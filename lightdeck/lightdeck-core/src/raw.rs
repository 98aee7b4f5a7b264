//! GPU light record. One per slot of the structured light buffer.

use glam::Vec3;

use crate::light::{LightSource, LightType};

/// Falloff of the fallback record; far enough to be unattenuated at demo scale.
pub const FALLBACK_FALLOFF: f32 = 1000.0;
pub const FALLBACK_AMBIENT: f32 = 0.3;
pub const FALLBACK_ANGLE_DEGREES: f32 = 60.0;

/// Must match `LightData` in `lighting.wgsl`: vec3 + scalar groups, 80 bytes, 16-byte aligned.
/// Angles are radians.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightRawData {
    pub position: [f32; 3],
    pub light_type: u32,
    pub direction: [f32; 3],
    pub falloff: f32,
    pub diffuse_color: [f32; 3],
    pub angle: f32,
    pub ambient_color: [f32; 3],
    pub _pad0: u32,
    pub specular_color: [f32; 3],
    pub _pad1: u32,
}

const _: () = assert!(std::mem::size_of::<LightRawData>() == 80);

impl LightRawData {
    /// Record returned for empty light slots: white omni light at the origin, 0.3 ambient.
    pub fn fallback() -> Self {
        Self {
            position: [0.0; 3],
            light_type: LightType::Omni.shader_tag(),
            direction: Vec3::Z.to_array(),
            falloff: FALLBACK_FALLOFF,
            diffuse_color: [1.0; 3],
            angle: FALLBACK_ANGLE_DEGREES.to_radians(),
            ambient_color: [FALLBACK_AMBIENT; 3],
            _pad0: 0,
            specular_color: [1.0; 3],
            _pad1: 0,
        }
    }

    pub fn light_type(&self) -> LightType {
        LightType::from_shader_tag(self.light_type)
    }
}

impl From<&LightSource> for LightRawData {
    fn from(source: &LightSource) -> Self {
        Self {
            position: source.position.to_array(),
            light_type: source.light_type.shader_tag(),
            direction: source.direction().to_array(),
            falloff: source.falloff,
            diffuse_color: source.diffuse_color.to_array(),
            angle: source.angle.to_radians(),
            ambient_color: source.ambient_color.to_array(),
            _pad0: 0,
            specular_color: source.specular_color.to_array(),
            _pad1: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::mem::offset_of;

    use glam::Quat;

    use super::*;

    #[test]
    fn layout_matches_shader() {
        assert_eq!(std::mem::size_of::<LightRawData>(), 80);
        assert_eq!(offset_of!(LightRawData, position), 0);
        assert_eq!(offset_of!(LightRawData, light_type), 12);
        assert_eq!(offset_of!(LightRawData, direction), 16);
        assert_eq!(offset_of!(LightRawData, falloff), 28);
        assert_eq!(offset_of!(LightRawData, diffuse_color), 32);
        assert_eq!(offset_of!(LightRawData, angle), 44);
        assert_eq!(offset_of!(LightRawData, ambient_color), 48);
        assert_eq!(offset_of!(LightRawData, specular_color), 64);
    }

    #[test]
    fn fallback_record() {
        let f = LightRawData::fallback();
        assert_eq!(f.position, [0.0, 0.0, 0.0]);
        assert_eq!(f.direction, [0.0, 0.0, 1.0]);
        assert_eq!(f.light_type(), LightType::Omni);
        assert_eq!(f.diffuse_color, [1.0; 3]);
        assert_eq!(f.specular_color, [1.0; 3]);
        assert_eq!(f.ambient_color, [0.3; 3]);
        assert_eq!(f.falloff, 1000.0);
        assert!((f.angle - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    }

    #[test]
    fn from_source_converts_angle_and_direction() {
        let source = LightSource::spot(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::new(0.5, 0.6, 0.7),
            25.0,
            30.0,
        )
        .with_ambient(Vec3::splat(0.1));
        let raw = LightRawData::from(&source);
        assert_eq!(raw.position, [1.0, 2.0, 3.0]);
        assert_eq!(raw.light_type, 1);
        assert_eq!(raw.falloff, 25.0);
        assert_eq!(raw.diffuse_color, [0.5, 0.6, 0.7]);
        assert_eq!(raw.ambient_color, [0.1; 3]);
        assert!((raw.angle - 30.0f32.to_radians()).abs() < 1e-6);
        let d = Vec3::from_array(raw.direction);
        assert!((d - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn bytes_are_plain() {
        let raw = LightRawData::fallback();
        let bytes = bytemuck::bytes_of(&raw);
        assert_eq!(bytes.len(), 80);
        let light_type = u32::from_ne_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
        assert_eq!(light_type, 0);
    }
}
