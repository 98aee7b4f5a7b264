//! Light source description. Immutable per frame; the manager stores a copy per light.

use glam::{Quat, Vec3};

/// Light kind. The discriminant is the integer tag the light pass shader switches on.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightType {
    Omni = 0,
    Spot = 1,
    Direct = 2,
}

impl LightType {
    pub const fn shader_tag(self) -> u32 {
        self as u32
    }

    /// Inverse of [`shader_tag`](Self::shader_tag). Unknown tags are read as `Direct`,
    /// matching the shader's final `else` branch.
    pub const fn from_shader_tag(tag: u32) -> Self {
        match tag {
            0 => LightType::Omni,
            1 => LightType::Spot,
            _ => LightType::Direct,
        }
    }

    /// Spot and Direct lights have a facing direction and get an arrow in the debug view.
    pub const fn is_oriented(self) -> bool {
        match self {
            LightType::Omni => false,
            LightType::Spot | LightType::Direct => true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub light_type: LightType,
    /// World-space position.
    pub position: Vec3,
    /// Spot/Direct shine along the +Z axis of this rotation.
    pub orientation: Quat,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    pub ambient_color: Vec3,
    /// Distance at which Omni/Spot attenuation reaches zero. Unused by Direct.
    pub falloff: f32,
    /// Spot cone half-angle in degrees. Unused by Omni/Direct.
    pub angle: f32,
}

impl Default for LightSource {
    fn default() -> Self {
        Self {
            light_type: LightType::Omni,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            diffuse_color: Vec3::ONE,
            specular_color: Vec3::ONE,
            ambient_color: Vec3::ZERO,
            falloff: 1000.0,
            angle: 60.0,
        }
    }
}

impl LightSource {
    pub fn omni(position: Vec3, diffuse_color: Vec3, falloff: f32) -> Self {
        Self {
            light_type: LightType::Omni,
            position,
            diffuse_color,
            falloff,
            ..Self::default()
        }
    }

    /// `angle_degrees` is the cone half-angle.
    pub fn spot(position: Vec3, orientation: Quat, diffuse_color: Vec3, falloff: f32, angle_degrees: f32) -> Self {
        Self {
            light_type: LightType::Spot,
            position,
            orientation,
            diffuse_color,
            falloff,
            angle: angle_degrees,
            ..Self::default()
        }
    }

    pub fn direct(orientation: Quat, diffuse_color: Vec3) -> Self {
        Self {
            light_type: LightType::Direct,
            orientation,
            diffuse_color,
            ..Self::default()
        }
    }

    pub fn with_specular(mut self, specular_color: Vec3) -> Self {
        self.specular_color = specular_color;
        self
    }

    pub fn with_ambient(mut self, ambient_color: Vec3) -> Self {
        self.ambient_color = ambient_color;
        self
    }

    /// +Z axis of the orientation.
    pub fn direction(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }
}
