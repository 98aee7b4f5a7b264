//! CPU reference of the per-pixel light accumulation in `lighting.wgsl`.
//!
//! Sign convention: `light_dir` points from the light to the surface, `view_dir` from the eye
//! to the surface, and the shading normal is the negated surface normal. All three therefore
//! point "into" the surface and the usual Blinn-Phong dot products stay positive.

use glam::Vec3;

use crate::light::LightType;
use crate::raw::LightRawData;

/// Blinn-Phong shininess, shared by every light.
pub const SPECULAR_POWER: f32 = 30.0;
/// Guards the falloff division for lights with zero falloff.
pub const FALLOFF_EPSILON: f32 = 1e-7;

/// Per-pixel sums over all active lights, before texturing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightSums {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub ambient: Vec3,
}

/// Everything the light pass reads for one pixel: G-buffer values plus material map texels.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceSample {
    pub world_pos: Vec3,
    /// Geometric normal, pointing away from the surface.
    pub normal: Vec3,
    pub tangent: Vec3,
    pub albedo: Vec3,
    /// Raw normal map texel in `[0, 1]`.
    pub normal_map: Vec3,
    pub specular_map: Vec3,
}

fn saturate(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Quadratic falloff for Omni/Spot: 1 at the light, exactly 0 at `falloff` and beyond.
/// Direct lights are never attenuated.
pub fn attenuation(light_type: LightType, distance: f32, falloff: f32) -> f32 {
    match light_type {
        LightType::Omni | LightType::Spot => {
            let f = 1.0 - saturate(distance / (falloff + FALLOFF_EPSILON));
            f * f
        }
        LightType::Direct => 1.0,
    }
}

/// Rebuild the shading normal from a normal map texel and the tangent basis
/// (rows: tangent, normal x tangent, normal). The result is negated, see the module docs.
pub fn shading_normal(normal_map: Vec3, tangent: Vec3, normal: Vec3) -> Vec3 {
    let ts = normal_map * 2.0 - Vec3::ONE;
    let bitangent = normal.cross(tangent);
    -(tangent * ts.x + bitangent * ts.y + normal * ts.z).normalize_or_zero()
}

/// Direction from the light to `world_pos` and the distance between them.
/// At zero distance Omni/Spot fall back to the light's own direction.
fn incident(light: &LightRawData, world_pos: Vec3) -> (Vec3, f32) {
    let direction = Vec3::from_array(light.direction);
    match light.light_type() {
        LightType::Omni | LightType::Spot => {
            let ldv = world_pos - Vec3::from_array(light.position);
            let dist = ldv.length();
            let dir = if dist > 0.0 { ldv / dist } else { direction };
            (dir, dist)
        }
        LightType::Direct => (direction, 0.0),
    }
}

/// Accumulate diffuse, specular and ambient terms of `lights` at one pixel.
/// `normal` is the shading normal from [`shading_normal`].
pub fn accumulate_lights(lights: &[LightRawData], world_pos: Vec3, normal: Vec3, view_position: Vec3) -> LightSums {
    let view_dir = (world_pos - view_position).normalize_or_zero();
    let mut sums = LightSums::default();
    for light in lights {
        let (light_dir, dist) = incident(light, world_pos);
        let atten = attenuation(light.light_type(), dist, light.falloff);

        let ndol = light_dir.dot(normal).max(0.0);
        sums.diffuse += Vec3::from_array(light.diffuse_color) * (ndol * atten);

        let h = (view_dir + light_dir).normalize_or_zero();
        let spec = normal.dot(h).max(0.0).powf(SPECULAR_POWER);
        sums.specular += Vec3::from_array(light.specular_color) * (spec * atten);

        // ambient ignores distance and type
        sums.ambient += Vec3::from_array(light.ambient_color);
    }
    sums
}

/// Combine light sums with the material: albedo modulates ambient and diffuse, the specular
/// map modulates specular. Clamped to `[0, 1]`.
pub fn compute_color(sums: &LightSums, albedo: Vec3, specular_map: Vec3) -> Vec3 {
    (sums.ambient * albedo + sums.diffuse * albedo + sums.specular * specular_map).clamp(Vec3::ZERO, Vec3::ONE)
}

/// Full per-pixel evaluation over the first `lights_count` slots of `lights`.
pub fn shade_pixel(lights: &[LightRawData], lights_count: usize, surface: &SurfaceSample, view_position: Vec3) -> Vec3 {
    let active = &lights[..lights_count.min(lights.len())];
    let normal = shading_normal(surface.normal_map, surface.tangent, surface.normal);
    let sums = accumulate_lights(active, surface.world_pos, normal, view_position);
    compute_color(&sums, surface.albedo, surface.specular_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn omni(position: Vec3, falloff: f32) -> LightRawData {
        LightRawData {
            position: position.to_array(),
            light_type: LightType::Omni.shader_tag(),
            falloff,
            ambient_color: [0.0; 3],
            ..LightRawData::fallback()
        }
    }

    #[test]
    fn omni_attenuation_endpoints() {
        assert_eq!(attenuation(LightType::Omni, 0.0, 10.0), 1.0);
        assert_eq!(attenuation(LightType::Omni, 10.0, 10.0), 0.0);
        assert_eq!(attenuation(LightType::Omni, 25.0, 10.0), 0.0);
        assert!((attenuation(LightType::Omni, 5.0, 10.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn omni_attenuation_is_monotone() {
        let mut prev = f32::INFINITY;
        for i in 0..=100 {
            let a = attenuation(LightType::Omni, i as f32 * 0.1, 10.0);
            assert!((0.0..=1.0).contains(&a));
            assert!(a <= prev);
            prev = a;
        }
    }

    #[test]
    fn zero_falloff_does_not_divide_by_zero() {
        assert_eq!(attenuation(LightType::Spot, 0.0, 0.0), 1.0);
        assert_eq!(attenuation(LightType::Spot, 1.0, 0.0), 0.0);
    }

    #[test]
    fn direct_attenuation_is_one() {
        for d in [0.0, 1.0, 1e3, 1e9] {
            assert_eq!(attenuation(LightType::Direct, d, 0.0), 1.0);
        }
    }

    #[test]
    fn flat_normal_map_negates_geometric_normal() {
        let n = shading_normal(Vec3::new(0.5, 0.5, 1.0), Vec3::X, Vec3::Y);
        assert!((n - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn normal_map_tilts_along_tangent() {
        let n = shading_normal(Vec3::new(1.0, 0.5, 0.5), Vec3::X, Vec3::Y);
        assert!((n - Vec3::NEG_X).length() < 1e-6);
    }

    #[test]
    fn facing_away_gets_no_diffuse() {
        let lights = [omni(Vec3::ZERO, 10.0)];
        let sums = accumulate_lights(&lights, Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(sums.diffuse, Vec3::ZERO);
    }

    #[test]
    fn specular_peaks_on_mirror_direction() {
        let lights = [LightRawData {
            light_type: LightType::Direct.shader_tag(),
            direction: [0.0, 0.0, 1.0],
            ambient_color: [0.0; 3],
            ..LightRawData::fallback()
        }];
        // eye straight above along the light, normal aligned: h == normal
        let sums = accumulate_lights(&lights, Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -3.0));
        assert!((sums.specular - Vec3::ONE).length() < 1e-5);
        assert!((sums.diffuse - Vec3::ONE).length() < 1e-6);
    }

    #[test]
    fn output_is_saturated() {
        let sums = LightSums {
            diffuse: Vec3::splat(3.0),
            specular: Vec3::splat(2.0),
            ambient: Vec3::splat(1.0),
        };
        assert_eq!(compute_color(&sums, Vec3::ONE, Vec3::ONE), Vec3::ONE);
    }

    #[test]
    fn shade_pixel_respects_lights_count() {
        let lights = [omni(Vec3::ZERO, 10.0), omni(Vec3::ZERO, 10.0)];
        let surface = SurfaceSample {
            world_pos: Vec3::new(0.0, 0.0, 5.0),
            normal: Vec3::NEG_Z,
            tangent: Vec3::X,
            albedo: Vec3::ONE,
            normal_map: Vec3::new(0.5, 0.5, 1.0),
            specular_map: Vec3::ZERO,
        };
        let one = shade_pixel(&lights, 1, &surface, Vec3::new(0.0, 0.0, 10.0));
        let two = shade_pixel(&lights, 2, &surface, Vec3::new(0.0, 0.0, 10.0));
        let many = shade_pixel(&lights, 99, &surface, Vec3::new(0.0, 0.0, 10.0));
        assert!((one.x - 0.25).abs() < 1e-5);
        assert!((two.x - 0.5).abs() < 1e-5);
        assert_eq!(two, many);
    }
}
