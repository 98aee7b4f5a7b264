mod common;

use common::MockDevice;
use glam::{Quat, Vec3};
use lightdeck_core::shading::{accumulate_lights, compute_color, shade_pixel, SurfaceSample};
use lightdeck_core::{LightManager, LightRawData, LightSource};

fn flat_surface(world_pos: Vec3, normal: Vec3, tangent: Vec3) -> SurfaceSample {
    SurfaceSample {
        world_pos,
        normal,
        tangent,
        albedo: Vec3::ONE,
        normal_map: Vec3::new(0.5, 0.5, 1.0),
        specular_map: Vec3::ZERO,
    }
}

#[test]
fn omni_light_at_half_falloff_gives_quarter_diffuse() {
    let mut device = MockDevice::new();
    let mut manager = LightManager::new(&mut device);
    manager
        .add_light_source(&mut device, LightSource::omni(Vec3::ZERO, Vec3::ONE, 10.0))
        .unwrap();
    let lights = manager.raw_light_data_snapshot(1);
    // surface at z = 5 facing back towards the light
    let surface = flat_surface(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::X);
    let color = shade_pixel(&lights, manager.len(), &surface, Vec3::new(3.0, 4.0, 20.0));
    for c in color.to_array() {
        assert!((c - 0.25).abs() < 1e-5, "got {color:?}");
    }
}

#[test]
fn no_lights_is_black_regardless_of_textures() {
    let mut device = MockDevice::new();
    let manager: LightManager<_, ()> = LightManager::new(&mut device);
    let lights = manager.raw_light_data_snapshot(8);
    let surface = SurfaceSample {
        albedo: Vec3::new(0.9, 0.8, 0.7),
        specular_map: Vec3::ONE,
        normal_map: Vec3::new(0.2, 0.7, 0.9),
        ..flat_surface(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, Vec3::X)
    };
    assert_eq!(shade_pixel(&lights, 0, &surface, Vec3::ZERO), Vec3::ZERO);
}

#[test]
fn spot_at_zero_distance_matches_direct() {
    let orientation = Quat::from_rotation_y(0.7) * Quat::from_rotation_x(0.2);
    let spot = LightSource::spot(Vec3::new(2.0, 1.0, -3.0), orientation, Vec3::new(0.6, 0.5, 0.4), 10.0, 30.0);
    let direct = LightSource::direct(orientation, Vec3::new(0.6, 0.5, 0.4));
    let normal = orientation * Vec3::Z;

    let spot_sums = accumulate_lights(&[LightRawData::from(&spot)], spot.position, normal, Vec3::new(0.0, 10.0, 0.0));
    let direct_sums = accumulate_lights(&[LightRawData::from(&direct)], spot.position, normal, Vec3::new(0.0, 10.0, 0.0));
    assert!((spot_sums.diffuse - direct_sums.diffuse).length() < 1e-6);
    assert!((spot_sums.diffuse - spot.diffuse_color).length() < 1e-5);
}

#[test]
fn ambient_is_linear_in_light_count_and_ignores_distance() {
    let ambient = Vec3::new(0.05, 0.04, 0.03);
    let near = LightSource::omni(Vec3::ZERO, Vec3::ONE, 1.0).with_ambient(ambient);
    let far = LightSource::omni(Vec3::new(0.0, 1e4, 0.0), Vec3::ONE, 1.0).with_ambient(ambient);
    let direct = LightSource::direct(Quat::IDENTITY, Vec3::ONE).with_ambient(ambient);
    let lights: Vec<LightRawData> = [near, far, direct].iter().map(LightRawData::from).collect();

    let world_pos = Vec3::new(0.0, 0.0, 50.0);
    for n in 0..=3 {
        let sums = accumulate_lights(&lights[..n], world_pos, Vec3::Z, Vec3::ZERO);
        assert!((sums.ambient - ambient * n as f32).length() < 1e-6);
    }
    // far beyond falloff: no diffuse, full ambient
    let sums = accumulate_lights(&lights[1..2], world_pos, Vec3::NEG_Y, Vec3::ZERO);
    assert_eq!(sums.diffuse, Vec3::ZERO);
    assert_eq!(sums.ambient, ambient);
}

#[test]
fn fallback_slots_contribute_when_counted() {
    let lights = [LightRawData::fallback()];
    let sums = accumulate_lights(&lights, Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z, Vec3::ZERO);
    assert_eq!(sums.ambient, Vec3::splat(0.3));
    let color = compute_color(&sums, Vec3::splat(0.5), Vec3::ZERO);
    assert!((color - Vec3::splat(0.15)).length() < 1e-6);
}
