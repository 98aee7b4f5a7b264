//! Wireframe proxies for the debug view. Pure and deterministic: same light type, same points.
//!
//! Points form a line strip in light-local space. wgpu has no line-loop topology, so every
//! closed shape repeats its first point at the end.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::light::LightType;

/// Segments per full circle.
pub const CIRCLE_SEGMENTS: u32 = 12;
/// Half-extent of the square drawn for directional lights.
pub const DIRECT_HALF_EXTENT: f32 = 3.0;

pub const DIRECT_POINT_COUNT: usize = 5;
pub const OMNI_POINT_COUNT: usize = 43;
pub const SPOT_POINT_COUNT: usize = 13;

pub fn build_debug_geometry(light_type: LightType) -> Vec<Vec3> {
    match light_type {
        LightType::Direct => direct_square(),
        LightType::Omni => omni_sphere(),
        LightType::Spot => spot_circle(),
    }
}

/// Point count produced by [`build_debug_geometry`] for `light_type`.
pub const fn point_count(light_type: LightType) -> usize {
    match light_type {
        LightType::Direct => DIRECT_POINT_COUNT,
        LightType::Omni => OMNI_POINT_COUNT,
        LightType::Spot => SPOT_POINT_COUNT,
    }
}

fn circle_sample(i: u32) -> (f32, f32) {
    let a = TAU * i as f32 / CIRCLE_SEGMENTS as f32;
    (a.cos(), a.sin())
}

fn direct_square() -> Vec<Vec3> {
    let e = DIRECT_HALF_EXTENT;
    vec![
        Vec3::new(-e, e, 0.0),
        Vec3::new(e, e, 0.0),
        Vec3::new(e, -e, 0.0),
        Vec3::new(-e, -e, 0.0),
        Vec3::new(-e, e, 0.0),
    ]
}

/// Three orthogonal unit circles (XY, XZ, YZ) in one strip. The quarter arc in XZ carries the
/// strip from the end of the XZ circle (+X) to the start of the YZ circle (+Z).
fn omni_sphere() -> Vec<Vec3> {
    let mut points = Vec::with_capacity(OMNI_POINT_COUNT);
    points.extend((0..=CIRCLE_SEGMENTS).map(|i| {
        let (c, s) = circle_sample(i);
        Vec3::new(c, s, 0.0)
    }));
    points.extend((0..=CIRCLE_SEGMENTS).map(|i| {
        let (c, s) = circle_sample(i);
        Vec3::new(c, 0.0, s)
    }));
    points.extend((0..=CIRCLE_SEGMENTS / 4).map(|i| {
        let (c, s) = circle_sample(i);
        Vec3::new(c, 0.0, s)
    }));
    points.extend((0..=CIRCLE_SEGMENTS).map(|i| {
        let (c, s) = circle_sample(i);
        Vec3::new(0.0, s, c)
    }));
    points
}

fn spot_circle() -> Vec<Vec3> {
    let mut points: Vec<Vec3> = (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let (c, s) = circle_sample(i);
            Vec3::new(c, s, 0.0)
        })
        .collect();
    points.push(points[0]);
    points
}

/// Flatten to the plain arrays a [`render_api::GeometryFactory`] uploads.
pub fn to_point_array(points: &[Vec3]) -> Vec<[f32; 3]> {
    points.iter().map(|p| p.to_array()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [LightType; 3] = [LightType::Omni, LightType::Spot, LightType::Direct];

    #[test]
    fn point_counts() {
        assert_eq!(build_debug_geometry(LightType::Direct).len(), 5);
        assert_eq!(build_debug_geometry(LightType::Omni).len(), 43);
        assert_eq!(build_debug_geometry(LightType::Spot).len(), 13);
        for t in ALL {
            assert_eq!(build_debug_geometry(t).len(), point_count(t));
        }
    }

    #[test]
    fn deterministic() {
        for t in ALL {
            assert_eq!(build_debug_geometry(t), build_debug_geometry(t));
        }
    }

    #[test]
    fn closed_shapes_repeat_first_point() {
        for t in [LightType::Direct, LightType::Spot] {
            let p = build_debug_geometry(t);
            assert_eq!(p.first(), p.last());
        }
    }

    #[test]
    fn direct_square_extent() {
        let p = build_debug_geometry(LightType::Direct);
        for v in &p {
            assert_eq!(v.x.abs(), DIRECT_HALF_EXTENT);
            assert_eq!(v.y.abs(), DIRECT_HALF_EXTENT);
            assert_eq!(v.z, 0.0);
        }
    }

    #[test]
    fn omni_circles_are_unit_and_planar() {
        let p = build_debug_geometry(LightType::Omni);
        for v in &p {
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
        assert!(p[0..13].iter().all(|v| v.z == 0.0));
        assert!(p[13..30].iter().all(|v| v.y == 0.0));
        assert!(p[30..43].iter().all(|v| v.x == 0.0));
        // accent arc ends a quarter turn in
        assert!((p[29] - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn spot_circle_lies_in_xy() {
        let p = build_debug_geometry(LightType::Spot);
        assert!(p.iter().all(|v| v.z == 0.0 && (v.length() - 1.0).abs() < 1e-5));
        assert_eq!(p[0], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn point_array_matches() {
        let p = build_debug_geometry(LightType::Direct);
        let a = to_point_array(&p);
        assert_eq!(a[1], [3.0, 3.0, 0.0]);
    }
}
