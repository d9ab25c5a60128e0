//! Segment-to-segment and ray-to-segment distances

use gcodeview_toolpath::{ray_segment_distance, segment_distance, Ray};
use glam::Vec3;
use proptest::prelude::*;

const EPS: f32 = 1e-4;

#[test]
fn test_identical_segments_are_zero() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(4.0, -2.0, 7.5);
    assert!(segment_distance(a, b, a, b).abs() < EPS);
    assert!(segment_distance(a, b, b, a).abs() < EPS);
}

#[test]
fn test_parallel_offset_segments() {
    let d = segment_distance(
        Vec3::ZERO,
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(2.0, 3.0, 0.0),
        Vec3::new(8.0, 3.0, 0.0),
    );
    assert!((d - 3.0).abs() < EPS);
    assert!(d.is_finite());
}

#[test]
fn test_skew_disjoint_segments() {
    // X-axis segment at z=0 and Y-direction segment at z=2 over it
    let d = segment_distance(
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, -1.0, 2.0),
        Vec3::new(0.0, 1.0, 2.0),
    );
    assert!((d - 2.0).abs() < EPS);
}

#[test]
fn test_skew_closest_at_endpoints() {
    // Lines would meet at the origin but the segments stop short of it
    let d = segment_distance(
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(5.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 1.0),
        Vec3::new(0.0, 6.0, 1.0),
    );
    assert!((d - 26.0f32.sqrt()).abs() < EPS);
}

#[test]
fn test_degenerate_points() {
    let p = Vec3::new(1.0, 1.0, 1.0);
    let q = Vec3::new(4.0, 5.0, 1.0);
    assert!((segment_distance(p, p, q, q) - 5.0).abs() < EPS);
}

#[test]
fn test_ray_hits_segment() {
    let ray = Ray::new(Vec3::new(0.5, 0.0, 10.0), Vec3::new(0.0, 0.0, -2.0));
    let d = ray_segment_distance(&ray, Vec3::ZERO, Vec3::X);
    assert!(d.abs() < EPS);
}

#[test]
fn test_ray_parallel_to_segment() {
    let ray = Ray::through(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
    let d = ray_segment_distance(&ray, Vec3::new(5.0, 0.0, 0.0), Vec3::new(6.0, 0.0, 0.0));
    assert!((d - 1.0).abs() < EPS);

    let behind = ray_segment_distance(&ray, Vec3::new(-6.0, 0.0, 0.0), Vec3::new(-5.0, 0.0, 0.0));
    assert!((behind - 26.0f32.sqrt()).abs() < EPS);
}

#[test]
fn test_ray_direction_length_does_not_matter() {
    let q0 = Vec3::new(3.0, 2.0, -1.0);
    let q1 = Vec3::new(-2.0, 4.0, 6.0);
    let short = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.1, 0.2, 0.0));
    let long = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 20.0, 0.0));
    let a = ray_segment_distance(&short, q0, q1);
    let b = ray_segment_distance(&long, q0, q1);
    assert!((a - b).abs() < EPS);
}

fn point() -> impl Strategy<Value = Vec3> {
    (-100.0f32..100.0, -100.0f32..100.0, -100.0f32..100.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn prop_symmetric_under_swap_and_reversal(p0 in point(), p1 in point(), q0 in point(), q1 in point()) {
        let d = segment_distance(p0, p1, q0, q1);
        prop_assert!(d.is_finite() && d >= 0.0);
        prop_assert!((d - segment_distance(q0, q1, p0, p1)).abs() < 1e-2);
        prop_assert!((d - segment_distance(p1, p0, q1, q0)).abs() < 1e-2);
    }

    #[test]
    fn prop_not_more_than_endpoint_distances(p0 in point(), p1 in point(), q0 in point(), q1 in point()) {
        let d = segment_distance(p0, p1, q0, q1);
        let endpoint_min = [p0.distance(q0), p0.distance(q1), p1.distance(q0), p1.distance(q1)]
            .into_iter()
            .fold(f32::INFINITY, f32::min);
        prop_assert!(d <= endpoint_min + 1e-3);
    }

    #[test]
    fn prop_ray_not_farther_than_origin(origin in point(), dir in point(), q0 in point(), q1 in point()) {
        let ray = Ray::new(origin, dir);
        let d = ray_segment_distance(&ray, q0, q1);
        let from_origin = segment_distance(origin, origin, q0, q1);
        prop_assert!(d.is_finite());
        prop_assert!(d <= from_origin + 1e-3);
    }
}
