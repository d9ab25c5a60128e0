//! Distance primitives for picking and cross-file correspondence
//!
//! Both primitives minimize the squared distance between two parametric
//! points over their parameter domains (`[0, 1]` for a segment, `[0, inf)`
//! for a ray). The unconstrained minimum is clamped to the domain, the other
//! parameter re-solved and clamped in turn; this resolves the convex problem
//! exactly, including the parallel case where the normal equations are
//! singular. All arithmetic runs in `f64`.
//!
//! [`segment_deviation`] is a stricter measure used to rank candidates that
//! are all at distance zero, as adjacent segments of a connected toolpath are.

use glam::{DQuat, DVec3, Vec3};

/// Squared lengths below this are treated as degenerate (point-like)
const DEGENERATE_EPSILON: f64 = 1e-12;

/// A one-way ray used for screen-space picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Need not be normalized; a zero direction degrades to a point query
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray through two points (e.g. near and far plane unprojections)
    pub fn through(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to - from)
    }
}

#[inline]
fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

#[inline]
fn clamp_ray(v: f64) -> f64 {
    v.max(0.0)
}

/// Closest-point parameters for `p(s) = p0 + s*d1` and `q(t) = q0 + t*d2`,
/// `t` in `[0, 1]`, `s` clamped by `clamp_s`.
fn closest_parameters(
    p0: DVec3,
    d1: DVec3,
    q0: DVec3,
    d2: DVec3,
    clamp_s: fn(f64) -> f64,
) -> (f64, f64) {
    let r = p0 - q0;
    let a = d1.dot(d1);
    let e = d2.dot(d2);
    let f = d2.dot(r);

    if a <= DEGENERATE_EPSILON && e <= DEGENERATE_EPSILON {
        return (0.0, 0.0);
    }
    if a <= DEGENERATE_EPSILON {
        return (0.0, clamp01(f / e));
    }

    let c = d1.dot(r);
    if e <= DEGENERATE_EPSILON {
        return (clamp_s(-c / a), 0.0);
    }

    let b = d1.dot(d2);
    let denom = a * e - b * b;

    // Parallel lines: any s works, pick the domain start and let t follow
    let mut s = if denom > DEGENERATE_EPSILON * a * e {
        clamp_s((b * f - c * e) / denom)
    } else {
        0.0
    };

    let mut t = (b * s + f) / e;
    if t < 0.0 {
        t = 0.0;
        s = clamp_s(-c / a);
    } else if t > 1.0 {
        t = 1.0;
        s = clamp_s((b - c) / a);
    }

    (s, t)
}

/// Minimum Euclidean distance between segments `p0-p1` and `q0-q1`.
///
/// Finite and non-negative for any finite input, 0 for coincident or
/// intersecting segments, independent of endpoint order.
pub fn segment_distance(p0: Vec3, p1: Vec3, q0: Vec3, q1: Vec3) -> f32 {
    let (p0, p1, q0, q1) = (p0.as_dvec3(), p1.as_dvec3(), q0.as_dvec3(), q1.as_dvec3());
    let d1 = p1 - p0;
    let d2 = q1 - q0;

    let (s, t) = closest_parameters(p0, d1, q0, d2, clamp01);
    (p0 + d1 * s).distance(q0 + d2 * t) as f32
}

/// Minimum Euclidean distance between a one-way ray and segment `q0-q1`.
///
/// Points behind the ray origin are not part of the ray.
pub fn ray_segment_distance(ray: &Ray, q0: Vec3, q1: Vec3) -> f32 {
    let origin = ray.origin.as_dvec3();
    let dir = ray.direction.as_dvec3();
    let (q0, q1) = (q0.as_dvec3(), q1.as_dvec3());
    let d2 = q1 - q0;

    let (s, t) = closest_parameters(origin, dir, q0, d2, clamp_ray);
    (origin + dir * s).distance(q0 + d2 * t) as f32
}

/// Distance from a point to segment `q0-q1`.
pub fn point_segment_distance(point: Vec3, q0: Vec3, q1: Vec3) -> f32 {
    segment_distance(point, point, q0, q1)
}

/// Mean distance between corresponding points of two segments.
///
/// Walks both segments in step, `p(s)` against `q(s)` for `s` in `[0, 1]`,
/// and integrates the gap. Zero only when the segments coincide with the
/// same orientation. The gap is `d + s*dd` with `d = p0 - q0` and
/// `dd = (p1 - p0) - (q1 - q0)`; rotating `dd` onto +X leaves the integral
/// of `sqrt((x + s*len)^2 + h^2)`, which has a closed form. When `dd`
/// vanishes the gap is constant and equal to `|d|`.
pub fn segment_deviation(p0: Vec3, p1: Vec3, q0: Vec3, q1: Vec3) -> f32 {
    let (p0, p1, q0, q1) = (p0.as_dvec3(), p1.as_dvec3(), q0.as_dvec3(), q1.as_dvec3());
    let d = p0 - q0;
    let dd = (p1 - p0) - (q1 - q0);

    let len = dd.length();
    if len * len <= DEGENERATE_EPSILON {
        return d.length() as f32;
    }

    let rotated = DQuat::from_rotation_arc(dd / len, DVec3::X) * d;
    let x = rotated.x;
    let h = (rotated.y * rotated.y + rotated.z * rotated.z).sqrt();

    ((gap_antiderivative(x + len, h) - gap_antiderivative(x, h)) / len) as f32
}

/// Antiderivative of `sqrt(u^2 + h^2)` in `u`
fn gap_antiderivative(u: f64, h: f64) -> f64 {
    if h <= 1e-12 {
        return 0.5 * u * u.abs();
    }
    0.5 * (u * (u * u + h * h).sqrt() + h * h * (u / h).asinh())
}
