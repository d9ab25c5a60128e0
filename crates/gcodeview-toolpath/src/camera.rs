//! Initial camera placement derived from bounding statistics

use crate::stats::BoundingStats;
use glam::Vec3;

/// Initial orthographic camera placement for a freshly loaded toolpath
///
/// The target is the trimmed mean rather than the box center so that long
/// travel moves to a park position don't pull the view off the part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPlacement {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for CameraPlacement {
    fn default() -> Self {
        Self {
            eye: Vec3::ONE,
            target: Vec3::ZERO,
            up: Vec3::Z,
        }
    }
}

impl CameraPlacement {
    /// Eye sits `factor` of the bounds extent away from the target on every axis.
    pub fn from_stats(stats: &BoundingStats, factor: f32) -> Self {
        if stats.is_empty() {
            return Self::default();
        }

        let target = stats.trimmed_mean.truncate();
        let mut eye = target + stats.extent() * factor;

        // Flat or single-point toolpath: keep the eye off the target
        if eye.distance_squared(target) < f32::EPSILON {
            eye = target + Vec3::ONE;
        }

        Self {
            eye,
            target,
            up: Vec3::Z,
        }
    }

    /// Unit vector from the eye toward the target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_eye_offset_by_extent() {
        let stats = BoundingStats {
            min: Vec4::new(0.0, 0.0, 0.0, 0.0),
            max: Vec4::new(100.0, 50.0, 10.0, 3.0),
            mean: Vec4::ZERO,
            trimmed_mean: Vec4::new(40.0, 20.0, 5.0, 1.0),
            samples: 10,
        };
        let cam = CameraPlacement::from_stats(&stats, 0.2);
        assert_eq!(cam.target, Vec3::new(40.0, 20.0, 5.0));
        assert!(cam.eye.distance(Vec3::new(60.0, 30.0, 7.0)) < 1e-4);
        assert_eq!(cam.up, Vec3::Z);
    }

    #[test]
    fn test_empty_stats_use_default() {
        let cam = CameraPlacement::from_stats(&BoundingStats::default(), 0.2);
        assert_eq!(cam, CameraPlacement::default());
    }
}
