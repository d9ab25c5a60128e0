//! Bounding statistics over one full pass of a segment stream
//!
//! Samples are segment endpoints. Alongside min/max/mean each channel gets a
//! trimmed mean: the first `window` samples are kept in a sorted window, and
//! every later sample either lands in the band between the window's two
//! middle order statistics (and is averaged) or displaces the window toward
//! itself. Long straight outlier runs at the model extremities barely move
//! the result, which makes it a good camera target.

use crate::gcode::{Axis, SegmentStream};
use gcodeview_core::constants::{MIN_TRIM_WINDOW, TRIM_WINDOW};
use glam::{Vec3, Vec4};
use tracing::debug;

/// Running trimmed mean for a single channel
#[derive(Debug, Clone)]
pub struct TrimmedMean {
    capacity: usize,
    window: Vec<f32>,
    sum: f64,
    count: usize,
}

impl TrimmedMean {
    /// `window` is raised to the smallest size with two middle elements
    pub fn new(window: usize) -> Self {
        let capacity = window.max(MIN_TRIM_WINDOW);
        Self {
            capacity,
            window: Vec::with_capacity(capacity),
            sum: 0.0,
            count: 0,
        }
    }

    pub fn is_window_full(&self) -> bool {
        self.window.len() == self.capacity
    }

    /// Number of post-window samples that fell inside the middle band
    pub fn band_count(&self) -> usize {
        self.count
    }

    pub fn push(&mut self, v: f32) {
        if !self.is_window_full() {
            let at = self.window.partition_point(|&x| x <= v);
            self.window.insert(at, v);
            return;
        }

        let mid = self.capacity / 2;
        let (lower, upper) = (self.window[mid - 1], self.window[mid]);

        if v < lower {
            // Smallest element leaves, v joins in order
            self.window.remove(0);
            let at = self.window.partition_point(|&x| x < v);
            self.window.insert(at, v);
        } else if v > upper {
            // Largest element leaves, v joins in order
            self.window.pop();
            let at = self.window.partition_point(|&x| x <= v);
            self.window.insert(at, v);
        } else {
            self.sum += f64::from(v);
            self.count += 1;
        }
    }

    /// Mean of the in-band samples.
    ///
    /// With no in-band samples (short stream, or nothing after the window
    /// filled) this falls back to the median of the window; an empty
    /// accumulator yields 0.
    pub fn value(&self) -> f32 {
        if self.count > 0 {
            return (self.sum / self.count as f64) as f32;
        }

        let n = self.window.len();
        match n {
            0 => 0.0,
            _ if n % 2 == 1 => self.window[n / 2],
            _ => (self.window[n / 2 - 1] + self.window[n / 2]) / 2.0,
        }
    }
}

/// Per-channel min, max, mean, and trimmed mean of segment endpoints
///
/// An empty stream yields all-zero statistics with `samples == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingStats {
    pub min: Vec4,
    pub max: Vec4,
    pub mean: Vec4,
    pub trimmed_mean: Vec4,
    pub samples: usize,
}

impl BoundingStats {
    /// Compute over a full pass of `buffer` with the default window.
    pub fn compute(buffer: &[u8]) -> Self {
        Self::compute_with_window(buffer, TRIM_WINDOW)
    }

    pub fn compute_with_window(buffer: &[u8], window: usize) -> Self {
        let mut min = Vec4::splat(f32::INFINITY);
        let mut max = Vec4::splat(f32::NEG_INFINITY);
        let mut sum = [0.0f64; 4];
        let mut trimmed: [TrimmedMean; 4] = std::array::from_fn(|_| TrimmedMean::new(window));
        let mut samples = 0usize;

        for segment in SegmentStream::new(buffer) {
            let p = segment.end;
            min = min.min(p);
            max = max.max(p);
            for axis in Axis::ALL {
                let k = axis.index();
                sum[k] += f64::from(p[k]);
                trimmed[k].push(p[k]);
            }
            samples += 1;
        }

        if samples == 0 {
            debug!("Empty segment stream, bounding statistics are zero");
            return Self::default();
        }

        let n = samples as f64;
        let stats = Self {
            min,
            max,
            mean: Vec4::from_array(sum.map(|s| (s / n) as f32)),
            trimmed_mean: Vec4::from_array(std::array::from_fn(|k| trimmed[k].value())),
            samples,
        };

        debug!(
            "Bounds over {} samples: x=[{:.2}, {:.2}], y=[{:.2}, {:.2}], z=[{:.2}, {:.2}], e=[{:.2}, {:.2}]",
            samples,
            stats.min.x,
            stats.max.x,
            stats.min.y,
            stats.max.y,
            stats.min.z,
            stats.max.z,
            stats.min.w,
            stats.max.w
        );
        stats
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Spatial extent (max - min)
    pub fn extent(&self) -> Vec3 {
        (self.max - self.min).truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_window_uses_median() {
        let mut odd = TrimmedMean::new(10);
        for v in [5.0, 1.0, 3.0] {
            odd.push(v);
        }
        assert!(!odd.is_window_full());
        assert_eq!(odd.value(), 3.0);

        let mut even = TrimmedMean::new(10);
        for v in [4.0, 1.0, 2.0, 8.0] {
            even.push(v);
        }
        assert_eq!(even.value(), 3.0);

        assert_eq!(TrimmedMean::new(10).value(), 0.0);
    }

    #[test]
    fn test_band_samples_are_averaged() {
        let mut tm = TrimmedMean::new(4);
        for v in [0.0, 10.0, 20.0, 30.0] {
            tm.push(v);
        }
        // Band is [10, 20]
        tm.push(12.0);
        tm.push(18.0);
        assert_eq!(tm.band_count(), 2);
        assert_eq!(tm.value(), 15.0);
    }

    #[test]
    fn test_outliers_displace_window() {
        let mut tm = TrimmedMean::new(4);
        for v in [0.0, 10.0, 20.0, 30.0] {
            tm.push(v);
        }
        tm.push(1000.0);
        // Window is now [0, 10, 20, 1000]; band unchanged
        assert_eq!(tm.window, vec![0.0, 10.0, 20.0, 1000.0]);
        tm.push(-5.0);
        assert_eq!(tm.window, vec![-5.0, 10.0, 20.0, 1000.0]);
        assert_eq!(tm.band_count(), 0);
    }

    #[test]
    fn test_tiny_window_is_raised() {
        let mut tm = TrimmedMean::new(0);
        tm.push(1.0);
        tm.push(3.0);
        assert!(tm.is_window_full());
        tm.push(2.0);
        assert_eq!(tm.value(), 2.0);
    }
}
