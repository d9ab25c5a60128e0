//! Toolpath segments produced by the stream parser.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// One of the four channels a motion command can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
    /// Auxiliary channel (extruded material)
    E,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::E];

    /// Map an axis word letter to its channel.
    pub fn from_letter(letter: u8) -> Option<Self> {
        match letter {
            b'X' => Some(Axis::X),
            b'Y' => Some(Axis::Y),
            b'Z' => Some(Axis::Z),
            b'E' => Some(Axis::E),
            _ => None,
        }
    }

    /// Component index inside a `Vec4` point.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::E => 3,
        }
    }
}

/// How the auxiliary channel changes along a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stroke {
    /// Auxiliary value increases (material deposited)
    Extrude,
    /// Auxiliary value decreases
    Retract,
    /// Auxiliary value unchanged
    Travel,
}

/// A single motion command's start/end endpoint pair.
///
/// `w` holds the auxiliary channel. A segment's index is its ordinal among
/// all motion commands of the buffer it came from and is meaningless for any
/// other buffer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub start: Vec4,
    pub end: Vec4,
}

impl Segment {
    pub fn new(start: Vec4, end: Vec4) -> Self {
        Self { start, end }
    }

    /// Spatial start point
    #[inline]
    pub fn start_xyz(&self) -> Vec3 {
        self.start.truncate()
    }

    /// Spatial end point
    #[inline]
    pub fn end_xyz(&self) -> Vec3 {
        self.end.truncate()
    }

    /// Change of the auxiliary channel along the segment.
    #[inline]
    pub fn aux_delta(&self) -> f32 {
        self.end.w - self.start.w
    }

    /// True when the auxiliary channel increases along the segment.
    #[inline]
    pub fn is_upward(&self) -> bool {
        self.start.w < self.end.w
    }

    /// True when the auxiliary channel decreases along the segment.
    #[inline]
    pub fn is_downward(&self) -> bool {
        self.start.w > self.end.w
    }

    pub fn stroke(&self) -> Stroke {
        if self.is_upward() {
            Stroke::Extrude
        } else if self.is_downward() {
            Stroke::Retract
        } else {
            Stroke::Travel
        }
    }

    /// Spatial length
    pub fn length(&self) -> f32 {
        self.start_xyz().distance(self.end_xyz())
    }
}
