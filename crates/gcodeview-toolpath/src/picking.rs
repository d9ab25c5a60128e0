//! Ray picking against a segment stream

use crate::gcode::{Segment, SegmentStream};
use crate::geometry::{ray_segment_distance, Ray};
use crate::selection::SelectionRing;
use gcodeview_core::PickSettings;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Which segments are eligible for a pick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickFilter {
    pub skip_selected: bool,
    pub only_selected: bool,
    /// Skip segments whose auxiliary channel increases
    pub skip_upward: bool,
    /// Skip segments whose auxiliary channel decreases
    pub skip_downward: bool,
}

impl PickFilter {
    pub fn accepts(&self, index: usize, segment: &Segment, selection: &SelectionRing) -> bool {
        if self.skip_upward && segment.is_upward() {
            return false;
        }
        if self.skip_downward && segment.is_downward() {
            return false;
        }
        if self.skip_selected || self.only_selected {
            let selected = selection.find(index);
            if (self.skip_selected && selected) || (self.only_selected && !selected) {
                return false;
            }
        }
        true
    }
}

impl From<PickSettings> for PickFilter {
    fn from(settings: PickSettings) -> Self {
        Self {
            skip_selected: settings.skip_selected,
            only_selected: settings.only_selected,
            skip_upward: settings.skip_upward,
            skip_downward: settings.skip_downward,
        }
    }
}

/// Result of a successful pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub index: usize,
    pub distance: f32,
}

/// Nearest eligible segment to `ray` over one full pass of `buffer`.
///
/// Ties keep the lower index. Segments with a non-finite distance are never
/// picked. Returns `None` when no segment is eligible.
pub fn pick_nearest(
    buffer: &[u8],
    ray: &Ray,
    selection: &SelectionRing,
    filter: PickFilter,
) -> Option<Pick> {
    let mut best: Option<Pick> = None;

    for (index, segment) in SegmentStream::new(buffer).enumerate() {
        if !filter.accepts(index, &segment, selection) {
            continue;
        }
        let distance = ray_segment_distance(ray, segment.start_xyz(), segment.end_xyz());
        // Overflowed coordinates give NaN or infinite distances
        if !distance.is_finite() {
            continue;
        }
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(Pick { index, distance });
        }
    }

    if let Some(pick) = best {
        trace!("Picked segment {} at distance {:.4}", pick.index, pick.distance);
    }
    best
}
