//! Reload correspondence
//!
//! Segment indices are only meaningful for the buffer that produced them.
//! When the source file changes, each selected index is re-derived for the
//! new buffer by taking the new segment closest to the old one. Adjacent
//! segments of a connected path all touch, so candidates at (near) equal
//! distance are ranked by [`segment_deviation`], which is zero only for an
//! exact copy.
//!
//! This is a best-effort nearest-neighbour match: two old selections may map
//! to the same new index, and a segment that was split or merged by the edit
//! maps to whichever piece happens to be nearest.

use crate::gcode::{Segment, SegmentStream};
use crate::geometry::{segment_deviation, segment_distance};
use crate::selection::SelectionRing;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Distances closer than this are treated as a tie
const TIE_TOLERANCE: f32 = 1e-5;

/// Closest segment in `buffer` to `target` as `(index, distance)`.
///
/// Runs two passes over `buffer`. The first finds the minimum distance; the
/// second ranks every candidate within [`TIE_TOLERANCE`] of it by
/// [`segment_deviation`], then by lower index. Non-finite distances (from
/// coordinates that overflow `f32`) never match. `None` when no candidate
/// has a finite distance.
pub fn nearest_segment(buffer: &[u8], target: &Segment) -> Option<(usize, f32)> {
    let (p0, p1) = (target.start_xyz(), target.end_xyz());
    let distance_to = |candidate: &Segment| {
        segment_distance(p0, p1, candidate.start_xyz(), candidate.end_xyz())
    };

    let min_distance = SegmentStream::new(buffer)
        .map(|candidate| distance_to(&candidate))
        .filter(|distance| distance.is_finite())
        .min_by(f32::total_cmp)?;

    let mut best: Option<(usize, f32, f32)> = None;
    for (index, candidate) in SegmentStream::new(buffer).enumerate() {
        let distance = distance_to(&candidate);
        if !distance.is_finite() || distance > min_distance + TIE_TOLERANCE {
            continue;
        }

        let deviation = segment_deviation(p0, p1, candidate.start_xyz(), candidate.end_xyz());
        // NaN deviation ranks last
        let deviation = if deviation.is_nan() { f32::INFINITY } else { deviation };
        if best.is_none_or(|(_, _, best_deviation)| deviation < best_deviation) {
            best = Some((index, distance, deviation));
        }
    }

    best.map(|(index, distance, _)| (index, distance))
}

/// Old-to-new index map for every selected index found in `old`.
///
/// Selected indices past the end of `old` have no segment and are absent
/// from the map, as are all of them when `new` is empty.
pub fn correspondence_map(
    old: &[u8],
    new: &[u8],
    selection: &SelectionRing,
) -> BTreeMap<usize, usize> {
    let wanted: BTreeSet<usize> = selection.iter().map(|(_, index)| index).collect();
    let mut map = BTreeMap::new();
    if wanted.is_empty() {
        return map;
    }

    for (index, segment) in SegmentStream::new(old).enumerate() {
        if !wanted.contains(&index) {
            continue;
        }
        if let Some((replacement, distance)) = nearest_segment(new, &segment) {
            debug!(
                "Selection {} -> {} (distance {:.4})",
                index, replacement, distance
            );
            map.insert(index, replacement);
        }
        if map.len() == wanted.len() {
            break;
        }
    }

    map
}

/// Translate `selection` from `old` to `new`.
///
/// Pure: neither buffer is modified and the returned ring is a new value.
/// Entries without a counterpart are dropped; the rest keep their order.
pub fn correspond(old: &[u8], new: &[u8], selection: &SelectionRing) -> SelectionRing {
    let map = correspondence_map(old, new, selection);

    let targets: BTreeSet<usize> = map.values().copied().collect();
    if targets.len() < map.len() {
        warn!(
            "{} selected segments collapsed onto {} segments after reload",
            map.len(),
            targets.len()
        );
    }

    let mut translated = selection.clone();
    translated.replace_all(|index| map.get(&index).copied());

    let dropped = selection.count() - translated.count();
    if dropped > 0 {
        warn!("{} selected segments have no counterpart after reload", dropped);
    }
    translated
}
