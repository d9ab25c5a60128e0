//! # GCodeView Toolpath
//!
//! The non-visual engine beneath the viewer: a streaming G-code segment
//! parser, segment/ray distance primitives, trimmed bounding statistics, a
//! bounded selection ring, and reload correspondence that carries the
//! selection across edits of the source file.
//!
//! None of the types here are synchronized. Everything is meant to be
//! driven from a single control loop; share across threads only behind
//! external locking.

pub mod camera;
pub mod document;
pub mod gcode;
pub mod geometry;
pub mod picking;
pub mod reload;
pub mod selection;
pub mod stats;
pub mod utils;

pub use camera::CameraPlacement;
pub use document::ToolpathDocument;
pub use gcode::{count_segments, segment_at, Axis, AxisModes, Segment, SegmentStream, Stroke};
pub use geometry::{
    point_segment_distance, ray_segment_distance, segment_deviation, segment_distance, Ray,
};
pub use picking::{pick_nearest, Pick, PickFilter};
pub use reload::{correspond, correspondence_map, nearest_segment};
pub use selection::SelectionRing;
pub use stats::{BoundingStats, TrimmedMean};
pub use utils::{
    export_selection_csv, export_stream_csv, write_exports, Snapshot, ToolpathSource,
    NOT_SELECTED,
};
