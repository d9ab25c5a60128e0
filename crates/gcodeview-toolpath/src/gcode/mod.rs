//! G-code segment streaming
//!
//! This module provides:
//! - Segment and axis types
//! - Per-channel absolute/relative addressing state
//! - A zero-copy, restartable segment stream over a byte buffer

pub mod parser;
pub mod segment;

pub use parser::{count_segments, segment_at, AxisModes, SegmentStream};
pub use segment::{Axis, Segment, Stroke};
