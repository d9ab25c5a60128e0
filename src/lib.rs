//! # GCodeView
//!
//! Inspect G-code toolpaths as 3D line segments and mark segments for export.
//!
//! ## Architecture
//!
//! GCodeView is organized as a workspace with multiple crates:
//!
//! 1. **gcodeview-core** - Error types, defaults, viewer configuration
//! 2. **gcodeview-toolpath** - Segment stream parser, geometry, statistics,
//!    selection ring, picking, reload correspondence, CSV export
//! 3. **gcodeview** - Command-line driver that integrates both crates

pub use gcodeview_core::{
    constants, ConfigError, Error, ExportError, ExportSettings, PickSettings, Result, SourceError,
    ViewerConfig,
};

pub use gcodeview_toolpath::{
    correspond, count_segments, pick_nearest, ray_segment_distance, segment_distance, Axis,
    BoundingStats, CameraPlacement, Pick, PickFilter, Ray, Segment, SegmentStream, SelectionRing,
    Snapshot, Stroke, ToolpathDocument, ToolpathSource,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, keeping stdout for reports
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
