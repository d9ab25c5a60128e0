//! Shared defaults for the toolpath engine and its collaborators.

/// Number of slots in the selection ring.
pub const SELECTION_CAPACITY: usize = 100;

/// Size of the sorted sample window used by the trimmed mean.
pub const TRIM_WINDOW: usize = 200;

/// Smallest trim window that still has two middle order statistics.
pub const MIN_TRIM_WINDOW: usize = 2;

/// Camera eye offset, as a fraction of the bounding box extent per axis.
pub const CAMERA_OFFSET_FACTOR: f32 = 0.2;

/// How often the watched file's modification time is checked.
pub const RELOAD_POLL_INTERVAL_MS: u64 = 300;

/// Default file name for the full segment table.
pub const STREAM_CSV: &str = "out.csv";

/// Default file name for the selected-only segment table.
pub const SELECTION_CSV: &str = "selected.csv";

/// Files above this size are logged with a warning before being read whole.
pub const LARGE_FILE_BYTES: u64 = 500 * 1024 * 1024;
