//! File snapshots and CSV export

pub mod export;
pub mod file_io;

pub use export::{export_selection_csv, export_stream_csv, write_exports, NOT_SELECTED};
pub use file_io::{Snapshot, ToolpathSource};
