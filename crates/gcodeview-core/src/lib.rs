//! # GCodeView Core
//!
//! Shared error types, defaults, and viewer configuration for GCodeView.

pub mod config;
pub mod constants;
pub mod error;

pub use config::{ExportSettings, PickSettings, ViewerConfig};
pub use error::{ConfigError, Error, ExportError, Result, SourceError};
