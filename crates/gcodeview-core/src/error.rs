//! Error handling for GCodeView
//!
//! The toolpath engine itself never fails on malformed G-code: unknown lines
//! and unparseable numbers are skipped where they are found. The error types
//! here cover the boundaries around it:
//! - Source errors (opening and re-reading the watched file)
//! - Configuration errors (loading, saving, validation)
//! - Export errors (writing the CSV tables)
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Toolpath source error type
///
/// Raised when the G-code file cannot be opened or re-read. These are fatal
/// for the collaborator driving the viewer, never for the parser.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file does not exist
    #[error("File does not exist: {}", path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The path exists but is not a regular file
    #[error("Path is not a file: {}", path.display())]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// Reading the file contents or metadata failed
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file extension is not `.json` or `.toml`
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A configuration value is out of its valid range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidValue {
        /// The setting name.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Export error type
#[derive(Error, Debug)]
pub enum ExportError {
    /// Writing a table row or header failed
    #[error("Failed to write {table} table: {source}")]
    Write {
        /// Which table was being written ("stream" or "selection").
        table: &'static str,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Main error type for GCodeView
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Source file error
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a source file error
    pub fn is_source_error(&self) -> bool {
        matches!(self, Error::Source(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
