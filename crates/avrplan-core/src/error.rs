//! Error types for avrplan-core
//!
//! Each concern has its own error enum. Device database errors live next to
//! the loader in [`crate::device`].

use std::path::PathBuf;

use thiserror::Error;

use crate::action::{Encoding, MemoryRegion};

/// Failure of the fuse layout / device information source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The device id is not known to the lookup source
    #[error("unknown device: {0}")]
    UnknownDevice(String),

    /// The backing data source could not be read
    #[error("device information for {device} unavailable: {reason}")]
    Unavailable {
        /// Device id that was queried
        device: String,
        /// Why the source could not be used
        reason: String,
    },

    /// The source reported more fuse bytes than an AVR can have
    #[error("device {device} reports {count} fuse bytes (at most 3 supported)")]
    UnsupportedFuseCount {
        /// Device id that was queried
        device: String,
        /// Reported fuse byte count
        count: u8,
    },
}

/// A programmer action could not be constructed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// File based actions need a file
    #[error("empty file path for {0} action")]
    EmptyPath(MemoryRegion),

    /// Numeric encoding only applies to single byte writes
    #[error("encoding {0} cannot be used with a file payload")]
    IncompatibleEncoding(Encoding),

    /// Format auto-detection needs an existing input file
    #[error("auto encoding cannot be used to read {0}")]
    AutoEncodingOnRead(MemoryRegion),

    /// Region cannot be written
    #[error("memory region {0} is read-only")]
    ReadOnlyRegion(MemoryRegion),
}

/// Error loading a build configuration
#[derive(Debug, Error)]
pub enum BuildConfigError {
    /// I/O error reading the file
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
