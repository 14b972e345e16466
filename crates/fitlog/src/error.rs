//! Error types for fitlog.
//!
//! This module defines the error types used throughout the crate. None of the
//! store errors are fatal to a session; they are reported to the user and the
//! session carries on with whatever is in memory.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for fitlog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// The store file exists but could not be read.
    #[error("{source}")]
    StoreRead {
        /// Path to the store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The store file could not be written or replaced.
    #[error("{source}")]
    StoreWrite {
        /// Path to the store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The header row lacks one or more of the required columns.
    #[error("missing column(s) {} in header of {}", .columns.join(", "), .path.display())]
    MissingColumns {
        /// Path to the store file.
        path: PathBuf,
        /// Names of the columns that were not found.
        columns: Vec<&'static str>,
    },

    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Terminal or other file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for fitlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a store read error for `path`.
    #[must_use]
    pub fn store_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StoreRead {
            path: path.into(),
            source,
        }
    }

    /// Create a store write error for `path`.
    #[must_use]
    pub fn store_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StoreWrite {
            path: path.into(),
            source,
        }
    }

    /// Check if this error means the store file simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::StoreRead { source, .. } | Self::Io(source) => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}
