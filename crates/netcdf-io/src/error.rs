//! Error types for NetCDF grid I/O.

use std::path::PathBuf;

use scrip_grid::GridError;
use thiserror::Error;

/// Result type for NetCDF I/O operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF grid I/O.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reported by libnetcdf
    #[error("NetCDF error: {0}")]
    Library(#[from] netcdf::Error),

    /// Missing required variable or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// The file could not be opened
    #[error("Failed to open {path}: {message}")]
    OpenFailed { path: PathBuf, message: String },

    /// The output file could not be created
    #[error("Failed to create {path}: {message}")]
    CreateFailed { path: PathBuf, message: String },

    /// Arrays read from the file do not form a valid grid
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl NetCdfError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingData(what.into())
    }

    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }
}
