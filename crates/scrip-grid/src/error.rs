//! Error types for grid conversion.

use thiserror::Error;

/// Errors that can occur while converting a model grid to SCRIP.
#[derive(Error, Debug)]
pub enum GridError {
    /// The grid convention selector is not one of the supported variants.
    #[error("unsupported grid convention: {0}")]
    UnsupportedConvention(String),

    /// A field's data does not agree with its declared dimensions.
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// A staggered, metric or mask array is incompatible with the center grid.
    #[error("shape mismatch for {field}: expected {expected}, found {found}")]
    ShapeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl GridError {
    /// Create an InvalidField error.
    pub fn invalid_field(msg: impl Into<String>) -> Self {
        Self::InvalidField(msg.into())
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::ShapeMismatch {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a ConfigError.
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Result type for grid operations.
pub type GridResult<T> = std::result::Result<T, GridError>;
