//! Failure classes of a conversion run and their exit codes.

use std::path::PathBuf;

use netcdf_io::NetCdfError;
use scrip_grid::GridError;
use thiserror::Error;

/// A failed conversion run.
#[derive(Error, Debug)]
pub enum MakerError {
    /// Missing or invalid arguments, bad convention, unreadable config file
    #[error("configuration error: {0}")]
    Config(String),

    /// The grid file cannot be opened or lacks a required variable
    #[error("cannot read grid source {path}: {source}")]
    GridSource {
        path: PathBuf,
        #[source]
        source: NetCdfError,
    },

    /// The mask file cannot be opened or lacks the indicator variable
    #[error("cannot read mask source {path}: {source}")]
    MaskSource {
        path: PathBuf,
        #[source]
        source: NetCdfError,
    },

    /// The destination cannot be created or written
    #[error("cannot write destination {path}: {source}")]
    Destination {
        path: PathBuf,
        #[source]
        source: NetCdfError,
    },

    /// Source arrays do not form a consistent grid
    #[error("invalid grid geometry: {0}")]
    Shape(#[source] GridError),
}

impl MakerError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 1,
            Self::GridSource { .. } => 2,
            Self::MaskSource { .. } => 3,
            Self::Destination { .. } => 4,
            Self::Shape(_) => 5,
        }
    }
}

impl From<GridError> for MakerError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::UnsupportedConvention(_) | GridError::ConfigError(_) => {
                Self::Config(err.to_string())
            }
            other => Self::Shape(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let path = PathBuf::from("grid.nc");
        let errors = [
            MakerError::Config("missing --grid".to_string()),
            MakerError::GridSource {
                path: path.clone(),
                source: NetCdfError::missing("glamt variable"),
            },
            MakerError::MaskSource {
                path: path.clone(),
                source: NetCdfError::missing("tmask variable"),
            },
            MakerError::Destination {
                path,
                source: NetCdfError::invalid_format("read-only"),
            },
            MakerError::Shape(GridError::shape_mismatch("glamf", "[4, 3]", "[5, 3]")),
        ];
        let codes: Vec<u8> = errors.iter().map(MakerError::exit_code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_grid_error_classification() {
        let err: MakerError = GridError::UnsupportedConvention("mitgcm".to_string()).into();
        assert_eq!(err.exit_code(), 1);

        let err: MakerError = GridError::invalid_field("empty center grid [0, 0]").into();
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_source_path_in_message() {
        let err = MakerError::GridSource {
            path: PathBuf::from("/data/mesh_mask.nc"),
            source: NetCdfError::missing("glamt variable"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/mesh_mask.nc"));
        assert!(msg.contains("glamt"));
    }
}
