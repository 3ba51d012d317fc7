//! Curvilinear model grids to SCRIP grid descriptions.
//!
//! This crate turns the native coordinate arrays of an ocean (Arakawa-C,
//! T/F points) or atmosphere (M/U/V points) model into the flattened
//! arrays of the SCRIP convention used by regridding tools:
//!
//! - **Corner derivation**: four anti-clockwise vertices per cell, with
//!   cyclic wrap at the west seam and fallback or extrapolation at the
//!   south edge
//! - **Land-sea mask**: binary mask from an optional indicator field
//! - **Cell area**: metric product normalized by the Earth radius
//! - **Flattening**: one consistent `[nx, ny]` record order for every field
//!
//! No I/O happens here; readers and writers live in `netcdf-io`.
//!
//! # Example
//!
//! ```ignore
//! use scrip_grid::{GridConvention, ScripConfig, ScripPipeline};
//!
//! let pipeline = ScripPipeline::new(ScripConfig::for_convention(GridConvention::Ocean));
//! let record = pipeline.run(&inputs)?;
//! assert_eq!(record.grid_dims(), [nx as i32, ny as i32]);
//! ```

pub mod area;
pub mod config;
pub mod corners;
pub mod error;
pub mod flatten;
pub mod mask;
pub mod pipeline;
pub mod record;
pub mod types;
pub mod units;

// Re-export commonly used types at crate root
pub use area::{normalized_area, uniform_area, CellMetrics, EARTH_RADIUS_M};
pub use config::{ScripConfig, DEFAULT_WEST_SEAM_OVERLAP};
pub use corners::{south_fallback, CellSpacing, CornerDeriver, Corners, StaggeredGrid, WestSeam};
pub use error::{GridError, GridResult};
pub use flatten::{flatten, flatten_corners, unflatten};
pub use mask::{resolve_mask, MaskIndicator};
pub use pipeline::{GridInputs, ScripPipeline};
pub use record::{GridSummary, ScripGridRecord, GRID_RANK};
pub use types::{Corner, CornerArray, Field2D, GridConvention, GridShape, GRID_CORNERS};
