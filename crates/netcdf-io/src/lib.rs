//! NetCDF I/O for the SCRIP grid maker.
//!
//! This crate reads native model grids (NEMO mesh masks, WRF geo files)
//! into [`scrip_grid::GridInputs`] and writes [`scrip_grid::ScripGridRecord`]s
//! as SCRIP grid description files.
//!
//! # Implementation Notes
//!
//! Reading and writing go through the `netcdf` crate, which links
//! libnetcdf and HDF5. HDF5 diagnostics are silenced before the first file
//! is opened; errors are reported through [`NetCdfError`] instead.

pub mod error;
pub mod native;
pub mod reader;
pub mod writer;

pub use error::{NetCdfError, NetCdfResult};
pub use native::silence_hdf5_errors;
pub use reader::{read_grid, read_mask, VariableNames};
pub use writer::{read_scrip, write_scrip, GlobalAttributes};
