//! Low-level access to netCDF variables through the native netcdf library.
//!
//! Model grid files store coordinates with leading record axes
//! (`[time, y, x]` for NEMO mesh masks and WRF geo files, `[time, z, y, x]`
//! for 3-D masks). The helpers here read a variable as `f64`, unpack
//! `scale_factor`/`add_offset`, turn `_FillValue` into NaN and squeeze
//! leading singleton axes.

use std::path::Path;
use std::sync::Once;

use scrip_grid::Field2D;
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// Call this before the first file is opened. Safe to call multiple times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Open a netCDF file for reading.
pub fn open_file(path: &Path) -> NetCdfResult<netcdf::File> {
    silence_hdf5_errors();
    netcdf::open(path).map_err(|e| NetCdfError::OpenFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// An n-dimensional variable read as `f64`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct RawArray {
    pub name: String,
    pub shape: Vec<usize>,
    pub data: Vec<f64>,
}

impl RawArray {
    /// Drop leading axes of length 1 while more than two axes remain.
    pub fn squeezed(mut self) -> Self {
        while self.shape.len() > 2 && self.shape[0] == 1 {
            self.shape.remove(0);
        }
        self
    }

    /// Interpret the array as a 2-D `[rows, cols]` field.
    pub fn into_field(self) -> NetCdfResult<Field2D> {
        let squeezed = self.squeezed();
        match squeezed.shape.as_slice() {
            &[rows, cols] => Ok(Field2D::new(rows, cols, squeezed.data)?),
            other => Err(NetCdfError::invalid_format(format!(
                "variable '{}' has shape {:?}, expected a 2-D field",
                squeezed.name, other
            ))),
        }
    }
}

/// Check whether a variable exists in the file.
pub fn has_variable(file: &netcdf::File, name: &str) -> bool {
    file.variable(name).is_some()
}

/// Read a variable in full, applying packing attributes and fill values.
pub fn read_variable(file: &netcdf::File, name: &str) -> NetCdfResult<RawArray> {
    let var = file
        .variable(name)
        .ok_or_else(|| NetCdfError::missing(format!("{name} variable")))?;

    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let raw: Vec<f64> = var
        .get_values(..)
        .map_err(|e| NetCdfError::invalid_format(format!("Failed to read {name}: {e}")))?;

    let scale_factor = get_f64_attr(&var, "scale_factor").unwrap_or(1.0);
    let add_offset = get_f64_attr(&var, "add_offset").unwrap_or(0.0);
    let fill_value = get_f64_attr(&var, "_FillValue");

    let data = raw
        .into_iter()
        .map(|val| match fill_value {
            Some(fill) if val == fill => f64::NAN,
            _ => val * scale_factor + add_offset,
        })
        .collect();

    debug!(variable = name, shape = ?shape, "Read netCDF variable");

    Ok(RawArray {
        name: name.to_string(),
        shape,
        data,
    })
}

/// Read a 2-D field, squeezing leading singleton axes.
pub fn read_field(file: &netcdf::File, name: &str) -> NetCdfResult<Field2D> {
    read_variable(file, name)?.into_field()
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get f64 attribute.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}
