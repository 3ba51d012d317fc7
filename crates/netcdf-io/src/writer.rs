//! SCRIP grid description files.
//!
//! Layout written by [`write_scrip`]:
//!
//! ```text
//! dimensions:
//!     grid_size = nx * ny ; grid_rank = 2 ; grid_corners = 4 ;
//! variables:
//!     int    grid_dims(grid_rank) ;
//!     double grid_center_lat(grid_size) ;
//!     double grid_center_lon(grid_size) ;
//!     int    grid_imask(grid_size) ;
//!     double grid_area(grid_size) ;                  // optional
//!     double grid_corner_lat(grid_size, grid_corners) ;
//!     double grid_corner_lon(grid_size, grid_corners) ;
//! ```
//!
//! Attribute values are kept exactly as existing SCRIP consumers expect them,
//! including `units = "rad"`, `standard_name = "sea_binary_imask"` and the
//! centre longitude `long_name = "lonitude"`.

use std::path::Path;

use chrono::Utc;
use scrip_grid::{GridShape, ScripGridRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::{has_variable, open_file};

const DIM_GRID_SIZE: &str = "grid_size";
const DIM_GRID_RANK: &str = "grid_rank";
const DIM_GRID_CORNERS: &str = "grid_corners";

const ANGLE_UNITS: &str = "rad";
const CENTER_LON_LONG_NAME: &str = "lonitude";
const IMASK_STANDARD_NAME: &str = "sea_binary_imask";

/// File-level attributes of a SCRIP file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalAttributes {
    pub title: String,
    pub institution: Option<String>,
    pub contact: Option<String>,
    /// Usually the input file paths.
    pub source: Option<String>,
}

impl Default for GlobalAttributes {
    fn default() -> Self {
        Self {
            title: "SCRIP grid created with scrip-maker".to_string(),
            institution: None,
            contact: None,
            source: None,
        }
    }
}

impl GlobalAttributes {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Write `record` to a new SCRIP file at `path`, replacing any existing file.
pub fn write_scrip(
    path: &Path,
    record: &ScripGridRecord,
    attributes: &GlobalAttributes,
) -> NetCdfResult<()> {
    record.validate()?;

    let create_failed = |e: netcdf::Error| NetCdfError::CreateFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut file = netcdf::create(path).map_err(create_failed)?;

    file.add_attribute("title", attributes.title.as_str())?;
    file.add_attribute("Conventions", "CF-1.0")?;
    if let Some(institution) = &attributes.institution {
        file.add_attribute("institution", institution.as_str())?;
    }
    if let Some(source) = &attributes.source {
        file.add_attribute("source", source.as_str())?;
    }
    if let Some(contact) = &attributes.contact {
        file.add_attribute("contact", contact.as_str())?;
    }
    let creation_date = Utc::now().format("%Y/%m/%d %H:%M").to_string();
    file.add_attribute("creation_date", creation_date.as_str())?;

    file.add_dimension(DIM_GRID_SIZE, record.grid_size())?;
    file.add_dimension(DIM_GRID_RANK, record.grid_rank())?;
    file.add_dimension(DIM_GRID_CORNERS, record.grid_corners())?;

    {
        let mut var = file.add_variable::<i32>("grid_dims", &[DIM_GRID_RANK])?;
        var.put_values(&record.grid_dims()[..], ..)?;
    }

    {
        let mut var = file.add_variable::<f64>("grid_center_lat", &[DIM_GRID_SIZE])?;
        var.put_attribute("units", ANGLE_UNITS)?;
        var.put_attribute("long_name", "latitude")?;
        var.put_attribute("bounds", "grid_corner_lat")?;
        var.put_values(&record.center_lat[..], ..)?;
    }

    {
        let mut var = file.add_variable::<f64>("grid_center_lon", &[DIM_GRID_SIZE])?;
        var.put_attribute("units", ANGLE_UNITS)?;
        var.put_attribute("long_name", CENTER_LON_LONG_NAME)?;
        var.put_attribute("bounds", "grid_corner_lon")?;
        var.put_values(&record.center_lon[..], ..)?;
    }

    {
        let mut var = file.add_variable::<i32>("grid_imask", &[DIM_GRID_SIZE])?;
        var.put_attribute("units", "1")?;
        var.put_attribute("standard_name", IMASK_STANDARD_NAME)?;
        var.put_attribute("long_name", "land-sea imask (1=sea, 0=land)")?;
        var.put_values(&record.imask[..], ..)?;
    }

    if let Some(area) = &record.area {
        let mut var = file.add_variable::<f64>("grid_area", &[DIM_GRID_SIZE])?;
        var.put_attribute("units", "sr")?;
        var.put_attribute("standard_name", "cell_area")?;
        var.put_attribute("long_name", "area of grid cells (in steradians)")?;
        var.put_values(&area[..], ..)?;
    }

    {
        let mut var =
            file.add_variable::<f64>("grid_corner_lat", &[DIM_GRID_SIZE, DIM_GRID_CORNERS])?;
        var.put_attribute("units", ANGLE_UNITS)?;
        var.put_values(&record.corner_lat[..], ..)?;
    }

    {
        let mut var =
            file.add_variable::<f64>("grid_corner_lon", &[DIM_GRID_SIZE, DIM_GRID_CORNERS])?;
        var.put_attribute("units", ANGLE_UNITS)?;
        var.put_values(&record.corner_lon[..], ..)?;
    }

    info!(
        path = %path.display(),
        grid_size = record.grid_size(),
        dims = ?record.grid_dims(),
        has_area = record.area.is_some(),
        "Wrote SCRIP grid"
    );

    Ok(())
}

/// Read a SCRIP file back into a record.
pub fn read_scrip(path: &Path) -> NetCdfResult<ScripGridRecord> {
    let file = open_file(path)?;

    let dims = read_i32(&file, "grid_dims")?;
    let shape = match dims.as_slice() {
        &[nx, ny] if nx >= 0 && ny >= 0 => GridShape::new(nx as usize, ny as usize),
        other => {
            return Err(NetCdfError::invalid_format(format!(
                "grid_dims must hold two non-negative values, got {:?}",
                other
            )))
        }
    };

    let area = if has_variable(&file, "grid_area") {
        Some(read_f64(&file, "grid_area")?)
    } else {
        None
    };

    let record = ScripGridRecord {
        shape,
        center_lon: read_f64(&file, "grid_center_lon")?,
        center_lat: read_f64(&file, "grid_center_lat")?,
        imask: read_i32(&file, "grid_imask")?,
        area,
        corner_lon: read_f64(&file, "grid_corner_lon")?,
        corner_lat: read_f64(&file, "grid_corner_lat")?,
    };
    record.validate()?;
    Ok(record)
}

fn variable<'f>(file: &'f netcdf::File, name: &str) -> NetCdfResult<netcdf::Variable<'f>> {
    file.variable(name)
        .ok_or_else(|| NetCdfError::missing(format!("{name} variable")))
}

fn read_f64(file: &netcdf::File, name: &str) -> NetCdfResult<Vec<f64>> {
    variable(file, name)?
        .get_values::<f64, _>(..)
        .map_err(|e| NetCdfError::invalid_format(format!("Failed to read {name}: {e}")))
}

fn read_i32(file: &netcdf::File, name: &str) -> NetCdfResult<Vec<i32>> {
    variable(file, name)?
        .get_values::<i32, _>(..)
        .map_err(|e| NetCdfError::invalid_format(format!("Failed to read {name}: {e}")))
}
