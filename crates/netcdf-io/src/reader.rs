//! Readers for native model grid files.
//!
//! A NEMO `mesh_mask.nc` holds T-point centers, F-point corners and the
//! `e1t`/`e2t` metrics; a WRF `geo_em` file holds mass-point centers and
//! U/V staggered coordinates with one extra point along the staggered axis.
//! Both are delivered to the core as [`GridInputs`] in native `[ny, nx]`
//! order.

use std::path::Path;

use scrip_grid::{CellMetrics, Field2D, GridConvention, GridInputs, MaskIndicator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::NetCdfResult;
use crate::native::{has_variable, open_file, read_field, read_variable};

/// Names of the variables read from grid and mask files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableNames {
    pub center_lon: String,
    pub center_lat: String,
    pub corner_lon: String,
    pub corner_lat: String,
    /// Zonal metric; both metrics must be present to be used.
    pub e1: Option<String>,
    /// Meridional metric.
    pub e2: Option<String>,
    pub mask: String,
}

impl VariableNames {
    /// NEMO `mesh_mask` names.
    pub fn ocean() -> Self {
        Self {
            center_lon: "glamt".to_string(),
            center_lat: "gphit".to_string(),
            corner_lon: "glamf".to_string(),
            corner_lat: "gphif".to_string(),
            e1: Some("e1t".to_string()),
            e2: Some("e2t".to_string()),
            mask: "tmask".to_string(),
        }
    }

    /// WRF `geo_em` names. The geo file carries no cell metrics.
    pub fn atmosphere() -> Self {
        Self {
            center_lon: "XLONG_M".to_string(),
            center_lat: "XLAT_M".to_string(),
            corner_lon: "XLONG_U".to_string(),
            corner_lat: "XLAT_V".to_string(),
            e1: None,
            e2: None,
            mask: "tmask".to_string(),
        }
    }

    pub fn for_convention(convention: GridConvention) -> Self {
        match convention {
            GridConvention::Ocean => Self::ocean(),
            GridConvention::Atmosphere => Self::atmosphere(),
        }
    }
}

impl Default for VariableNames {
    fn default() -> Self {
        Self::ocean()
    }
}

/// Read centers, staggered coordinates and metrics from a grid file.
///
/// The returned inputs carry no mask; attach one with
/// [`GridInputs::with_mask`] after [`read_mask`].
pub fn read_grid(
    path: &Path,
    names: &VariableNames,
    convention: GridConvention,
) -> NetCdfResult<GridInputs> {
    let file = open_file(path)?;

    let center_lon = read_field(&file, &names.center_lon)?;
    let center_lat = read_field(&file, &names.center_lat)?;
    let mut corner_lon = read_field(&file, &names.corner_lon)?;
    let mut corner_lat = read_field(&file, &names.corner_lat)?;

    if convention == GridConvention::Atmosphere {
        corner_lon = align_staggered_lon(corner_lon, center_lon.cols());
        corner_lat = align_staggered_lat(corner_lat, center_lat.rows());
    }

    let metrics = read_metrics(&file, names)?;

    info!(
        path = %path.display(),
        convention = %convention,
        nx = center_lon.cols(),
        ny = center_lon.rows(),
        has_metrics = metrics.is_some(),
        "Read model grid"
    );

    Ok(GridInputs {
        center_lon,
        center_lat,
        corner_lon,
        corner_lat,
        metrics,
        mask: None,
    })
}

/// Read the land-sea indicator variable from a mask file.
pub fn read_mask(path: &Path, names: &VariableNames) -> NetCdfResult<MaskIndicator> {
    let file = open_file(path)?;
    let raw = read_variable(&file, &names.mask)?.squeezed();

    debug!(
        path = %path.display(),
        variable = %names.mask,
        shape = ?raw.shape,
        "Read land-sea indicator"
    );

    Ok(MaskIndicator::new(raw.shape, raw.data)?)
}

fn read_metrics(file: &netcdf::File, names: &VariableNames) -> NetCdfResult<Option<CellMetrics>> {
    let (Some(e1), Some(e2)) = (names.e1.as_deref(), names.e2.as_deref()) else {
        return Ok(None);
    };

    if !has_variable(file, e1) || !has_variable(file, e2) {
        warn!(e1, e2, "Cell metrics not found in grid file; falling back");
        return Ok(None);
    }

    Ok(Some(CellMetrics {
        e1: read_field(file, e1)?,
        e2: read_field(file, e2)?,
    }))
}

/// WRF U longitudes are `[ny, nx + 1]`: point `k` is the west face of cell
/// `k`. Dropping the first column leaves point `k` on the east face.
fn align_staggered_lon(lon: Field2D, nx: usize) -> Field2D {
    if lon.cols() == nx + 1 {
        debug!(from = lon.cols(), to = nx, "Dropping first staggered longitude column");
        lon.drop_leading_cols(1)
    } else {
        lon
    }
}

/// WRF V latitudes are `[ny + 1, nx]`, handled like the U longitudes.
fn align_staggered_lat(lat: Field2D, ny: usize) -> Field2D {
    if lat.rows() == ny + 1 {
        debug!(from = lat.rows(), to = ny, "Dropping first staggered latitude row");
        lat.drop_leading_rows(1)
    } else {
        lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_per_convention() {
        let ocean = VariableNames::for_convention(GridConvention::Ocean);
        assert_eq!(ocean.corner_lon, "glamf");
        assert_eq!(ocean.e1.as_deref(), Some("e1t"));

        let atmosphere = VariableNames::for_convention(GridConvention::Atmosphere);
        assert_eq!(atmosphere.center_lat, "XLAT_M");
        assert!(atmosphere.e1.is_none());
    }

    #[test]
    fn test_native_wrf_stagger_is_trimmed() {
        // U: [ny=2, nx+1=4], west faces at -0.5, 0.5, 1.5, 2.5
        let lon = Field2D::from_fn(2, 4, |_, k| k as f64 - 0.5);
        let aligned = align_staggered_lon(lon, 3);
        assert_eq!(aligned.shape(), (2, 3));
        assert_eq!(aligned.get(0, 0), 0.5);

        let lat = Field2D::from_fn(3, 3, |k, _| k as f64 * 10.0);
        let aligned = align_staggered_lat(lat, 2);
        assert_eq!(aligned.shape(), (2, 3));
        assert_eq!(aligned.get(0, 0), 10.0);
    }

    #[test]
    fn test_already_aligned_stagger_untouched() {
        let lon = Field2D::from_fn(2, 3, |_, k| k as f64);
        assert_eq!(align_staggered_lon(lon.clone(), 3), lon);
        let short = Field2D::from_fn(2, 2, |_, k| k as f64);
        assert_eq!(align_staggered_lon(short.clone(), 3), short);
    }
}
