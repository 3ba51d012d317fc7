//! End-to-end conversion of native grid fields into a SCRIP record.
//!
//! ```text
//! GridInputs ([ny, nx], degrees)
//!      │
//!      ├─► transpose to [nx, ny]
//!      ├─► normalize longitudes, convert to radians
//!      │
//!      ├─► CornerDeriver ───────────────┐   (rayon::join)
//!      └─► resolve_mask + area ─────────┤
//!                                       ▼
//!                              flatten → ScripGridRecord
//! ```

use tracing::{debug, info, warn};

use crate::area::{normalized_area, uniform_area, CellMetrics};
use crate::config::ScripConfig;
use crate::corners::{CornerDeriver, StaggeredGrid};
use crate::error::{GridError, GridResult};
use crate::flatten::{flatten, flatten_corners};
use crate::mask::{resolve_mask, MaskIndicator};
use crate::record::ScripGridRecord;
use crate::types::{Field2D, GridShape};
use crate::units::{latitudes_to_radians, longitudes_to_radians};

/// Source fields as delivered by a grid reader.
///
/// All 2-D fields are in native `[ny, nx]` order and degrees (metrics in
/// metres). Staggered fields follow the shape rules of the convention.
#[derive(Debug, Clone)]
pub struct GridInputs {
    pub center_lon: Field2D,
    pub center_lat: Field2D,
    pub corner_lon: Field2D,
    pub corner_lat: Field2D,
    pub metrics: Option<CellMetrics>,
    pub mask: Option<MaskIndicator>,
}

impl GridInputs {
    /// Cell-center grid dimensions.
    pub fn shape(&self) -> GridShape {
        GridShape::new(self.center_lon.cols(), self.center_lon.rows())
    }

    /// Attach a land-sea indicator.
    pub fn with_mask(mut self, mask: MaskIndicator) -> Self {
        self.mask = Some(mask);
        self
    }
}

/// Runs the conversion stages for one configuration.
#[derive(Debug, Clone, Default)]
pub struct ScripPipeline {
    config: ScripConfig,
}

impl ScripPipeline {
    pub fn new(config: ScripConfig) -> Self {
        Self { config }
    }

    /// Convert `inputs` into a flattened SCRIP record.
    pub fn run(&self, inputs: &GridInputs) -> GridResult<ScripGridRecord> {
        let shape = inputs.shape();
        if inputs.center_lat.shape() != inputs.center_lon.shape() {
            return Err(GridError::shape_mismatch(
                "center latitude",
                format!("{:?}", inputs.center_lon.shape()),
                format!("{:?}", inputs.center_lat.shape()),
            ));
        }
        if shape.is_empty() {
            return Err(GridError::invalid_field(format!("empty center grid {shape}")));
        }

        debug!(
            convention = %self.config.convention,
            nx = shape.nx,
            ny = shape.ny,
            corner_lon = ?inputs.corner_lon.shape(),
            corner_lat = ?inputs.corner_lat.shape(),
            has_metrics = inputs.metrics.is_some(),
            has_mask = inputs.mask.is_some(),
            "Starting SCRIP conversion"
        );

        let center_lat_deg = inputs.center_lat.transposed();
        let center_lon = longitudes_to_radians(&inputs.center_lon.transposed());
        let center_lat = latitudes_to_radians(&center_lat_deg);
        let staggered = StaggeredGrid {
            lon: longitudes_to_radians(&inputs.corner_lon.transposed()),
            lat: latitudes_to_radians(&inputs.corner_lat.transposed()),
        };

        let deriver = CornerDeriver::from_config(&self.config);
        let (corners, (mask, area)) = rayon::join(
            || deriver.derive(&center_lat_deg, &staggered),
            || {
                (
                    resolve_mask(inputs.mask.as_ref(), shape),
                    self.cell_area(inputs.metrics.as_ref(), shape, &staggered),
                )
            },
        );
        let corners = corners?;
        let mask = mask?;
        let area = area?;

        let record = ScripGridRecord {
            shape,
            center_lon: flatten(&center_lon),
            center_lat: flatten(&center_lat),
            imask: flatten(&mask),
            area: area.as_ref().map(flatten),
            corner_lon: flatten_corners(corners.lon),
            corner_lat: flatten_corners(corners.lat),
        };
        record.validate()?;

        let summary = record.summary();
        info!(
            nx = summary.nx,
            ny = summary.ny,
            grid_size = summary.grid_size,
            sea_cells = summary.sea_cells,
            land_cells = summary.land_cells,
            has_area = summary.has_area,
            "Converted grid to SCRIP layout"
        );

        Ok(record)
    }

    fn cell_area(
        &self,
        metrics: Option<&CellMetrics>,
        shape: GridShape,
        staggered: &StaggeredGrid,
    ) -> GridResult<Option<Field2D>> {
        if let Some(metrics) = metrics {
            let metrics = CellMetrics {
                e1: metrics.e1.transposed(),
                e2: metrics.e2.transposed(),
            };
            return normalized_area(&metrics, shape).map(Some);
        }

        if !self.config.uniform_area_fallback {
            debug!("No cell metrics; grid_area omitted");
            return Ok(None);
        }

        match staggered.spacing() {
            Some(spacing) => {
                debug!(
                    lon_spacing = spacing.lon,
                    lat_spacing = spacing.lat,
                    "No cell metrics; using uniform staggered spacing"
                );
                Ok(Some(uniform_area(shape, spacing)))
            }
            None => {
                warn!("No cell metrics and too few staggered points for spacing; grid_area omitted");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridConvention;

    fn tiny_inputs() -> GridInputs {
        // native [ny=2, nx=3]
        GridInputs {
            center_lon: Field2D::from_fn(2, 3, |_, x| x as f64 - 1.0),
            center_lat: Field2D::from_fn(2, 3, |y, _| y as f64),
            corner_lon: Field2D::from_fn(2, 3, |_, x| x as f64 + 0.5),
            corner_lat: Field2D::from_fn(2, 3, |y, _| y as f64 + 0.5),
            metrics: None,
            mask: None,
        }
    }

    #[test]
    fn test_center_longitudes_normalized() {
        let record = ScripPipeline::default().run(&tiny_inputs()).unwrap();
        // cell (0, 0) sits at -1 degree, stored as 359 degrees
        assert!((record.center_lon[0] - 359.0f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_mismatched_centers_rejected() {
        let mut inputs = tiny_inputs();
        inputs.center_lat = Field2D::filled(3, 2, 0.0);
        assert!(matches!(
            ScripPipeline::default().run(&inputs),
            Err(GridError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_area_omitted_without_fallback() {
        let config = ScripConfig {
            uniform_area_fallback: false,
            ..ScripConfig::for_convention(GridConvention::Ocean)
        };
        let record = ScripPipeline::new(config).run(&tiny_inputs()).unwrap();
        assert!(record.area.is_none());
    }

    #[test]
    fn test_uniform_area_fallback() {
        let record = ScripPipeline::default().run(&tiny_inputs()).unwrap();
        let area = record.area.expect("uniform area");
        let one_degree = 1.0f64.to_radians();
        assert!((area[0] - one_degree * one_degree).abs() < 1e-12);
    }
}
