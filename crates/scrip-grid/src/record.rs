//! The flattened SCRIP grid record handed to a writer.

use serde::Serialize;

use crate::error::{GridError, GridResult};
use crate::types::{GridShape, GRID_CORNERS};

/// Rank of every SCRIP grid produced here (`grid_rank`).
pub const GRID_RANK: usize = 2;

/// One converted grid in SCRIP layout, all angles in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct ScripGridRecord {
    pub shape: GridShape,
    pub center_lon: Vec<f64>,
    pub center_lat: Vec<f64>,
    pub imask: Vec<i32>,
    /// Absent when the source provides neither metrics nor usable spacing.
    pub area: Option<Vec<f64>>,
    /// `[grid_size, grid_corners]`, row-major.
    pub corner_lon: Vec<f64>,
    /// `[grid_size, grid_corners]`, row-major.
    pub corner_lat: Vec<f64>,
}

impl ScripGridRecord {
    /// Check that every array agrees with `shape`.
    pub fn validate(&self) -> GridResult<()> {
        let size = self.grid_size();
        let checks = [
            ("grid_center_lon", self.center_lon.len(), size),
            ("grid_center_lat", self.center_lat.len(), size),
            ("grid_imask", self.imask.len(), size),
            ("grid_area", self.area.as_ref().map_or(size, Vec::len), size),
            ("grid_corner_lon", self.corner_lon.len(), size * GRID_CORNERS),
            ("grid_corner_lat", self.corner_lat.len(), size * GRID_CORNERS),
        ];
        for (name, found, expected) in checks {
            if found != expected {
                return Err(GridError::shape_mismatch(
                    name,
                    expected.to_string(),
                    found.to_string(),
                ));
            }
        }
        Ok(())
    }

    /// `grid_size`.
    pub fn grid_size(&self) -> usize {
        self.shape.size()
    }

    pub fn grid_rank(&self) -> usize {
        GRID_RANK
    }

    pub fn grid_corners(&self) -> usize {
        GRID_CORNERS
    }

    /// `grid_dims` as stored in the file.
    pub fn grid_dims(&self) -> [i32; GRID_RANK] {
        [self.shape.nx as i32, self.shape.ny as i32]
    }

    /// The four corners of cell `(i, j)` as `(lon, lat)` pairs.
    pub fn cell_corners(&self, i: usize, j: usize) -> [(f64, f64); GRID_CORNERS] {
        let start = self.shape.flat_index(i, j) * GRID_CORNERS;
        std::array::from_fn(|c| (self.corner_lon[start + c], self.corner_lat[start + c]))
    }

    /// Summary statistics for logging.
    pub fn summary(&self) -> GridSummary {
        let (lon_min, lon_max) = extent(&self.center_lon);
        let (lat_min, lat_max) = extent(&self.center_lat);
        let sea_cells = self.imask.iter().filter(|&&v| v == 1).count();
        GridSummary {
            nx: self.shape.nx,
            ny: self.shape.ny,
            grid_size: self.grid_size(),
            sea_cells,
            land_cells: self.grid_size() - sea_cells,
            has_area: self.area.is_some(),
            total_area: self.area.as_ref().map(|a| a.iter().sum()),
            lon_range_deg: (lon_min.to_degrees(), lon_max.to_degrees()),
            lat_range_deg: (lat_min.to_degrees(), lat_max.to_degrees()),
        }
    }
}

fn extent(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Headline numbers of a converted grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSummary {
    pub nx: usize,
    pub ny: usize,
    pub grid_size: usize,
    pub sea_cells: usize,
    pub land_cells: usize,
    pub has_area: bool,
    pub total_area: Option<f64>,
    pub lon_range_deg: (f64, f64),
    pub lat_range_deg: (f64, f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ScripGridRecord {
        let shape = GridShape::new(2, 1);
        ScripGridRecord {
            shape,
            center_lon: vec![0.0, 0.1],
            center_lat: vec![-0.1, -0.1],
            imask: vec![1, 0],
            area: None,
            corner_lon: (0..8).map(|v| v as f64).collect(),
            corner_lat: (0..8).map(|v| -(v as f64)).collect(),
        }
    }

    #[test]
    fn test_dims_and_size() {
        let rec = record();
        assert!(rec.validate().is_ok());
        assert_eq!(rec.grid_dims(), [2, 1]);
        assert_eq!(rec.grid_size(), 2);
        assert_eq!(rec.grid_rank(), 2);
        assert_eq!(rec.grid_corners(), 4);
    }

    #[test]
    fn test_cell_corners() {
        let rec = record();
        assert_eq!(rec.cell_corners(1, 0)[2], (6.0, -6.0));
    }

    #[test]
    fn test_validate_catches_short_arrays() {
        let mut rec = record();
        rec.corner_lat.pop();
        assert!(rec.validate().is_err());
    }

    #[test]
    fn test_summary_counts_land() {
        let summary = record().summary();
        assert_eq!(summary.sea_cells, 1);
        assert_eq!(summary.land_cells, 1);
        assert!(!summary.has_area);
    }
}
