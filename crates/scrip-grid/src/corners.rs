//! Corner coordinate derivation.
//!
//! Every cell gets four vertices, anti-clockwise from the upper right:
//!
//! ```text
//!   1 ──── 0        0 = (east face,  north face)
//!   │  T   │        1 = (west face,  north face)
//!   2 ──── 3        2 = (west face,  south face)
//!                   3 = (east face,  south face)
//! ```
//!
//! Inputs use the transposed `[nx, ny]` layout (row = x, column = y) and
//! radians. Stored staggered point `k` along x is the east face of cell `k`;
//! along y it is the north face of cell `k`. Faces that fall outside the
//! stored array are resolved by the edge rules:
//!
//! - **West seam** (both conventions): the west face of column 0 wraps to the
//!   last staggered longitude column. Latitude wraps `overlap` columns
//!   further in, skipping duplicated east-edge columns.
//! - **South edge, ocean**: one latitude `fxt`, the floor of the lowest center
//!   latitude along the first x line (`i = 0`), for every cell on row 0.
//! - **South edge and missing low-index points, atmosphere**: extrapolated
//!   from the first stored point by a constant cell size.
//!
//! Longitudes of the lower corners on row 0 reuse row 0.

use tracing::debug;

use crate::config::ScripConfig;
use crate::error::{GridError, GridResult};
use crate::types::{Corner, CornerArray, Field2D, GridConvention, GridShape};
use crate::units::{floor_latitude_radians, wrap_longitude_delta};

/// Staggered corner-source coordinates in radians, `[x, y]` layout.
///
/// For the ocean convention both arrays hold F-points and share the center
/// shape. For the atmosphere convention `lon` holds U-point longitudes
/// (`[nx, ny]` or `[nx - 1, ny]`) and `lat` V-point latitudes (`[nx, ny]`
/// or `[nx, ny - 1]`).
#[derive(Debug, Clone)]
pub struct StaggeredGrid {
    pub lon: Field2D,
    pub lat: Field2D,
}

/// Spacing between neighbouring staggered points, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSpacing {
    pub lon: f64,
    pub lat: f64,
}

impl StaggeredGrid {
    /// Differences between the first two staggered points along each axis.
    ///
    /// The longitude step is wrapped into `(-π, π]`, so points on either
    /// side of the prime meridian give the short way round.
    /// Returns `None` when an axis holds fewer than two points.
    pub fn spacing(&self) -> Option<CellSpacing> {
        if self.lon.rows() < 2 || self.lon.cols() == 0 || self.lat.cols() < 2 || self.lat.rows() == 0
        {
            return None;
        }
        Some(CellSpacing {
            lon: wrap_longitude_delta(self.lon.get(1, 0) - self.lon.get(0, 0)),
            lat: self.lat.get(0, 1) - self.lat.get(0, 0),
        })
    }
}

/// How the west edge of column 0 finds its cyclic neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WestSeam {
    /// Duplicated east-edge columns to skip when wrapping latitudes.
    pub overlap: usize,
}

impl WestSeam {
    pub fn new(overlap: usize) -> Self {
        Self { overlap }
    }

    /// Column used for latitudes west of column 0.
    pub fn lat_column(&self, ncols: usize) -> usize {
        ncols.saturating_sub(1 + self.overlap)
    }
}

/// Corner longitudes and latitudes of every cell.
#[derive(Debug, Clone)]
pub struct Corners {
    pub lon: CornerArray,
    pub lat: CornerArray,
}

/// Latitude rule for the faces south of row 0.
#[derive(Debug, Clone, Copy)]
enum SouthEdge {
    Fallback(f64),
    Extrapolate,
}

/// One staggered coordinate read along its staggered axis.
struct StaggeredAxis<'a> {
    field: &'a Field2D,
    /// Staggered along rows (x) rather than columns (y).
    along_x: bool,
    /// Points absent at the low-index edge.
    missing: usize,
    step: f64,
}

impl<'a> StaggeredAxis<'a> {
    fn extent(&self) -> usize {
        if self.along_x {
            self.field.rows()
        } else {
            self.field.cols()
        }
    }

    #[inline]
    fn stored(&self, s: usize, across: usize) -> f64 {
        if self.along_x {
            self.field.get(s, across)
        } else {
            self.field.get(across, s)
        }
    }

    /// Face following cell `k` (east or north); `k` may be negative.
    #[inline]
    fn face(&self, k: isize, across: usize) -> f64 {
        let s = k - self.missing as isize;
        if s >= 0 {
            self.stored(s as usize, across)
        } else {
            self.stored(0, across) + s as f64 * self.step
        }
    }

    /// The last stored point, used for the cyclic west seam.
    fn last(&self, across: usize) -> f64 {
        self.stored(self.extent() - 1, across)
    }
}

/// Derives cell corners for one grid convention.
#[derive(Debug, Clone, Copy)]
pub struct CornerDeriver {
    convention: GridConvention,
    seam: WestSeam,
}

impl CornerDeriver {
    pub fn new(convention: GridConvention, seam: WestSeam) -> Self {
        Self { convention, seam }
    }

    pub fn from_config(config: &ScripConfig) -> Self {
        Self::new(config.convention, WestSeam::new(config.west_seam_overlap))
    }

    /// Compute all corners.
    ///
    /// `center_lat_deg` is the `[nx, ny]` center latitude in degrees; it
    /// fixes the grid shape and, for the ocean convention, the south-edge
    /// fallback latitude.
    pub fn derive(
        &self,
        center_lat_deg: &Field2D,
        staggered: &StaggeredGrid,
    ) -> GridResult<Corners> {
        let shape = GridShape::new(center_lat_deg.rows(), center_lat_deg.cols());
        if shape.is_empty() {
            return Err(GridError::invalid_field(format!("empty center grid {shape}")));
        }

        let (lon_axis, lat_axis, south) = match self.convention {
            GridConvention::Ocean => {
                let fxt = south_fallback(center_lat_deg)?;
                debug!(fxt, "Ocean south-edge fallback latitude");
                let (lon, lat) = ocean_axes(shape, staggered)?;
                (lon, lat, SouthEdge::Fallback(fxt))
            }
            GridConvention::Atmosphere => {
                let (lon, lat) = atmosphere_axes(shape, staggered)?;
                debug!(
                    lon_cell_size = lon.step,
                    lat_cell_size = lat.step,
                    missing_x = lon.missing,
                    missing_y = lat.missing,
                    "Atmosphere edge extrapolation"
                );
                (lon, lat, SouthEdge::Extrapolate)
            }
        };

        let seam_lat_col = self.seam.lat_column(shape.nx);
        let mut lon = CornerArray::zeros(shape);
        let mut lat = CornerArray::zeros(shape);

        for i in 0..shape.nx {
            let west_lat_col = if i == 0 { seam_lat_col } else { i - 1 };
            for j in 0..shape.ny {
                let j_below = j.saturating_sub(1);

                let lon_east = |row: usize| lon_axis.face(i as isize, row);
                let lon_west = |row: usize| {
                    if i == 0 {
                        lon_axis.last(row)
                    } else {
                        lon_axis.face(i as isize - 1, row)
                    }
                };
                let lat_north = |col: usize| lat_axis.face(j as isize, col);
                let lat_south = |col: usize| match (j, south) {
                    (0, SouthEdge::Fallback(fxt)) => fxt,
                    _ => lat_axis.face(j as isize - 1, col),
                };

                lon.set(i, j, Corner::UpperRight, lon_east(j));
                lat.set(i, j, Corner::UpperRight, lat_north(i));

                lon.set(i, j, Corner::UpperLeft, lon_west(j));
                lat.set(i, j, Corner::UpperLeft, lat_north(west_lat_col));

                lon.set(i, j, Corner::LowerLeft, lon_west(j_below));
                lat.set(i, j, Corner::LowerLeft, lat_south(west_lat_col));

                lon.set(i, j, Corner::LowerRight, lon_east(j_below));
                lat.set(i, j, Corner::LowerRight, lat_south(i));
            }
        }

        debug!(
            convention = %self.convention,
            nx = shape.nx,
            ny = shape.ny,
            "Derived cell corners"
        );

        Ok(Corners { lon, lat })
    }
}

/// Floor of the lowest center latitude along the first x line, in radians.
///
/// `center_lat_deg` is `[nx, ny]` in degrees; the reduction runs over row
/// `i = 0`, across every `j`.
pub fn south_fallback(center_lat_deg: &Field2D) -> GridResult<f64> {
    (0..center_lat_deg.cols())
        .map(|j| center_lat_deg.get(0, j))
        .filter(|v| v.is_finite())
        .reduce(f64::min)
        .map(floor_latitude_radians)
        .ok_or_else(|| GridError::invalid_field("first center line has no finite latitude"))
}

fn ocean_axes<'a>(
    shape: GridShape,
    staggered: &'a StaggeredGrid,
) -> GridResult<(StaggeredAxis<'a>, StaggeredAxis<'a>)> {
    for (name, field) in [("corner longitude", &staggered.lon), ("corner latitude", &staggered.lat)] {
        if field.shape() != (shape.nx, shape.ny) {
            return Err(GridError::shape_mismatch(
                name,
                shape.to_string(),
                format!("[{}, {}]", field.rows(), field.cols()),
            ));
        }
    }

    Ok((
        StaggeredAxis {
            field: &staggered.lon,
            along_x: true,
            missing: 0,
            step: 0.0,
        },
        StaggeredAxis {
            field: &staggered.lat,
            along_x: false,
            missing: 0,
            step: 0.0,
        },
    ))
}

fn atmosphere_axes<'a>(
    shape: GridShape,
    staggered: &'a StaggeredGrid,
) -> GridResult<(StaggeredAxis<'a>, StaggeredAxis<'a>)> {
    let lon = &staggered.lon;
    let lat = &staggered.lat;

    let lon_missing = shape.nx.checked_sub(lon.rows()).filter(|m| *m <= 1);
    let lon_missing = match lon_missing {
        Some(m) if lon.cols() == shape.ny && lon.rows() > 0 => m,
        _ => {
            return Err(GridError::shape_mismatch(
                "U-point longitude",
                format!("[{} or {}, {}]", shape.nx, shape.nx.saturating_sub(1), shape.ny),
                format!("[{}, {}]", lon.rows(), lon.cols()),
            ))
        }
    };

    let lat_missing = shape.ny.checked_sub(lat.cols()).filter(|m| *m <= 1);
    let lat_missing = match lat_missing {
        Some(m) if lat.rows() == shape.nx && lat.cols() > 0 => m,
        _ => {
            return Err(GridError::shape_mismatch(
                "V-point latitude",
                format!("[{}, {} or {}]", shape.nx, shape.ny, shape.ny.saturating_sub(1)),
                format!("[{}, {}]", lat.rows(), lat.cols()),
            ))
        }
    };

    // the south edge is always extrapolated, so latitude needs a cell size
    if lat.cols() < 2 {
        return Err(GridError::shape_mismatch(
            "V-point latitude",
            "at least 2 points along y",
            format!("[{}, {}]", lat.rows(), lat.cols()),
        ));
    }
    let lat_cell_size = lat.get(0, 1) - lat.get(0, 0);

    let lon_cell_size = if lon_missing > 0 {
        if lon.rows() < 2 {
            return Err(GridError::shape_mismatch(
                "U-point longitude",
                "at least 2 points along x",
                format!("[{}, {}]", lon.rows(), lon.cols()),
            ));
        }
        wrap_longitude_delta(lon.get(1, 0) - lon.get(0, 0))
    } else {
        0.0
    };

    Ok((
        StaggeredAxis {
            field: lon,
            along_x: true,
            missing: lon_missing,
            step: lon_cell_size,
        },
        StaggeredAxis {
            field: lat,
            along_x: false,
            missing: lat_missing,
            step: lat_cell_size,
        },
    ))
}
