//! Synthetic model grids with predictable coordinates.
//!
//! All arrays are row-major in native file order: row = y (latitude),
//! column = x (longitude). Values are degrees, metrics metres.

/// Metres per degree of arc on the model sphere (6371229 m radius).
pub const METRES_PER_DEGREE: f64 = 111_198.9;

/// A 2-D array with its native `(rows, cols)` dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeArray {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl NativeArray {
    /// Build an array by evaluating `f(row, col)`.
    pub fn from_fn(rows: usize, cols: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    /// Value at `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }
}

/// A synthetic model grid: centers, staggered corner sources and metrics.
#[derive(Debug, Clone)]
pub struct SyntheticGrid {
    pub nx: usize,
    pub ny: usize,
    pub center_lon: NativeArray,
    pub center_lat: NativeArray,
    /// F-point (ocean) or U-point (atmosphere) longitudes.
    pub corner_lon: NativeArray,
    /// F-point (ocean) or V-point (atmosphere) latitudes.
    pub corner_lat: NativeArray,
    pub e1: NativeArray,
    pub e2: NativeArray,
}

/// Creates a regular ocean grid with F-points half a cell to the north-east.
///
/// Center `(x, y)` lies at `(lon0 + x * dlon, lat0 + y * dlat)`; its F-point at
/// `(lon0 + (x + 0.5) * dlon, lat0 + (y + 0.5) * dlat)`.
///
/// # Example
///
/// ```
/// use test_utils::regular_ocean_grid;
///
/// let grid = regular_ocean_grid(4, 3, 0.0, -10.0, 1.0, 10.0);
/// assert_eq!(grid.center_lon.at(0, 3), 3.0);
/// assert_eq!(grid.corner_lat.at(2, 0), 15.0);
/// ```
pub fn regular_ocean_grid(
    nx: usize,
    ny: usize,
    lon0: f64,
    lat0: f64,
    dlon: f64,
    dlat: f64,
) -> SyntheticGrid {
    SyntheticGrid {
        nx,
        ny,
        center_lon: NativeArray::from_fn(ny, nx, |_, x| lon0 + x as f64 * dlon),
        center_lat: NativeArray::from_fn(ny, nx, |y, _| lat0 + y as f64 * dlat),
        corner_lon: NativeArray::from_fn(ny, nx, |_, x| lon0 + (x as f64 + 0.5) * dlon),
        corner_lat: NativeArray::from_fn(ny, nx, |y, _| lat0 + (y as f64 + 0.5) * dlat),
        e1: NativeArray::from_fn(ny, nx, |_, _| dlon * METRES_PER_DEGREE),
        e2: NativeArray::from_fn(ny, nx, |_, _| dlat * METRES_PER_DEGREE),
    }
}

/// Creates a regular atmosphere grid with native staggered dimensions.
///
/// U longitudes are `[ny, nx + 1]` and V latitudes `[ny + 1, nx]`, as a
/// WRF geo file stores them: staggered point `k` is the west (south) face
/// of cell `k`.
pub fn regular_atmosphere_grid(
    nx: usize,
    ny: usize,
    lon0: f64,
    lat0: f64,
    dlon: f64,
    dlat: f64,
) -> SyntheticGrid {
    SyntheticGrid {
        nx,
        ny,
        center_lon: NativeArray::from_fn(ny, nx, |_, x| lon0 + x as f64 * dlon),
        center_lat: NativeArray::from_fn(ny, nx, |y, _| lat0 + y as f64 * dlat),
        corner_lon: NativeArray::from_fn(ny, nx + 1, |_, k| lon0 + (k as f64 - 0.5) * dlon),
        corner_lat: NativeArray::from_fn(ny + 1, nx, |k, _| lat0 + (k as f64 - 0.5) * dlat),
        e1: NativeArray::from_fn(ny, nx, |_, _| dlon * METRES_PER_DEGREE),
        e2: NativeArray::from_fn(ny, nx, |_, _| dlat * METRES_PER_DEGREE),
    }
}

/// Creates a land-sea indicator (1 = sea) with the given `(x, y)` cells set to land.
pub fn land_sea_indicator(nx: usize, ny: usize, land: &[(usize, usize)]) -> NativeArray {
    NativeArray::from_fn(ny, nx, |y, x| if land.contains(&(x, y)) { 0.0 } else { 1.0 })
}

/// Stacks copies of a 2-D indicator into `[levels, ny, nx]`, zeroing every
/// level below the first.
pub fn stacked_indicator(surface: &NativeArray, levels: usize) -> Vec<f64> {
    let mut data = surface.data.clone();
    data.resize(surface.data.len() * levels, 0.0);
    data
}
