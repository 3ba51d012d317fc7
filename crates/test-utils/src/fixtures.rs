//! Common test fixtures for grid conversion tests.

use crate::generators::{land_sea_indicator, regular_ocean_grid, NativeArray, SyntheticGrid};

/// The 4x3 ocean reference grid: center longitudes 0..3, latitudes -10, 0, 10.
pub mod reference {
    pub const NX: usize = 4;
    pub const NY: usize = 3;
    pub const CENTER_LONS: [f64; NX] = [0.0, 1.0, 2.0, 3.0];
    pub const CENTER_LATS: [f64; NY] = [-10.0, 0.0, 10.0];
    pub const LON_SPACING: f64 = 1.0;
    pub const LAT_SPACING: f64 = 10.0;

    /// The single land cell `(x, y)` of the masked variant.
    pub const LAND_CELL: (usize, usize) = (2, 1);
}

/// The 4x3 reference ocean grid.
pub fn reference_ocean_grid() -> SyntheticGrid {
    regular_ocean_grid(
        reference::NX,
        reference::NY,
        reference::CENTER_LONS[0],
        reference::CENTER_LATS[0],
        reference::LON_SPACING,
        reference::LAT_SPACING,
    )
}

/// Indicator for the reference grid with one land cell.
pub fn reference_mask() -> NativeArray {
    land_sea_indicator(reference::NX, reference::NY, &[reference::LAND_CELL])
}
