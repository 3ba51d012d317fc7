//! Test support shared by the scrip-maker crates.
//!
//! - [`generators`]: synthetic NEMO-style and WRF-style grids in native
//!   `[ny, nx]` order
//! - [`fixtures`]: the 4x3 reference grid and its land-sea mask
//! - [`paths`]: lookup of optional real grid files
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve an optional test file or end the test early.
///
/// ```ignore
/// #[test]
/// fn test_orca2_mesh_mask() {
///     let path = test_utils::require_test_file!("mesh_mask.nc");
///     // ...
/// }
/// ```
///
/// When the file is in none of [`paths::test_data_dirs`], a skip notice is
/// printed and the test returns.
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        let name: &str = $name;
        match $crate::find_test_file(name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: '{}' not found in {:?} (set {})",
                    name,
                    $crate::test_data_dirs(),
                    $crate::TEST_DATA_ENV
                );
                return;
            }
        }
    }};
}

/// Assert two floating-point values differ by at most `epsilon`
/// (default `1e-12`, suitable for radians).
///
/// ```ignore
/// assert_approx_eq!(corner_lat, (-5.0f64).to_radians());
/// assert_approx_eq!(area, expected, 1e-9);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, 1e-12)
    };
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let (left, right, epsilon): (f64, f64, f64) = ($left, $right, $epsilon);
        let diff = (left - right).abs();
        assert!(
            diff <= epsilon,
            "assertion failed: `left ≈ right`\n  left: {:?}\n right: {:?}\n  diff: {:?} > {:?}",
            left,
            right,
            diff,
            epsilon
        );
    }};
}

/// Assert two `(lon, lat)` pairs agree within `epsilon`.
///
/// ```ignore
/// let [upper_right, ..] = record.cell_corners(0, 0);
/// assert_lonlat_approx_eq!(upper_right, (0.5f64.to_radians(), (-5.0f64).to_radians()), 1e-12);
/// ```
#[macro_export]
macro_rules! assert_lonlat_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let (left, right): ((f64, f64), (f64, f64)) = ($left, $right);
        $crate::assert_approx_eq!(left.0, right.0, $epsilon);
        $crate::assert_approx_eq!(left.1, right.1, $epsilon);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_default_epsilon() {
        assert_approx_eq!(0.1 + 0.2, 0.3);
        assert_approx_eq!(-5.5, -5.500001, 1e-4);
    }

    #[test]
    #[should_panic(expected = "left ≈ right")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 1e-3);
    }

    #[test]
    fn test_assert_lonlat_approx_eq() {
        let corner = (1.0001, 2.0001);
        assert_lonlat_approx_eq!(corner, (1.0, 2.0), 1e-3);
    }
}
