//! Degree to radian conversion and longitude normalization.
//!
//! Longitudes below zero are shifted by +360 before conversion so that the
//! output lies in `[0, 2π)` for inputs in `[-180, 360)`. Values already
//! outside that window are passed through after the same shift rule.

use std::f64::consts::{PI, TAU};

use crate::types::Field2D;

/// Shift a longitude in degrees from `[-180, 180)` to `[0, 360)`.
#[inline]
pub fn normalize_longitude(deg: f64) -> f64 {
    if deg < 0.0 {
        deg + 360.0
    } else {
        deg
    }
}

/// Normalize and convert a longitude field to radians.
pub fn longitudes_to_radians(field: &Field2D) -> Field2D {
    field.map(|deg| normalize_longitude(deg).to_radians())
}

/// Convert a latitude field to radians.
pub fn latitudes_to_radians(field: &Field2D) -> Field2D {
    field.map(f64::to_radians)
}

/// Wrap a longitude difference in radians into `(-π, π]`.
#[inline]
pub fn wrap_longitude_delta(delta: f64) -> f64 {
    let wrapped = delta.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// `radians(floor(deg))`.
#[inline]
pub fn floor_latitude_radians(deg: f64) -> f64 {
    deg.floor().to_radians()
}
