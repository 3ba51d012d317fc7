//! Cell area normalization.
//!
//! Areas are `e1 * e2 / R²`. This is a solid angle only when the metrics
//! are arc lengths in metres; it is kept as-is for compatibility with
//! existing SCRIP files rather than computed from the corner polygon.

use crate::corners::CellSpacing;
use crate::error::{GridError, GridResult};
use crate::types::{Field2D, GridShape};

/// Earth radius used by both model families (m).
pub const EARTH_RADIUS_M: f64 = 6_371_229.0;

/// Horizontal scale factors of the T-cells, `[nx, ny]`.
#[derive(Debug, Clone)]
pub struct CellMetrics {
    pub e1: Field2D,
    pub e2: Field2D,
}

#[inline]
fn normalize(e1: f64, e2: f64) -> f64 {
    (e1 * e2).abs() / (EARTH_RADIUS_M * EARTH_RADIUS_M)
}

/// Area of every cell from its metrics, in steradians.
pub fn normalized_area(metrics: &CellMetrics, shape: GridShape) -> GridResult<Field2D> {
    for (name, field) in [("e1", &metrics.e1), ("e2", &metrics.e2)] {
        if field.shape() != (shape.nx, shape.ny) {
            return Err(GridError::shape_mismatch(
                name,
                shape.to_string(),
                format!("[{}, {}]", field.rows(), field.cols()),
            ));
        }
    }

    Ok(Field2D::from_fn(shape.nx, shape.ny, |i, j| {
        normalize(metrics.e1.get(i, j), metrics.e2.get(i, j))
    }))
}

/// Area of every cell assuming uniform spacing equal to the staggered
/// spacing (radians).
pub fn uniform_area(shape: GridShape, spacing: CellSpacing) -> Field2D {
    let e1 = spacing.lon.abs() * EARTH_RADIUS_M;
    let e2 = spacing.lat.abs() * EARTH_RADIUS_M;
    Field2D::filled(shape.nx, shape.ny, normalize(e1, e2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_area() {
        let shape = GridShape::new(2, 1);
        let metrics = CellMetrics {
            e1: Field2D::new(2, 1, vec![EARTH_RADIUS_M, 1000.0]).unwrap(),
            e2: Field2D::new(2, 1, vec![EARTH_RADIUS_M, 2000.0]).unwrap(),
        };
        let area = normalized_area(&metrics, shape).unwrap();
        assert_eq!(area.get(0, 0), 1.0);
        let expected = 2.0e6 / (EARTH_RADIUS_M * EARTH_RADIUS_M);
        assert!((area.get(1, 0) - expected).abs() < 1e-20);
    }

    #[test]
    fn test_area_never_negative() {
        let shape = GridShape::new(1, 1);
        let metrics = CellMetrics {
            e1: Field2D::filled(1, 1, -500.0),
            e2: Field2D::filled(1, 1, 400.0),
        };
        let area = normalized_area(&metrics, shape).unwrap();
        assert!(area.get(0, 0) > 0.0);
    }

    #[test]
    fn test_metric_shape_checked() {
        let metrics = CellMetrics {
            e1: Field2D::filled(2, 2, 1.0),
            e2: Field2D::filled(2, 3, 1.0),
        };
        assert!(matches!(
            normalized_area(&metrics, GridShape::new(2, 2)),
            Err(GridError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_uniform_area_is_product_of_spacings() {
        let spacing = CellSpacing {
            lon: 0.01,
            lat: -0.02,
        };
        let area = uniform_area(GridShape::new(3, 2), spacing);
        assert_eq!(area.shape(), (3, 2));
        assert!((area.get(2, 1) - 2.0e-4).abs() < 1e-15);
    }
}
