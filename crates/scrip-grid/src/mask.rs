//! Land-sea mask resolution.

use crate::error::{GridError, GridResult};
use crate::types::{Field2D, GridShape};

/// A land-sea indicator as read from a mask source.
///
/// The trailing two axes are `[ny, nx]`; any leading axes (depth, time)
/// are allowed but only their first level is consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskIndicator {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl MaskIndicator {
    /// Wrap row-major indicator values.
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> GridResult<Self> {
        if shape.len() < 2 {
            return Err(GridError::invalid_field(format!(
                "mask needs at least 2 dimensions, got {:?}",
                shape
            )));
        }
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(GridError::invalid_field(format!(
                "mask shape {:?} needs {} values, got {}",
                shape,
                expected,
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Indicator from a native `[ny, nx]` field.
    pub fn from_field(field: &Field2D) -> Self {
        Self {
            shape: vec![field.rows(), field.cols()],
            data: field.data().to_vec(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The first level, `[ny, nx]`.
    pub fn surface(&self) -> Field2D {
        let rank = self.shape.len();
        let (ny, nx) = (self.shape[rank - 2], self.shape[rank - 1]);
        Field2D::from_fn(ny, nx, |r, c| self.data[r * nx + c])
    }
}

/// Resolve the binary mask (1 = sea, 0 = land) in `[nx, ny]` layout.
///
/// Without an indicator every cell is sea. Indicator values above zero are
/// sea; zero, negative and NaN values are land.
pub fn resolve_mask(indicator: Option<&MaskIndicator>, shape: GridShape) -> GridResult<Field2D<i32>> {
    let Some(indicator) = indicator else {
        return Ok(Field2D::filled(shape.nx, shape.ny, 1));
    };

    let surface = indicator.surface();
    if surface.shape() != (shape.ny, shape.nx) {
        return Err(GridError::shape_mismatch(
            "mask",
            format!("[{}, {}]", shape.ny, shape.nx),
            format!("{:?}", indicator.shape()),
        ));
    }

    Ok(surface
        .transposed()
        .map(|v| if v > 0.0 { 1 } else { 0 }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_sea() {
        let mask = resolve_mask(None, GridShape::new(4, 3)).unwrap();
        assert_eq!(mask.shape(), (4, 3));
        assert!(mask.data().iter().all(|&v| v == 1));
    }

    #[test]
    fn test_threshold_and_transpose() {
        // native [ny=2, nx=3]
        let indicator =
            MaskIndicator::new(vec![2, 3], vec![1.0, 0.0, 0.5, -1.0, f64::NAN, 2.0]).unwrap();
        let mask = resolve_mask(Some(&indicator), GridShape::new(3, 2)).unwrap();
        assert_eq!(mask.shape(), (3, 2));
        assert_eq!(mask.get(0, 0), 1);
        assert_eq!(mask.get(1, 0), 0);
        assert_eq!(mask.get(2, 0), 1);
        assert_eq!(mask.get(0, 1), 0);
        assert_eq!(mask.get(1, 1), 0);
        assert_eq!(mask.get(2, 1), 1);
    }

    #[test]
    fn test_only_first_level_used() {
        // [levels=2, ny=1, nx=2]: second level is all land
        let indicator = MaskIndicator::new(vec![2, 1, 2], vec![1.0, 1.0, 0.0, 0.0]).unwrap();
        let mask = resolve_mask(Some(&indicator), GridShape::new(2, 1)).unwrap();
        assert_eq!(mask.data(), &[1, 1]);
    }

    #[test]
    fn test_shape_mismatch() {
        let indicator = MaskIndicator::new(vec![3, 3], vec![1.0; 9]).unwrap();
        assert!(matches!(
            resolve_mask(Some(&indicator), GridShape::new(4, 3)),
            Err(GridError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_indicator_validation() {
        assert!(MaskIndicator::new(vec![4], vec![1.0; 4]).is_err());
        assert!(MaskIndicator::new(vec![2, 2], vec![1.0; 3]).is_err());
    }
}
