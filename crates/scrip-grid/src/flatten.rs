//! Flattening between `[nx, ny]` fields and 1-D SCRIP records.
//!
//! Every output array uses the same order: cell `(i, j)` lands at
//! `i * ny + j`. Corner arrays keep the corner axis fastest, giving
//! `[grid_size, 4]`.

use crate::error::{GridError, GridResult};
use crate::types::{CornerArray, Field2D, GridShape};

/// Flatten an `[nx, ny]` field in record order.
pub fn flatten<T: Copy>(field: &Field2D<T>) -> Vec<T> {
    field.data().to_vec()
}

/// Rebuild the `[nx, ny]` field from record order.
pub fn unflatten<T: Copy>(data: Vec<T>, shape: GridShape) -> GridResult<Field2D<T>> {
    if data.len() != shape.size() {
        return Err(GridError::invalid_field(format!(
            "{} values cannot be reshaped to {}",
            data.len(),
            shape
        )));
    }
    Field2D::new(shape.nx, shape.ny, data)
}

/// Flatten a corner array to `[grid_size, 4]` row-major.
pub fn flatten_corners(corners: CornerArray) -> Vec<f64> {
    corners.into_data()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Corner;

    #[test]
    fn test_unflatten_inverts_flatten() {
        let shape = GridShape::new(4, 3);
        let field = Field2D::from_fn(4, 3, |i, j| (i * 100 + j) as f64);
        let flat = flatten(&field);
        assert_eq!(flat[shape.flat_index(2, 1)], 201.0);
        assert_eq!(unflatten(flat, shape).unwrap(), field);
    }

    #[test]
    fn test_unflatten_rejects_wrong_length() {
        assert!(unflatten(vec![0.0; 11], GridShape::new(4, 3)).is_err());
    }

    #[test]
    fn test_corner_rows_follow_cells() {
        let shape = GridShape::new(2, 2);
        let mut corners = CornerArray::zeros(shape);
        corners.set(1, 0, Corner::LowerRight, 5.0);
        let flat = flatten_corners(corners);
        assert_eq!(flat.len(), 16);
        assert_eq!(flat[shape.flat_index(1, 0) * 4 + 3], 5.0);
    }
}
