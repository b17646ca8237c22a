//! Learned per-dye spectral signatures.

use crate::error::DatasetError;

/// Square dye coefficient matrix.
///
/// Row `i` holds the response of the dye registered on channel `i` across
/// every channel column. Values are percentage-like by convention but are not
/// range-checked. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DyeMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DyeMatrix {
    /// Build a matrix from rows, requiring a square shape and finite values.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DatasetError> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);
        for (row, coefficients) in rows.into_iter().enumerate() {
            if coefficients.len() != size {
                return Err(DatasetError::NonSquareMatrix {
                    row,
                    expected: size,
                    found: coefficients.len(),
                });
            }
            if let Some(column) = coefficients.iter().position(|value| !value.is_finite()) {
                return Err(DatasetError::NonFiniteCoefficient { row, column });
            }
            values.extend(coefficients);
        }
        Ok(Self { size, values })
    }

    /// Number of dyes (and channels).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Coefficient of a dye on a channel column.
    pub fn coefficient(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.size || column >= self.size {
            return None;
        }
        self.values.get(row * self.size + column).copied()
    }

    /// Coefficients of a dye across all channel columns.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.size {
            return None;
        }
        let start = row * self.size;
        Some(&self.values[start..start + self.size])
    }

    /// Iterate rows in dye order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.size.max(1)).take(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_rows() {
        let err = DyeMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0]]).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::NonSquareMatrix {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = DyeMatrix::from_rows(vec![vec![1.0, f64::NAN], vec![0.0, 1.0]]).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::NonFiniteCoefficient { row: 0, column: 1 }
        ));
    }

    #[test]
    fn indexes_row_major() {
        let matrix = DyeMatrix::from_rows(vec![
            vec![10.0, 2.0, 0.0],
            vec![1.0, 20.0, 3.0],
            vec![0.0, 4.0, 30.0],
        ])
        .expect("matrix");
        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.coefficient(1, 2), Some(3.0));
        assert_eq!(matrix.coefficient(3, 0), None);
        assert_eq!(matrix.row(2), Some(&[0.0, 4.0, 30.0][..]));
        assert_eq!(matrix.rows().count(), 3);
    }

    #[test]
    fn empty_matrix_has_no_rows() {
        let matrix = DyeMatrix::from_rows(Vec::new()).expect("empty");
        assert_eq!(matrix.size(), 0);
        assert_eq!(matrix.rows().count(), 0);
    }
}
