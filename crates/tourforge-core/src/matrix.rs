//! Dense distance matrix.

use crate::error::{Result, TourForgeError};
use crate::instance::Point;

/// A dense n×n distance matrix stored in row-major order.
///
/// The matrix need not be symmetric; `get(i, j)` is the cost of arc `i → j`.
/// Diagonal entries are stored but never read by the solver.
///
/// # Examples
///
/// ```
/// use tourforge_core::{DistanceMatrix, Point};
///
/// let points = [Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
/// let dm = DistanceMatrix::euclidean(&points);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from point coordinates.
    pub fn euclidean(points: &[Point]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Fails with [`TourForgeError::MalformedInstance`] if any row length
    /// differs from the number of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(TourForgeError::MalformedInstance(format!(
                    "distance matrix is not square: row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, size })
    }

    /// Creates a distance matrix from an explicit row-major grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the outgoing distances of `from` as a slice.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the first off-diagonal entry that is negative or not finite.
    pub(crate) fn find_invalid_entry(&self) -> Option<(usize, usize, f64)> {
        for i in 0..self.size {
            for j in 0..self.size {
                if i == j {
                    continue;
                }
                let d = self.get(i, j);
                if !d.is_finite() || d < 0.0 {
                    return Some((i, j, d));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(0.0, 8.0),
        ]
    }

    #[test]
    fn test_euclidean() {
        let dm = DistanceMatrix::euclidean(&sample_points());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!(dm.get(0, 0).abs() < 1e-10);
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_rows() {
        let dm = DistanceMatrix::from_rows(&[vec![0.0, 5.0], vec![7.0, 0.0]]).unwrap();
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 7.0);
        assert_eq!(dm.row(1), &[7.0, 0.0]);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_rows_not_square() {
        let err = DistanceMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, TourForgeError::MalformedInstance(_)));
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_find_invalid_entry_ignores_diagonal() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 0, f64::NAN);
        dm.set(0, 1, 1.0);
        dm.set(1, 0, 1.0);
        assert_eq!(dm.find_invalid_entry(), None);

        dm.set(1, 0, -2.0);
        assert_eq!(dm.find_invalid_entry(), Some((1, 0, -2.0)));
    }
}
