//! # Dense matrices
//!
//! The simplex tableau of a relief allocation problem is small and almost fully dense, so it is
//! stored row major in a single `Vec`. The shape is fixed at creation: the tableau is allocated
//! once per solve and never resized.
use std::fmt::Debug;
use std::ops::{Index, IndexMut};

use num_traits::{NumAssign, Zero};
use serde::{Serialize, Serializer};

/// Row major matrix with a fixed number of rows and columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<F> {
    data: Vec<F>,
    nr_rows: usize,
    nr_columns: usize,
}

impl<F> Dense<F> {
    /// Create a matrix filled with zeros.
    ///
    /// # Arguments
    ///
    /// * `nr_rows`: Number of rows, fixed for the lifetime of the matrix.
    /// * `nr_columns`: Number of columns, fixed for the lifetime of the matrix.
    pub fn zeros(nr_rows: usize, nr_columns: usize) -> Self
    where
        F: Zero + Clone,
    {
        Self {
            data: vec![F::zero(); nr_rows * nr_columns],
            nr_rows,
            nr_columns,
        }
    }

    /// Create a matrix from a collection of rows.
    ///
    /// All rows should have the same length.
    pub fn from_rows(rows: Vec<Vec<F>>) -> Self {
        let nr_rows = rows.len();
        let nr_columns = rows.first().map_or(0, Vec::len);
        debug_assert!(rows.iter().all(|row| row.len() == nr_columns));

        Self {
            data: rows.into_iter().flatten().collect(),
            nr_rows,
            nr_columns,
        }
    }

    /// Number of rows.
    pub fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    /// Number of columns.
    pub fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    /// Borrow a single row.
    pub fn row(&self, i: usize) -> &[F] {
        debug_assert!(i < self.nr_rows);

        &self.data[i * self.nr_columns..(i + 1) * self.nr_columns]
    }

    /// Borrow a single row mutably.
    pub fn row_mut(&mut self, i: usize) -> &mut [F] {
        debug_assert!(i < self.nr_rows);

        &mut self.data[i * self.nr_columns..(i + 1) * self.nr_columns]
    }

    /// Iterate over all rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[F]> + '_ {
        // `chunks_exact` panics on a zero chunk size
        self.data.chunks_exact(self.nr_columns.max(1)).take(self.nr_rows)
    }

    /// Apply a function to every element, in place.
    pub fn map_in_place(&mut self, f: impl FnMut(&mut F)) {
        self.data.iter_mut().for_each(f);
    }
}

impl<F: NumAssign + Copy> Dense<F> {
    /// Divide all values in a row by a constant.
    ///
    /// # Arguments
    ///
    /// * `i`: Row index.
    /// * `divisor`: Nonzero value to divide by.
    pub fn divide_row(&mut self, i: usize, divisor: F) {
        debug_assert!(divisor != F::zero());

        for value in self.row_mut(i) {
            *value /= divisor;
        }
    }

    /// Subtract a multiple of one row from another row.
    ///
    /// # Arguments
    ///
    /// * `target`: Index of the row that is modified.
    /// * `source`: Index of the row that is subtracted, should differ from `target`.
    /// * `factor`: Multiple of the `source` row to subtract.
    pub fn subtract_multiple_of_row(&mut self, target: usize, source: usize, factor: F) {
        debug_assert_ne!(target, source);
        debug_assert!(target < self.nr_rows && source < self.nr_rows);

        let width = self.nr_columns;
        for j in 0..width {
            let value = self.data[source * width + j];
            self.data[target * width + j] -= factor * value;
        }
    }
}

impl<F> Index<(usize, usize)> for Dense<F> {
    type Output = F;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        debug_assert!(i < self.nr_rows && j < self.nr_columns);

        &self.data[i * self.nr_columns + j]
    }
}

impl<F> IndexMut<(usize, usize)> for Dense<F> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        debug_assert!(i < self.nr_rows && j < self.nr_columns);

        &mut self.data[i * self.nr_columns + j]
    }
}

/// Serialized as a list of rows, which is what renderers of the tableau consume.
impl<F: Serialize> Serialize for Dense<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter_rows())
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_algebra::matrix::Dense;

    #[test]
    fn zeros() {
        let matrix = Dense::<f64>::zeros(2, 3);
        assert_eq!(matrix.nr_rows(), 2);
        assert_eq!(matrix.nr_columns(), 3);
        assert!(matrix.iter_rows().flatten().all(|&v| v == 0f64));
    }

    #[test]
    fn index_and_rows() {
        let mut matrix = Dense::from_rows(vec![
            vec![1f64, 2f64, 3f64],
            vec![4f64, 5f64, 6f64],
        ]);
        assert_eq!(matrix[(1, 2)], 6f64);
        assert_eq!(matrix.row(0), &[1f64, 2f64, 3f64]);

        matrix[(0, 0)] = -1f64;
        assert_eq!(matrix.row(0)[0], -1f64);
    }

    #[test]
    fn row_operations() {
        let mut matrix = Dense::from_rows(vec![
            vec![2f64, 4f64, 6f64],
            vec![1f64, 1f64, 1f64],
        ]);
        matrix.divide_row(0, 2f64);
        assert_eq!(matrix.row(0), &[1f64, 2f64, 3f64]);

        matrix.subtract_multiple_of_row(1, 0, 1f64);
        assert_eq!(matrix.row(1), &[0f64, -1f64, -2f64]);
    }

    #[test]
    fn serialize_as_rows() {
        let matrix = Dense::from_rows(vec![vec![1f64, 2f64], vec![3f64, 4f64]]);
        let json = serde_json::to_string(&matrix).unwrap();
        assert_eq!(json, "[[1.0,2.0],[3.0,4.0]]");
    }
}
