//! # The simplex tableau
//!
//! Holds the full dense tableau of the Big-M standard form together with the basis, and implements
//! the elementary operations of the primal simplex method on it: the minimum ratio test and the
//! Gauss-Jordan pivot.
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use serde::Serialize;

use crate::algorithm::big_m::standard_form::{Layout, Variable};
use crate::data::linear_algebra::matrix::Dense;
use crate::data::number_types::float::{Precision, is_positive, snap_to_zero};

/// Outcome of the ratio test for a single row.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ratio {
    /// Right hand side divided by a positive entry of the entering column.
    Value(f64),
    /// The entry of the entering column is not positive, the row doesn't limit the step.
    NotApplicable,
}

impl Display for Ratio {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Value(value) => f.pad(&format!("{:.2}", value)),
            Ratio::NotApplicable => f.pad("-"),
        }
    }
}

/// Dense simplex tableau with its basis.
///
/// The matrix has one row per constraint plus the objective row (last), and one column per
/// variable plus the right hand side (last). The objective row holds the relative costs; its right
/// hand side holds minus the current objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    matrix: Dense<f64>,
    layout: Layout,
    /// Maps the rows to the column containing its pivot.
    basis_indices: Vec<usize>,
    /// All columns currently in the basis.
    ///
    /// Could also be derived from `basis_indices`, but is here for faster reading.
    basis_columns: HashSet<usize>,
    precision: Precision,
}

impl Tableau {
    /// Create a tableau from a matrix that is already in canonical form for the given basis.
    ///
    /// # Arguments
    ///
    /// * `matrix`: `(m + 1) x (k + 1)` matrix, objective row and right hand side last.
    /// * `layout`: Positions of the variables.
    /// * `basis_indices`: For each constraint row, the column of its basic variable.
    /// * `precision`: Tolerances for the pivoting.
    pub fn new(
        matrix: Dense<f64>,
        layout: Layout,
        basis_indices: Vec<usize>,
        precision: Precision,
    ) -> Self {
        debug_assert_eq!(matrix.nr_rows(), layout.nr_rows() + 1);
        debug_assert_eq!(matrix.nr_columns(), layout.nr_columns() + 1);
        debug_assert_eq!(basis_indices.len(), layout.nr_rows());

        let basis_columns = basis_indices.iter().copied().collect();
        Self { matrix, layout, basis_indices, basis_columns, precision }
    }

    /// Number of constraint rows, excluding the objective row.
    pub fn nr_rows(&self) -> usize {
        self.layout.nr_rows()
    }

    /// Number of variables, excluding the right hand side.
    pub fn nr_columns(&self) -> usize {
        self.layout.nr_columns()
    }

    /// The coefficient of a variable in a constraint row.
    pub fn entry(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.nr_rows());
        debug_assert!(j < self.nr_columns());

        self.matrix[(i, j)]
    }

    /// Relative cost of a column, as read from the objective row.
    ///
    /// Is zero for basic columns.
    pub fn relative_cost(&self, j: usize) -> f64 {
        debug_assert!(j < self.nr_columns());

        self.matrix[(self.layout.objective_row(), j)]
    }

    /// Value of the basic variable of a constraint row.
    pub fn constraint_value(&self, i: usize) -> f64 {
        debug_assert!(i < self.nr_rows());

        self.matrix[(i, self.layout.rhs_column())]
    }

    /// Current value of the (penalized) objective function.
    pub fn objective_function_value(&self) -> f64 {
        -self.matrix[(self.layout.objective_row(), self.layout.rhs_column())]
    }

    /// Whether a column is in the basis.
    pub fn is_in_basis(&self, column: usize) -> bool {
        debug_assert!(column < self.nr_columns());

        self.basis_columns.contains(&column)
    }

    /// Row in which a column is basic, if it is.
    pub fn basis_row(&self, column: usize) -> Option<usize> {
        self.basis_indices.iter().position(|&j| j == column)
    }

    /// For each row, the column of its basic variable.
    pub fn basis_indices(&self) -> &[usize] {
        &self.basis_indices
    }

    /// For each row, its basic variable.
    pub fn basic_variables(&self) -> Vec<Variable> {
        self.basis_indices.iter().map(|&j| self.layout.variable(j)).collect()
    }

    /// The full matrix, including objective row and right hand side.
    pub fn matrix(&self) -> &Dense<f64> {
        &self.matrix
    }

    /// Positions of the variables.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Tolerances used by this tableau.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Values of all variables in the current basic solution.
    ///
    /// Non basic variables are zero. Basic variables take the right hand side of their row,
    /// clamped at zero to absorb rounding noise.
    pub fn current_bfs(&self) -> Vec<f64> {
        let mut values = vec![0f64; self.nr_columns()];
        for (i, &j) in self.basis_indices.iter().enumerate() {
            values[j] = self.constraint_value(i).max(0f64);
        }

        values
    }

    /// Ratio of the right hand side and the column entry, for every constraint row.
    pub fn ratios(&self, column: usize) -> Vec<Ratio> {
        (0..self.nr_rows())
            .map(|i| {
                let entry = self.entry(i, column);
                if is_positive(entry, self.precision.tolerance) {
                    Ratio::Value(self.constraint_value(i) / entry)
                } else {
                    Ratio::NotApplicable
                }
            })
            .collect()
    }

    /// Smallest non-negative ratio over the rows with a positive entry in a column.
    ///
    /// # Return value
    ///
    /// Row index and value of the minimum ratio. Ties go to the lowest row index. `None` if no
    /// entry in the column is positive.
    pub fn min_ratio(&self, column: usize) -> Option<(usize, f64)> {
        debug_assert!(column < self.nr_columns());

        let mut min_values: Option<(usize, f64)> = None;
        for (i, ratio) in self.ratios(column).into_iter().enumerate() {
            if let Ratio::Value(ratio) = ratio {
                if ratio < 0f64 {
                    continue;
                }
                match min_values {
                    Some((_, min_ratio)) if ratio >= min_ratio => {},
                    _ => min_values = Some((i, ratio)),
                }
            }
        }

        min_values
    }

    /// Determine the row to pivot on, given the column.
    ///
    /// This is the row with the minimal non-negative ratio between the right hand side and the
    /// column. If not found, the problem is unbounded in the direction of this column.
    pub fn select_primal_pivot_row(&self, column: usize) -> Option<usize> {
        self.min_ratio(column).map(|(row, _)| row)
    }

    /// Brings a column into the basis with a Gauss-Jordan step.
    ///
    /// The pivot row is normalized such that the pivot element becomes one, after which a multiple
    /// of it is subtracted from every other row (the objective row included) to clear the pivot
    /// column. Remaining rounding noise is snapped to zero.
    ///
    /// # Arguments
    ///
    /// * `pivot_column_index`: Column entering the basis, not yet basic.
    /// * `pivot_row_index`: Row whose basic variable leaves the basis.
    pub fn bring_into_basis(&mut self, pivot_column_index: usize, pivot_row_index: usize) {
        debug_assert!(pivot_column_index < self.nr_columns());
        debug_assert!(pivot_row_index < self.nr_rows());
        debug_assert!(!self.is_in_basis(pivot_column_index));

        let pivot_element = self.matrix[(pivot_row_index, pivot_column_index)];
        debug_assert!(pivot_element != 0f64);

        self.matrix.divide_row(pivot_row_index, pivot_element);
        self.matrix[(pivot_row_index, pivot_column_index)] = 1f64;

        for i in 0..self.matrix.nr_rows() {
            if i == pivot_row_index {
                continue;
            }
            let factor = self.matrix[(i, pivot_column_index)];
            if factor != 0f64 {
                self.matrix.subtract_multiple_of_row(i, pivot_row_index, factor);
                self.matrix[(i, pivot_column_index)] = 0f64;
            }
        }

        let tolerance = self.precision.tolerance;
        self.matrix.map_in_place(|value| *value = snap_to_zero(*value, tolerance));

        self.update_basis_indices(pivot_row_index, pivot_column_index);
    }

    /// Replace the basic variable of a row.
    fn update_basis_indices(&mut self, pivot_row: usize, pivot_column: usize) {
        let leaving_column = self.basis_indices[pivot_row];
        self.basis_columns.remove(&leaving_column);
        self.basis_indices[pivot_row] = pivot_column;
        self.basis_columns.insert(pivot_column);
    }
}

/// Check whether the tableau currently has a valid basic feasible solution.
///
/// Only used for debug purposes.
pub fn is_in_basic_feasible_solution_state(tableau: &Tableau) -> bool {
    let tolerance = tableau.precision.tolerance;

    // Correct number of unique basis columns, same as in `basis_columns`
    let as_set = tableau.basis_indices.iter().copied().collect::<HashSet<_>>();
    let basis = tableau.basis_indices.len() == tableau.nr_rows()
        && as_set.len() == tableau.nr_rows()
        && as_set == tableau.basis_columns;

    // Basic columns are unit vectors with zero relative cost
    let unit_columns = tableau.basis_indices.iter().enumerate().all(|(i, &j)| {
        (0..tableau.nr_rows()).all(|k| {
            let expected = if k == i { 1f64 } else { 0f64 };
            (tableau.entry(k, j) - expected).abs() <= tolerance
        }) && tableau.relative_cost(j).abs() <= tolerance
    });

    // b >= 0
    let b = (0..tableau.nr_rows()).all(|i| tableau.constraint_value(i) >= -tolerance);

    basis && unit_columns && b
}

/// Write a tableau as a table, with the basic variables as row labels.
pub(crate) fn write_table(
    f: &mut Formatter<'_>,
    matrix: &Dense<f64>,
    layout: &Layout,
    basis: &[Variable],
    precision: &Precision,
) -> fmt::Result {
    let column_width = 10;
    let counter_width = 10;
    let separator = "-".repeat(counter_width + 2 + (layout.nr_columns() + 1) * column_width);

    write!(f, "{0:width$}|", "", width = counter_width)?;
    for variable in layout.variables() {
        write!(f, "{0:^width$}", variable, width = column_width)?;
    }
    writeln!(f, "|{0:^width$}", "RHS", width = column_width)?;
    writeln!(f, "{}", separator)?;

    for (row_index, row) in matrix.iter_rows().enumerate() {
        let label = if row_index == layout.objective_row() {
            writeln!(f, "{}", separator)?;
            "z".to_string()
        } else {
            basis[row_index].to_string()
        };
        write!(f, "{0:>width$}|", format!("{}  ", label), width = counter_width)?;
        for &value in &row[..layout.nr_columns()] {
            write!(f, "{0:^width$}", precision.display(value), width = column_width)?;
        }
        writeln!(f, "|{0:^width$}", precision.display(row[layout.rhs_column()]), width = column_width)?;
    }

    Ok(())
}

impl Display for Tableau {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tableau:")?;
        write_table(f, &self.matrix, &self.layout, &self.basic_variables(), &self.precision)?;
        writeln!(f, "Basis: {}", self.basic_variables().iter().join(", "))
    }
}
