//! # Pivot rules
//!
//! Strategies for choosing the variable that enters the basis.
use crate::algorithm::big_m::tableau::Tableau;
use crate::data::number_types::float::is_negative;

/// Deciding how to pivot.
///
/// During the simplex method, one needs to decide how to move from basic solution to basic
/// solution. The pivot rule describes that behavior.
///
/// Once the column has been selected, the row follows from the minimum ratio test. That decision
/// is made independent of the strategy.
pub trait PivotRule {
    /// Create a new instance.
    fn new() -> Self;

    /// Column selection rule for the primal simplex method.
    ///
    /// # Return value
    ///
    /// Index and relative cost of a non basic column with a negative relative cost, or `None` if
    /// there is no such column and the tableau is optimal.
    fn select_primal_pivot_column(&mut self, tableau: &Tableau) -> Option<(usize, f64)>;
}

/// Non basic columns whose relative cost is negative beyond the tolerance, in column order.
fn profitable_columns(tableau: &Tableau) -> impl Iterator<Item = (usize, f64)> + '_ {
    let tolerance = tableau.precision().tolerance;
    (0..tableau.nr_columns())
        .filter(|&column| !tableau.is_in_basis(column))
        .map(|column| (column, tableau.relative_cost(column)))
        .filter(move |&(_, cost)| is_negative(cost, tolerance))
}

/// Simply pivot on the first column which has a negative relative cost.
pub struct FirstProfitable;
impl PivotRule for FirstProfitable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column(&mut self, tableau: &Tableau) -> Option<(usize, f64)> {
        profitable_columns(tableau).next()
    }
}

/// Pivot on the column with the most negative relative cost.
///
/// Ties go to the column with the lowest index.
pub struct SteepestDescentAlongVariable;
impl PivotRule for SteepestDescentAlongVariable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column(&mut self, tableau: &Tableau) -> Option<(usize, f64)> {
        let mut smallest: Option<(usize, f64)> = None;
        for (j, cost) in profitable_columns(tableau) {
            if let Some((existing_j, existing_cost)) = smallest.as_mut() {
                if cost < *existing_cost {
                    *existing_j = j;
                    *existing_cost = cost;
                }
            } else {
                smallest = Some((j, cost));
            }
        }

        smallest
    }
}
