//! # Standard form
//!
//! Every site `i` contributes a constraint `x_i - s_i + A_i = minimum_i`, with a surplus variable
//! `s_i` and an artificial variable `A_i`. The stock gives one more constraint
//! `x_1 + ... + x_n + slack = capacity`. The artificial variables and the slack form the initial
//! basis, which is feasible because all right hand sides are non-negative.
use std::fmt::{self, Display, Formatter};
use std::ops::Range;

use enum_map::{Enum, EnumMap, enum_map};
use serde::Serialize;

use crate::algorithm::big_m::tableau::Tableau;
use crate::config::SolverConfig;
use crate::data::linear_algebra::matrix::Dense;
use crate::data::problem::Problem;

/// The role of a variable in the standard form.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Enum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    /// Amount allocated to a site.
    Decision,
    /// Amount allocated to a site on top of its minimum requirement.
    Surplus,
    /// Unmet minimum requirement of a site, penalized with Big-M.
    Artificial,
    /// Stock that is not distributed.
    Slack,
}

/// A single column of the tableau, by role.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Variable {
    /// Role of the variable.
    pub kind: VariableKind,
    /// Index of the site this variable belongs to; always `0` for the slack.
    pub index: usize,
}

impl Variable {
    /// Index of the site this variable belongs to, if any.
    pub fn site(&self) -> Option<usize> {
        match self.kind {
            VariableKind::Slack => None,
            _ => Some(self.index),
        }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            VariableKind::Decision => format!("x{}", self.index + 1),
            VariableKind::Surplus => format!("s{}", self.index + 1),
            VariableKind::Artificial => format!("A{}", self.index + 1),
            VariableKind::Slack => "s_stock".to_string(),
        };
        f.pad(&name)
    }
}

/// Column and row positions of the standard form of a problem with `n` sites.
///
/// Columns `0..n` are decision variables, `n..2n` surplus variables, `2n..3n` artificial
/// variables, `3n` the stock slack and `3n + 1` the right hand side. Rows `0..n` are the minimum
/// requirement constraints, row `n` the stock constraint and row `n + 1` the objective.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Layout {
    nr_sites: usize,
    columns: EnumMap<VariableKind, Range<usize>>,
}

impl Layout {
    /// Create the layout for a given number of sites.
    pub fn new(nr_sites: usize) -> Self {
        let n = nr_sites;
        Self {
            nr_sites,
            columns: enum_map! {
                VariableKind::Decision => 0..n,
                VariableKind::Surplus => n..2 * n,
                VariableKind::Artificial => 2 * n..3 * n,
                VariableKind::Slack => 3 * n..3 * n + 1,
            },
        }
    }

    /// Number of sites.
    pub fn nr_sites(&self) -> usize {
        self.nr_sites
    }

    /// Number of constraint rows, excluding the objective row.
    pub fn nr_rows(&self) -> usize {
        self.nr_sites + 1
    }

    /// Number of variable columns, excluding the right hand side.
    pub fn nr_columns(&self) -> usize {
        3 * self.nr_sites + 1
    }

    /// Row index of the stock constraint.
    pub fn stock_row(&self) -> usize {
        self.nr_sites
    }

    /// Row index of the objective function.
    pub fn objective_row(&self) -> usize {
        self.nr_sites + 1
    }

    /// Column index of the right hand side.
    pub fn rhs_column(&self) -> usize {
        self.nr_columns()
    }

    /// Columns holding variables of a kind.
    pub fn range(&self, kind: VariableKind) -> Range<usize> {
        self.columns[kind].clone()
    }

    /// Column index of a variable.
    pub fn column(&self, variable: Variable) -> usize {
        let range = &self.columns[variable.kind];
        debug_assert!(variable.index < range.len());

        range.start + variable.index
    }

    /// The variable stored in a column.
    pub fn variable(&self, column: usize) -> Variable {
        debug_assert!(column < self.nr_columns());

        let n = self.nr_sites;
        let kind = if column < n {
            VariableKind::Decision
        } else if column < 2 * n {
            VariableKind::Surplus
        } else if column < 3 * n {
            VariableKind::Artificial
        } else {
            VariableKind::Slack
        };
        Variable { kind, index: column - self.columns[kind].start }
    }

    /// All variables in column order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        (0..self.nr_columns()).map(move |column| self.variable(column))
    }
}

/// Build the initial Big-M tableau for a problem.
///
/// The objective row is first filled with the unit costs and the penalty `M` for each artificial
/// variable. Because the artificial variables are basic, `M` times each of their rows is then
/// subtracted, such that the objective row only has nonzero coefficients for non basic variables.
///
/// # Arguments
///
/// * `problem`: Problem with at least one site.
/// * `config`: Source of the penalty `M` and tolerances.
///
/// # Return value
///
/// A tableau with `n + 1` constraint rows, `3n + 1` variable columns, and basis
/// `A_1, ..., A_n, slack`.
pub fn build(problem: &Problem, config: &SolverConfig) -> Tableau {
    debug_assert!(problem.nr_sites() > 0);

    let layout = Layout::new(problem.nr_sites());
    let rhs = layout.rhs_column();
    let objective = layout.objective_row();
    let stock = layout.stock_row();
    let mut matrix = Dense::zeros(layout.nr_rows() + 1, layout.nr_columns() + 1);

    for (i, site) in problem.sites().iter().enumerate() {
        matrix[(i, layout.column(Variable { kind: VariableKind::Decision, index: i }))] = 1f64;
        matrix[(i, layout.column(Variable { kind: VariableKind::Surplus, index: i }))] = -1f64;
        matrix[(i, layout.column(Variable { kind: VariableKind::Artificial, index: i }))] = 1f64;
        matrix[(i, rhs)] = site.minimum_requirement;
    }

    for j in layout.range(VariableKind::Decision).chain(layout.range(VariableKind::Slack)) {
        matrix[(stock, j)] = 1f64;
    }
    matrix[(stock, rhs)] = problem.total_capacity();

    for (i, site) in problem.sites().iter().enumerate() {
        matrix[(objective, layout.column(Variable { kind: VariableKind::Decision, index: i }))] = site.unit_cost;
        matrix[(objective, layout.column(Variable { kind: VariableKind::Artificial, index: i }))] = config.big_m;
    }

    // Express the objective in terms of the non basic variables
    for i in 0..problem.nr_sites() {
        matrix.subtract_multiple_of_row(objective, i, config.big_m);
    }

    let basis = layout.range(VariableKind::Artificial)
        .chain(layout.range(VariableKind::Slack))
        .collect();

    Tableau::new(matrix, layout, basis, config.precision())
}
