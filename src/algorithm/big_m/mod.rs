//! # The Big-M method
//!
//! The minimum requirement constraints don't have an obvious basic feasible solution. Rather than
//! searching for one in a separate phase, an artificial variable is added to each of them. These
//! artificial variables form a feasible initial basis, and are made so expensive with a penalty
//! `M` in the objective function that the primal simplex method drives them out of the basis
//! whenever the stock allows it.
//!
//! Every iteration is recorded, such that the full course of the method can be displayed.
use tracing::{debug, info, warn};

use crate::algorithm::big_m::solution::Report;
use crate::algorithm::big_m::standard_form::{VariableKind, build};
use crate::algorithm::big_m::strategy::pivot_rule::{PivotRule, SteepestDescentAlongVariable};
use crate::algorithm::big_m::tableau::{Tableau, is_in_basic_feasible_solution_state};
use crate::algorithm::big_m::trace::{Dispatch, Pivot, Step, Trace};
use crate::config::SolverConfig;
use crate::data::number_types::float::is_positive;
use crate::data::problem::Problem;
use crate::error::ConfigError;

pub mod solution;
pub mod standard_form;
pub mod strategy;
pub mod tableau;
pub mod trace;


/// Why the primal simplex iterations stopped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Termination {
    /// No column has a negative relative cost.
    Optimal,
    /// A column with negative relative cost has no positive entry.
    Unbounded,
    /// The maximum number of pivots was reached.
    IterationLimit,
}

/// Solve a problem with the default configuration.
pub fn solve(problem: &Problem) -> Report {
    run::<SteepestDescentAlongVariable>(problem, &SolverConfig::default())
}

/// Solve a problem with a custom configuration.
///
/// # Errors
///
/// When the configuration doesn't validate. Infeasible problems are not an error; they are
/// reported through the status of the report.
pub fn solve_with(problem: &Problem, config: &SolverConfig) -> Result<Report, ConfigError> {
    solve_with_rule::<SteepestDescentAlongVariable>(problem, config)
}

/// Solve a problem with a custom configuration and pivot rule.
pub fn solve_with_rule<PR: PivotRule>(
    problem: &Problem,
    config: &SolverConfig,
) -> Result<Report, ConfigError> {
    config.validate()?;
    Ok(run::<PR>(problem, config))
}

fn run<PR: PivotRule>(problem: &Problem, config: &SolverConfig) -> Report {
    if problem.nr_sites() == 0 {
        info!("no sites to allocate to");
        return Report::no_sites();
    }
    if problem.max_unit_cost() >= config.big_m {
        warn!(
            big_m = config.big_m,
            max_unit_cost = problem.max_unit_cost(),
            "penalty is not larger than every unit cost, unmet requirements may be preferred"
        );
    }

    let mut tableau = build(problem, config);
    let mut trace = Trace::default();
    let termination = primal::<PR>(&mut tableau, &mut trace, config);

    let report = solution::extract(&tableau, problem, termination, config, trace.into_snapshots());
    info!(
        status = %report.status,
        iterations = report.snapshots.len(),
        total_cost = report.total_cost,
        "solved"
    );

    report
}

/// Reduces the penalized cost of the basic feasible solution to the minimum.
///
/// The tableau needs to be in a basic feasible state, which the initial Big-M tableau always is.
/// Before every pivot, the tableau is recorded. The final state is recorded as well.
///
/// # Return value
///
/// Whether the search finished at an optimum, found the problem unbounded or ran out of pivots.
fn primal<PR: PivotRule>(
    tableau: &mut Tableau,
    trace: &mut Trace,
    config: &SolverConfig,
) -> Termination {
    let mut rule = PR::new();
    let mut nr_pivots = 0;
    loop {
        debug_assert!(is_in_basic_feasible_solution_state(tableau));

        match rule.select_primal_pivot_column(tableau) {
            Some(_) if nr_pivots == config.max_iterations => {
                warn!(limit = config.max_iterations, "iteration limit reached before the optimum");
                trace.record(tableau, Step::IterationLimit { limit: config.max_iterations });
                break Termination::IterationLimit;
            },
            Some((column_index, cost)) => match tableau.select_primal_pivot_row(column_index) {
                Some(row_index) => {
                    let layout = tableau.layout();
                    let pivot = Pivot {
                        entering: layout.variable(column_index),
                        leaving: layout.variable(tableau.basis_indices()[row_index]),
                        row: row_index,
                        column: column_index,
                        element: tableau.entry(row_index, column_index),
                        ratios: tableau.ratios(column_index),
                    };
                    debug!(
                        iteration = nr_pivots,
                        entering = %pivot.entering,
                        leaving = %pivot.leaving,
                        relative_cost = cost,
                        "pivot"
                    );

                    trace.record(tableau, Step::Pivot(pivot));
                    tableau.bring_into_basis(column_index, row_index);
                    nr_pivots += 1;
                },
                None => {
                    let entering = tableau.layout().variable(column_index);
                    warn!(%entering, "unbounded direction");
                    trace.record(tableau, Step::Unbounded { entering, column: column_index });
                    break Termination::Unbounded;
                },
            },
            None => {
                let dispatch = if config.dispatch_remaining_stock {
                    plan_dispatch(tableau)
                } else {
                    None
                };

                match dispatch {
                    Some((dispatch, after)) => {
                        debug!(
                            entering = %dispatch.entering,
                            quantity = dispatch.quantity,
                            "dispatching remaining stock"
                        );
                        trace.record(tableau, Step::Optimal { dispatch: Some(dispatch) });
                        *tableau = after;
                        debug_assert!(is_in_basic_feasible_solution_state(tableau));
                    },
                    None => {
                        trace.record(tableau, Step::Optimal { dispatch: None });
                    },
                }
                break Termination::Optimal;
            },
        }
    }
}

/// Find the basis change that moves unused stock out of the stock slack.
///
/// Only applies when the slack is basic at a positive value in an optimal tableau. The entering
/// column follows from the dual ratio test on the row of the slack, over the non basic columns that
/// aren't artificial and have a positive entry in that row. The smallest ratio of relative cost
/// and entry keeps all relative costs non-negative; ties go to the lowest column index.
///
/// # Return value
///
/// The basis change together with the tableau after it, or `None` if all stock is distributed or
/// no column qualifies.
fn plan_dispatch(tableau: &Tableau) -> Option<(Dispatch, Tableau)> {
    let layout = tableau.layout();
    let tolerance = tableau.precision().tolerance;
    let slack = layout.range(VariableKind::Slack).start;

    let row = tableau.basis_row(slack)?;
    let quantity = tableau.constraint_value(row);
    if !is_positive(quantity, tolerance) {
        return None;
    }

    let (column, ratio) = (0..tableau.nr_columns())
        .filter(|&j| !tableau.is_in_basis(j))
        .filter(|&j| layout.variable(j).kind != VariableKind::Artificial)
        .filter(|&j| is_positive(tableau.entry(row, j), tolerance))
        .map(|j| (j, tableau.relative_cost(j) / tableau.entry(row, j)))
        .min_by(|(_, left), (_, right)| left.total_cmp(right))?;

    // The slack row needs to be the row that limits the entering column, or the basis would
    // become infeasible
    let element = tableau.entry(row, column);
    let limit = tableau.min_ratio(column).map(|(_, limit)| limit)?;
    if quantity / element > limit + tolerance {
        warn!(
            entering = %layout.variable(column),
            "remaining stock can't be dispatched without breaking feasibility"
        );
        return None;
    }
    debug_assert!(ratio >= -tolerance);

    let mut after = tableau.clone();
    after.bring_into_basis(column, row);
    let dispatch = Dispatch {
        entering: layout.variable(column),
        leaving: layout.variable(slack),
        row,
        column,
        element,
        quantity,
        tableau: after.matrix().clone(),
        basis: after.basic_variables(),
    };

    Some((dispatch, after))
}
