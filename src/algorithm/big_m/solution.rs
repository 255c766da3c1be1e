//! # Reading a solution from the final tableau
//!
//! The values of the variables are read from the basis. Feasibility follows from the artificial
//! variables: any positive artificial variable is unmet minimum requirement. The real cost is
//! computed from the allocation itself; the Big-M penalty is kept apart as a diagnostic.
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::algorithm::big_m::Termination;
use crate::algorithm::big_m::standard_form::{Variable, VariableKind};
use crate::algorithm::big_m::tableau::Tableau;
use crate::algorithm::big_m::trace::{Snapshot, Step};
use crate::config::SolverConfig;
use crate::data::problem::Problem;

const NO_SITES_MESSAGE: &str = "No sites were given, nothing to allocate";

/// How a solve ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Every minimum requirement is met at minimum cost.
    Optimal,
    /// The stock doesn't cover all minimum requirements; the allocation leaves a shortfall.
    Infeasible,
    /// The objective can be decreased without limit. Can't happen for valid problems.
    Unbounded,
    /// The iteration limit was reached before the optimum.
    IterationLimit,
    /// There were no sites to allocate to.
    NoSites,
}

impl Status {
    /// Get a short string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Optimal => "optimal",
            Status::Infeasible => "infeasible",
            Status::Unbounded => "unbounded",
            Status::IterationLimit => "iteration_limit",
            Status::NoSites => "no_sites",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The amount allocated to a single site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    /// Identifier of the site.
    pub site_id: String,
    /// Name of the site.
    pub site_name: String,
    /// Amount the site needs at least.
    pub minimum_requirement: f64,
    /// Amount allocated.
    pub allocated: f64,
    /// Part of the minimum requirement that is not met.
    pub shortfall: f64,
    /// Cost per packet for this site.
    pub unit_cost: f64,
    /// Cost of the allocation, `allocated * unit_cost`.
    pub cost: f64,
}

/// Full outcome of a solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// How the solve ended.
    pub status: Status,
    /// Explanation of the outcome for the end user.
    pub message: String,
    /// Allocation per site, in the order of the problem.
    pub allocations: Vec<Allocation>,
    /// Sum of all allocations.
    pub total_allocated: f64,
    /// Real distribution cost of the allocation, without any penalty.
    pub total_cost: f64,
    /// Diagnostic only: the Big-M penalty `M * (A_1 + ... + A_n)` of the unmet requirements.
    ///
    /// Not a monetary value and never part of `total_cost`.
    pub penalty: f64,
    /// Whether all artificial variables are zero.
    pub is_feasible: bool,
    /// Value of every variable of the standard form, by name.
    pub variable_values: Vec<(String, f64)>,
    /// Tableau of every iteration.
    pub snapshots: Vec<Snapshot>,
}

impl Report {
    /// The explicit outcome of a problem without sites.
    pub fn no_sites() -> Self {
        Self {
            status: Status::NoSites,
            message: NO_SITES_MESSAGE.to_string(),
            allocations: Vec::new(),
            total_allocated: 0f64,
            total_cost: 0f64,
            penalty: 0f64,
            is_feasible: false,
            variable_values: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    /// Allocation of a site by identifier.
    pub fn allocation(&self, site_id: &str) -> Option<&Allocation> {
        self.allocations.iter().find(|allocation| allocation.site_id == site_id)
    }

    /// Sum of the unmet minimum requirements.
    pub fn total_shortfall(&self) -> f64 {
        self.allocations.iter().map(|allocation| allocation.shortfall).sum()
    }

    /// The last snapshot, describing how the search ended.
    pub fn final_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "{}", self.message)?;
        if self.allocations.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(
            f, "{:<16}{:>12}{:>12}{:>12}{:>14}{:>18}",
            "Site", "Minimum", "Allocated", "Shortfall", "Unit cost", "Cost",
        )?;
        for allocation in &self.allocations {
            writeln!(
                f, "{:<16}{:>12.2}{:>12.2}{:>12.2}{:>14.2}{:>18.2}",
                allocation.site_name,
                allocation.minimum_requirement,
                allocation.allocated,
                allocation.shortfall,
                allocation.unit_cost,
                allocation.cost,
            )?;
        }
        writeln!(f, "{:<16}{:>12}{:>12.2}{:>12.2}{:>14}{:>18.2}", "Total", "", self.total_allocated, self.total_shortfall(), "", self.total_cost)?;
        if self.penalty > 0f64 {
            writeln!(f, "Big-M penalty (diagnostic, not a cost): {:.2}", self.penalty)?;
        }

        Ok(())
    }
}

/// Read the report from a final tableau.
///
/// # Arguments
///
/// * `tableau`: Tableau after the last basis change.
/// * `problem`: Problem that the tableau was built from.
/// * `termination`: Why the simplex iterations stopped.
/// * `config`: Source of the penalty and tolerance.
/// * `snapshots`: The iteration trace, handed over to the report.
pub fn extract(
    tableau: &Tableau,
    problem: &Problem,
    termination: Termination,
    config: &SolverConfig,
    snapshots: Vec<Snapshot>,
) -> Report {
    let layout = tableau.layout();
    let values = tableau.current_bfs();
    let value = |kind, index| values[layout.column(Variable { kind, index })];

    let allocations = problem.sites().iter().enumerate()
        .map(|(i, site)| {
            let allocated = value(VariableKind::Decision, i);
            Allocation {
                site_id: site.id.clone(),
                site_name: site.name.clone(),
                minimum_requirement: site.minimum_requirement,
                allocated,
                shortfall: value(VariableKind::Artificial, i),
                unit_cost: site.unit_cost,
                cost: allocated * site.unit_cost,
            }
        })
        .collect::<Vec<_>>();

    let is_feasible = allocations.iter().all(|allocation| allocation.shortfall <= config.tolerance);
    let total_allocated = allocations.iter().map(|allocation| allocation.allocated).sum::<f64>();
    let total_cost = allocations.iter().map(|allocation| allocation.cost).sum::<f64>();
    let total_shortfall = allocations.iter().map(|allocation| allocation.shortfall).sum::<f64>();
    let penalty = config.big_m * total_shortfall;

    let status = match termination {
        Termination::Optimal if is_feasible => Status::Optimal,
        Termination::Optimal => Status::Infeasible,
        Termination::Unbounded => Status::Unbounded,
        Termination::IterationLimit => Status::IterationLimit,
    };

    let message = match status {
        Status::Optimal => {
            let dispatched = snapshots.last().and_then(|snapshot| match &snapshot.step {
                Step::Optimal { dispatch: Some(dispatch) } => Some(dispatch),
                _ => None,
            });
            match dispatched.and_then(|dispatch| dispatch.entering.site().map(|i| (dispatch, i))) {
                Some((dispatch, i)) => format!(
                    "Optimal solution found, every minimum requirement is met. The remaining stock of \
                    {:.2} is allocated to the cheapest site ({}). Total cost: {:.2}",
                    dispatch.quantity, problem.sites()[i].name, total_cost,
                ),
                None => format!(
                    "Optimal solution found, every minimum requirement is met. Total cost: {:.2}",
                    total_cost,
                ),
            }
        },
        Status::Infeasible => format!(
            "Not feasible: the stock of {:.2} is less than the total minimum requirement of {:.2}. \
            The stock is distributed completely, leaving a shortfall of {:.2}; the artificial \
            variables show the unmet requirement per site.",
            problem.total_capacity(), problem.total_minimum_requirement(), total_shortfall,
        ),
        Status::Unbounded => "The problem is unbounded, the objective decreases without limit".to_string(),
        Status::IterationLimit => format!(
            "No optimum was reached within {} iterations; the allocation shown is not final",
            config.max_iterations,
        ),
        Status::NoSites => NO_SITES_MESSAGE.to_string(),
    };

    let variable_values = layout.variables()
        .zip(values.iter())
        .map(|(variable, &value)| (variable.to_string(), value))
        .collect();

    Report {
        status,
        message,
        allocations,
        total_allocated,
        total_cost,
        penalty,
        is_feasible,
        variable_values,
        snapshots,
    }
}
