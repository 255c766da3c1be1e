//! # Iteration trace
//!
//! Every iteration of the simplex method is recorded as a `Snapshot`: a deep copy of the tableau
//! before the step is taken, together with a description of the step. Snapshots are independent of
//! the live tableau, so pivots after recording don't change them.
use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use serde::Serialize;

use crate::algorithm::big_m::standard_form::{Layout, Variable, VariableKind};
use crate::algorithm::big_m::tableau::{Ratio, Tableau, write_table};
use crate::data::linear_algebra::matrix::Dense;
use crate::data::number_types::float::{Precision, is_negative};

/// A basis change of the primal simplex method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pivot {
    /// Variable entering the basis.
    pub entering: Variable,
    /// Variable leaving the basis.
    pub leaving: Variable,
    /// Row index of the pivot.
    pub row: usize,
    /// Column index of the pivot.
    pub column: usize,
    /// Value of the pivot element, before normalization.
    pub element: f64,
    /// Outcome of the ratio test, for every constraint row.
    pub ratios: Vec<Ratio>,
}

/// Unused stock moved into the cheapest site after the optimum was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dispatch {
    /// Variable taking over the stock, the surplus of the receiving site.
    pub entering: Variable,
    /// The stock slack.
    pub leaving: Variable,
    /// Row index of the pivot, the row of the stock slack.
    pub row: usize,
    /// Column index of the pivot.
    pub column: usize,
    /// Value of the pivot element, before normalization.
    pub element: f64,
    /// Amount of stock moved.
    pub quantity: f64,
    /// Tableau values after the basis change, with rounding noise removed.
    pub tableau: Dense<f64>,
    /// For each constraint row, its basic variable after the basis change.
    pub basis: Vec<Variable>,
}

/// What happens to the tableau of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// A pivot will be performed.
    Pivot(Pivot),
    /// No negative relative cost is left; the search is done.
    ///
    /// Unused stock may still be dispatched with a final basis change.
    Optimal {
        /// Basis change moving unused stock into the cheapest site, if any.
        dispatch: Option<Dispatch>,
    },
    /// A column with negative relative cost has no positive entry.
    Unbounded {
        /// The column that can be increased without limit.
        entering: Variable,
        /// Column index of that variable.
        column: usize,
    },
    /// The maximum number of pivots was reached before an optimum was found.
    IterationLimit {
        /// The maximum number of pivots.
        limit: usize,
    },
}

/// Immutable copy of the state of the simplex method at one iteration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Iteration number, `0` is the initial tableau.
    pub iteration: usize,
    /// Tableau values with rounding noise removed, objective row and right hand side last.
    pub tableau: Dense<f64>,
    /// For each constraint row, its basic variable.
    pub basis: Vec<Variable>,
    /// Value of the penalized objective function, including the Big-M terms.
    pub objective_value: f64,
    /// The step taken from this tableau.
    pub step: Step,
    /// Narrative of the step, for display.
    pub description: String,
    #[serde(skip)]
    layout: Layout,
    #[serde(skip)]
    precision: Precision,
}

impl Snapshot {
    /// Copy the state of a tableau.
    pub fn record(iteration: usize, tableau: &Tableau, step: Step) -> Self {
        let description = describe(iteration, tableau, &step);

        Self {
            iteration,
            tableau: tableau.matrix().clone(),
            basis: tableau.basic_variables(),
            objective_value: tableau.objective_function_value(),
            step,
            description,
            layout: tableau.layout().clone(),
            precision: tableau.precision(),
        }
    }

    /// Whether this is the final tableau of a search that reached the optimum.
    pub fn is_optimal(&self) -> bool {
        matches!(self.step, Step::Optimal { .. })
    }

    /// Relative costs of all variables, the objective row without the right hand side.
    pub fn objective_row(&self) -> &[f64] {
        &self.tableau.row(self.layout.objective_row())[..self.layout.nr_columns()]
    }

    /// Whether the objective row has a coefficient that is negative beyond the tolerance.
    pub fn has_negative_relative_cost(&self) -> bool {
        self.objective_row().iter().any(|&cost| is_negative(cost, self.precision.tolerance))
    }

    /// Variables that are not in the basis, in column order.
    pub fn non_basic_variables(&self) -> Vec<Variable> {
        self.layout.variables().filter(|variable| !self.basis.contains(variable)).collect()
    }
}

fn describe(iteration: usize, tableau: &Tableau, step: &Step) -> String {
    let introduction = if iteration == 0 {
        let artificials = tableau.basic_variables().iter()
            .filter(|variable| variable.kind == VariableKind::Artificial)
            .join(", ");
        format!("Initial tableau: artificial variables {} start in the basis with penalty M. ", artificials)
    } else {
        format!("Iteration {}: ", iteration)
    };

    let step = match step {
        Step::Pivot(pivot) => format!(
            "{} enters the basis, {} leaves. Pivot element = {:.2}",
            pivot.entering, pivot.leaving, pivot.element,
        ),
        Step::Optimal { dispatch: None } => {
            "optimal, no negative coefficient left in the objective row".to_string()
        },
        Step::Optimal { dispatch: Some(dispatch) } => format!(
            "optimal, no negative coefficient left in the objective row. \
            Remaining stock of {:.2} is dispatched: {} enters the basis, {} leaves",
            dispatch.quantity, dispatch.entering, dispatch.leaving,
        ),
        Step::Unbounded { entering, .. } => format!(
            "unbounded, the column of {} has no positive entry",
            entering,
        ),
        Step::IterationLimit { limit } => format!(
            "stopped, the limit of {} pivots was reached before the optimum",
            limit,
        ),
    };

    introduction + &step
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Iteration {} ===", self.iteration)?;
        writeln!(f, "{}", self.description)?;
        write_table(f, &self.tableau, &self.layout, &self.basis, &self.precision)?;
        if let Step::Pivot(pivot) = &self.step {
            writeln!(f, "Ratios: {}", pivot.ratios.iter().join(", "))?;
        }
        writeln!(f, "Z = {:.2}", self.objective_value)?;
        if let Step::Optimal { dispatch: Some(dispatch) } = &self.step {
            writeln!(f, "After dispatch:")?;
            write_table(f, &dispatch.tableau, &self.layout, &dispatch.basis, &self.precision)?;
        }

        Ok(())
    }
}

/// Collects snapshots in iteration order.
#[derive(Debug, Default)]
pub struct Trace {
    snapshots: Vec<Snapshot>,
}

impl Trace {
    /// Record the current state of a tableau; the iteration number is the number of snapshots
    /// recorded before.
    pub fn record(&mut self, tableau: &Tableau, step: Step) -> &Snapshot {
        let snapshot = Snapshot::record(self.snapshots.len(), tableau, step);
        self.snapshots.push(snapshot);
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Hand over all snapshots.
    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::big_m::standard_form::{Variable, VariableKind, build};
    use crate::algorithm::big_m::tableau::Ratio;
    use crate::algorithm::big_m::trace::{Pivot, Step, Trace};
    use crate::config::SolverConfig;
    use crate::tests::scenarios::scenario_c;

    fn first_pivot() -> Pivot {
        Pivot {
            entering: Variable { kind: VariableKind::Decision, index: 0 },
            leaving: Variable { kind: VariableKind::Artificial, index: 0 },
            row: 0,
            column: 0,
            element: 1f64,
            ratios: vec![Ratio::Value(100f64), Ratio::Value(100f64)],
        }
    }

    #[test]
    fn snapshots_are_independent_of_the_tableau() {
        let mut tableau = build(&scenario_c(), &SolverConfig::default());
        let mut trace = Trace::default();
        let before = trace.record(&tableau, Step::Pivot(first_pivot())).clone();

        tableau.bring_into_basis(0, 0);
        trace.record(&tableau, Step::Optimal { dispatch: None });

        let snapshots = trace.into_snapshots();
        assert_eq!(snapshots[0], before);
        assert_eq!(snapshots[0].basis[0].to_string(), "A1");
        assert_eq!(snapshots[1].basis[0].to_string(), "x1");
        assert_ne!(snapshots[0].tableau, snapshots[1].tableau);
        assert_eq!(snapshots[0].iteration, 0);
        assert_eq!(snapshots[1].iteration, 1);
    }

    #[test]
    fn optimality() {
        let mut tableau = build(&scenario_c(), &SolverConfig::default());
        let mut trace = Trace::default();
        let initial = trace.record(&tableau, Step::Pivot(first_pivot()));
        assert!(!initial.is_optimal());
        assert!(initial.has_negative_relative_cost());

        tableau.bring_into_basis(0, 0);
        let last = trace.record(&tableau, Step::Optimal { dispatch: None });
        assert!(last.is_optimal());
        assert!(!last.has_negative_relative_cost());
        assert_eq!(last.objective_row(), &[0f64, 50_000f64, 950_000f64, 0f64]);
        assert_eq!(
            last.non_basic_variables().iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["s1", "A1"],
        );
    }

    #[test]
    fn description_and_display() {
        let tableau = build(&scenario_c(), &SolverConfig::default());
        let mut trace = Trace::default();
        let snapshot = trace.record(&tableau, Step::Pivot(first_pivot()));

        assert!(snapshot.description.starts_with("Initial tableau"));
        assert!(snapshot.description.contains("x1 enters the basis, A1 leaves"));

        let text = snapshot.to_string();
        assert!(text.contains("=== Iteration 0 ==="));
        assert!(text.contains("Ratios: 100.00, 100.00"));
    }

    #[test]
    fn serialize() {
        let tableau = build(&scenario_c(), &SolverConfig::default());
        let mut trace = Trace::default();
        let snapshot = trace.record(&tableau, Step::IterationLimit { limit: 3 });

        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(json["step"]["kind"], "iteration_limit");
        assert_eq!(json["step"]["limit"], 3);
        assert_eq!(json["basis"][1]["kind"], "slack");
        assert_eq!(json["tableau"][0][2], 1f64);
    }
}
