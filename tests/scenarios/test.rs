use approx::{assert_abs_diff_eq, assert_relative_eq};

use relief::algorithm::big_m::solution::Status;
use relief::algorithm::big_m::solve;
use relief::algorithm::big_m::trace::Step;
use relief::algorithm::closed_form::allocate;
use relief::error::InputError;
use relief::io::error::ImportError;

use super::read;

#[test]
fn scenario_a() {
    let problem = read("scenario_a").unwrap();
    let report = solve(&problem);

    assert_eq!(report.status, Status::Infeasible);
    assert!(!report.is_feasible);
    assert_abs_diff_eq!(report.total_allocated, 1000f64);
    assert_abs_diff_eq!(report.total_shortfall(), 50f64);
    assert_relative_eq!(report.total_cost, 47_500_000f64);
    assert_relative_eq!(report.penalty, 50_000_000f64);
    assert_abs_diff_eq!(report.allocation("north").unwrap().shortfall, 50f64);

    let text = report.to_string();
    assert!(text.starts_with("Status: infeasible"));
    assert!(text.contains("North"));
}

#[test]
fn scenario_b() {
    let problem = read("scenario_b").unwrap();
    let report = solve(&problem);

    assert_eq!(report.status, Status::Optimal);
    assert!(report.is_feasible);
    assert_abs_diff_eq!(report.allocation("north").unwrap().allocated, 500f64);
    assert_abs_diff_eq!(report.allocation("central").unwrap().allocated, 350f64);
    assert_abs_diff_eq!(report.allocation("south").unwrap().allocated, 350f64);
    assert_relative_eq!(report.total_cost, 500f64 * 55_000f64 + 350f64 * 45_000f64 + 350f64 * 35_000f64);
    assert_eq!(report.penalty, 0f64);

    let closed_form = allocate(&problem, 1e6);
    assert_relative_eq!(report.total_cost, closed_form.total_cost);
}

#[test]
fn scenario_c() {
    let problem = read("scenario_c").unwrap();
    assert_eq!(problem.sites()[0].id, "1");

    let report = solve(&problem);
    assert_eq!(report.status, Status::Optimal);
    assert_abs_diff_eq!(report.allocations[0].allocated, 100f64);
    // Optimal after the first pivot
    assert!(report.snapshots.len() <= 2);
    assert!(report.snapshots.last().unwrap().is_optimal());
}

#[test]
fn trace_display() {
    let report = solve(&read("scenario_b").unwrap());

    let first = report.snapshots[0].to_string();
    assert!(first.contains("=== Iteration 0 ==="));
    assert!(first.contains("Initial tableau"));
    assert!(first.contains("x3 enters the basis, A3 leaves"));
    assert!(first.contains("-M"));

    let last = report.snapshots.last().unwrap();
    assert!(matches!(last.step, Step::Optimal { dispatch: Some(_) }));
    assert!(last.to_string().contains("s3 enters the basis, s_stock leaves"));
}

#[test]
fn empty() {
    let report = solve(&read("empty").unwrap());
    assert_eq!(report.status, Status::NoSites);
    assert!(report.snapshots.is_empty());
}

#[test]
fn invalid() {
    assert!(matches!(
        read("negative_cost"),
        Err(ImportError::Problem(InputError::UnitCost { .. })),
    ));
    assert!(matches!(read("does_not_exist"), Err(ImportError::IO(_))));
}
