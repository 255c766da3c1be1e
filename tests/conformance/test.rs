use approx::{assert_abs_diff_eq, assert_relative_eq};

use relief::algorithm::big_m::solution::{Report, Status};
use relief::algorithm::big_m::solve;
use relief::algorithm::big_m::trace::Step;
use relief::algorithm::closed_form::allocate;
use relief::data::problem::Problem;

use super::generate;

fn check(problem: &Problem) {
    let report = solve(problem);
    check_trace(&report);

    if problem.is_capacity_sufficient() {
        assert_eq!(report.status, Status::Optimal, "{:?}", problem);
        assert!(report.is_feasible);
        for allocation in &report.allocations {
            assert!(allocation.allocated >= allocation.minimum_requirement - 1e-6, "{:?}", problem);
            assert_abs_diff_eq!(allocation.shortfall, 0f64);
        }
        assert_abs_diff_eq!(report.total_allocated, problem.total_capacity(), epsilon = 1e-6);
        assert_eq!(report.penalty, 0f64);

        let closed_form = allocate(problem, 1e6);
        assert!(closed_form.is_feasible);
        assert_relative_eq!(report.total_cost, closed_form.total_cost, epsilon = 1e-3, max_relative = 1e-9);
    } else {
        assert_eq!(report.status, Status::Infeasible, "{:?}", problem);
        assert!(!report.is_feasible);
        assert_abs_diff_eq!(report.total_allocated, problem.total_capacity(), epsilon = 1e-6);
        assert_abs_diff_eq!(
            report.total_shortfall(),
            problem.total_minimum_requirement() - problem.total_capacity(),
            epsilon = 1e-6,
        );

        let closed_form = allocate(problem, 1e6);
        assert!(!closed_form.is_feasible);
        assert_abs_diff_eq!(closed_form.total_allocated, problem.total_capacity(), epsilon = 1e-6);
    }
}

fn check_trace(report: &Report) {
    let (last, others) = report.snapshots.split_last().unwrap();
    for snapshot in others {
        assert!(snapshot.has_negative_relative_cost());
    }
    match last.step {
        Step::Optimal { .. } => assert!(!last.has_negative_relative_cost()),
        ref step => panic!("expected an optimum, got {:?}", step),
    }
}

#[test]
fn small() {
    for problem in generate(0x5eed, 300, 4) {
        check(&problem);
    }
}

#[test]
fn medium() {
    for problem in generate(0xfeed, 100, 12) {
        check(&problem);
    }
}

#[test]
fn idempotent() {
    for problem in generate(7, 20, 6) {
        assert_eq!(solve(&problem), solve(&problem));
        assert_eq!(allocate(&problem, 1e6), allocate(&problem, 1e6));
    }
}

#[test]
fn exact_capacity() {
    for problem in generate(11, 50, 8) {
        let exact = Problem::new(problem.sites().to_vec(), problem.total_minimum_requirement()).unwrap();
        let report = solve(&exact);
        assert_eq!(report.status, Status::Optimal);
        for allocation in &report.allocations {
            assert_abs_diff_eq!(allocation.allocated, allocation.minimum_requirement, epsilon = 1e-6);
        }
    }
}

#[test]
#[cfg(feature = "exhaustive")]
fn exhaustive() {
    for seed in 0..20 {
        for problem in generate(seed, 1000, 40) {
            check(&problem);
        }
    }
}
