//! # Closed-form allocation
//!
//! The allocation problem has so much structure that the optimum can be written down directly,
//! without any pivoting. When the stock suffices, every site receives its minimum requirement and
//! all remaining stock goes to the cheapest site. When it doesn't, the stock is shared in
//! proportion to the minimum requirements, in whole packets where possible.
//!
//! This is independent of the simplex method, which makes it useful for cross-checking.
use itertools::Itertools;
use serde::Serialize;

use crate::algorithm::big_m::solution::Allocation;
use crate::data::problem::{Problem, Site};

/// Result of the closed-form allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedFormReport {
    /// Allocation per site, in the order of the problem.
    pub allocations: Vec<Allocation>,
    /// Sum of all allocations.
    pub total_allocated: f64,
    /// Real distribution cost of the allocation.
    pub total_cost: f64,
    /// Diagnostic only: `M` times the total shortfall.
    pub penalty: f64,
    /// Whether every minimum requirement is met.
    pub is_feasible: bool,
}

/// Allocate the stock of a problem without the simplex method.
///
/// # Arguments
///
/// * `problem`: Sites and stock.
/// * `big_m`: Penalty per unit of shortfall, only used for the `penalty` diagnostic.
///
/// # Return value
///
/// The allocation. Without sites, an empty, infeasible report.
pub fn allocate(problem: &Problem, big_m: f64) -> ClosedFormReport {
    let sites = problem.sites();
    if sites.is_empty() {
        return ClosedFormReport {
            allocations: Vec::new(),
            total_allocated: 0f64,
            total_cost: 0f64,
            penalty: 0f64,
            is_feasible: false,
        };
    }

    let is_feasible = problem.is_capacity_sufficient();
    let amounts = if is_feasible {
        with_remainder_to_cheapest(sites, problem.total_capacity())
    } else {
        proportional(sites, problem.total_capacity(), problem.total_minimum_requirement())
    };

    let allocations = sites.iter().zip(amounts)
        .map(|(site, allocated)| Allocation {
            site_id: site.id.clone(),
            site_name: site.name.clone(),
            minimum_requirement: site.minimum_requirement,
            allocated,
            shortfall: (site.minimum_requirement - allocated).max(0f64),
            unit_cost: site.unit_cost,
            cost: allocated * site.unit_cost,
        })
        .collect::<Vec<_>>();

    let total_shortfall = allocations.iter().map(|allocation| allocation.shortfall).sum::<f64>();
    ClosedFormReport {
        total_allocated: allocations.iter().map(|allocation| allocation.allocated).sum(),
        total_cost: allocations.iter().map(|allocation| allocation.cost).sum(),
        penalty: big_m * total_shortfall,
        is_feasible,
        allocations,
    }
}

/// Minimum requirements, plus everything that is left to the cheapest site.
///
/// Ties go to the site that comes first.
fn with_remainder_to_cheapest(sites: &[Site], capacity: f64) -> Vec<f64> {
    let mut amounts = sites.iter().map(|site| site.minimum_requirement).collect::<Vec<_>>();
    let remainder = capacity - amounts.iter().sum::<f64>();

    if remainder > 0f64 {
        if let Some(cheapest) = sites.iter()
            .position_min_by(|left, right| left.unit_cost.total_cmp(&right.unit_cost)) {
            amounts[cheapest] += remainder;
        }
    }

    amounts
}

/// Shares in proportion to the minimum requirement, rounded with the largest remainder method.
///
/// Each site first gets the floor of its share. The packets left over are handed out one at a
/// time, by decreasing fractional part of the share (ties to the site that comes first), without
/// exceeding any minimum requirement. What remains below a single packet goes to the first site in
/// that order that still needs it, so that exactly the capacity is allocated.
fn proportional(sites: &[Site], capacity: f64, total_minimum_requirement: f64) -> Vec<f64> {
    debug_assert!(total_minimum_requirement > capacity);

    let shares = sites.iter()
        .map(|site| capacity * site.minimum_requirement / total_minimum_requirement)
        .collect::<Vec<_>>();
    let mut amounts = shares.iter().map(|share| share.floor()).collect::<Vec<_>>();

    let order = shares.iter()
        .map(|share| share - share.floor())
        .enumerate()
        .sorted_by(|(_, left), (_, right)| right.total_cmp(left))
        .map(|(i, _)| i)
        .collect::<Vec<_>>();

    // At most a single packet per site first, then whatever is still needed
    let mut left_over = (capacity - amounts.iter().sum::<f64>()).max(0f64);
    for step in [1f64, f64::INFINITY] {
        for &i in &order {
            let need = (sites[i].minimum_requirement - amounts[i]).max(0f64);
            let amount = step.min(need).min(left_over);
            amounts[i] += amount;
            left_over -= amount;
        }
    }

    amounts
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::algorithm::closed_form::allocate;
    use crate::data::problem::{Problem, Site};
    use crate::tests::scenarios::{scenario_a, scenario_b, scenario_c};

    fn allocated(problem: &Problem) -> Vec<f64> {
        allocate(problem, 1e6).allocations.iter().map(|allocation| allocation.allocated).collect()
    }

    #[test]
    fn remainder_to_cheapest() {
        let report = allocate(&scenario_b(), 1e6);
        assert!(report.is_feasible);
        assert_eq!(allocated(&scenario_b()), vec![500f64, 350f64, 350f64]);
        assert_eq!(report.total_cost, 55_500_000f64);
        assert_eq!(report.penalty, 0f64);
    }

    #[test]
    fn proportional_with_largest_remainder() {
        let report = allocate(&scenario_a(), 1e6);
        assert!(!report.is_feasible);
        // Shares are 476.19, 333.33 and 190.48; the single packet left goes to the largest fraction
        assert_eq!(allocated(&scenario_a()), vec![476f64, 333f64, 191f64]);
        assert_eq!(report.total_allocated, 1000f64);
        assert_eq!(report.total_cost, 47_850_000f64);
        assert_eq!(report.allocations[0].shortfall, 24f64);
        assert_eq!(report.penalty, 50f64 * 1e6);
    }

    #[test]
    fn exact_stock() {
        let report = allocate(&scenario_c(), 1e6);
        assert!(report.is_feasible);
        assert_eq!(report.total_allocated, 100f64);
        assert_eq!(report.total_cost, 5_000_000f64);
    }

    #[test]
    fn tie_goes_to_first_site() {
        let problem = Problem::new(vec![
            Site::new("a", "A", 1f64, 3f64),
            Site::new("b", "B", 1f64, 2f64),
            Site::new("c", "C", 1f64, 2f64),
        ], 10f64).unwrap();
        assert_eq!(allocated(&problem), vec![1f64, 8f64, 1f64]);

        let problem = Problem::new(vec![
            Site::new("a", "A", 1f64, 1f64),
            Site::new("b", "B", 1f64, 1f64),
            Site::new("c", "C", 1f64, 1f64),
        ], 2f64).unwrap();
        // All shares are 2 / 3
        assert_eq!(allocated(&problem), vec![1f64, 1f64, 0f64]);
    }

    #[test]
    fn fractional_capacity() {
        let problem = Problem::new(vec![
            Site::new("a", "A", 10f64, 1f64),
            Site::new("b", "B", 10f64, 1f64),
        ], 5.5f64).unwrap();
        let report = allocate(&problem, 1e6);
        assert_abs_diff_eq!(report.total_allocated, 5.5f64);
        assert_eq!(allocated(&problem), vec![3f64, 2.5f64]);
        assert_abs_diff_eq!(report.total_allocated + report.allocations.iter().map(|a| a.shortfall).sum::<f64>(), 20f64);
    }

    #[test]
    fn never_above_minimum_when_short() {
        // Shares are 3.78 and 4.72: the first site needs a single packet, the rest goes to the second
        let problem = Problem::new(vec![
            Site::new("a", "A", 4f64, 1f64),
            Site::new("b", "B", 5f64, 1f64),
        ], 8.5f64).unwrap();
        let report = allocate(&problem, 1e6);

        assert_eq!(allocated(&problem), vec![4f64, 4.5f64]);
        for allocation in &report.allocations {
            assert!(allocation.allocated <= allocation.minimum_requirement);
        }
        assert_abs_diff_eq!(report.total_allocated, 8.5f64);
        assert_abs_diff_eq!(
            report.allocations.iter().map(|a| a.shortfall).sum::<f64>(),
            problem.total_minimum_requirement() - problem.total_capacity(),
        );
    }

    #[test]
    fn no_sites() {
        let report = allocate(&Problem::new(vec![], 3f64).unwrap(), 1e6);
        assert!(!report.is_feasible);
        assert!(report.allocations.is_empty());
        assert_eq!(report.total_cost, 0f64);
    }

    #[test]
    fn no_requirements() {
        let problem = Problem::new(vec![Site::new("a", "A", 0f64, 4f64)], 0f64).unwrap();
        let report = allocate(&problem, 1e6);
        assert!(report.is_feasible);
        assert_eq!(report.total_allocated, 0f64);
    }
}
