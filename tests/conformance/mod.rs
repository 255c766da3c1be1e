//! # Conformance
//!
//! Randomly generated problems, solved with both the simplex method and the closed-form
//! allocation. The generator is seeded, so every run sees the same problems.
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use relief::data::problem::{Problem, Site};

/// # Properties of the solutions
mod test;

/// Generate problems with integral requirements, costs and capacity.
///
/// Unit costs stay well below the default penalty. The capacity ranges from nothing to twice the
/// total minimum requirement, so both feasible and infeasible problems occur.
///
/// # Arguments
///
/// * `seed`: Seed of the random number generator.
/// * `count`: Number of problems.
/// * `max_sites`: Largest number of sites in a problem, at least one.
fn generate(seed: u64, count: usize, max_sites: usize) -> Vec<Problem> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let nr_sites = rng.gen_range(1..=max_sites);
            let sites = (0..nr_sites)
                .map(|i| Site::new(
                    format!("site-{}", i + 1),
                    format!("Site {}", i + 1),
                    rng.gen_range(0..=1000) as f64,
                    rng.gen_range(1..=60) as f64 * 1000f64,
                ))
                .collect::<Vec<_>>();
            let total_minimum_requirement = sites.iter().map(|site| site.minimum_requirement).sum::<f64>();
            let total_capacity = rng.gen_range(0..=2 * total_minimum_requirement as u64) as f64;

            Problem::new(sites, total_capacity).unwrap()
        })
        .collect()
}
