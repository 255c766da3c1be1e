//! # Relief allocation problems
//!
//! A number of demand sites each need at least a minimum amount of relief packets, and every packet
//! delivered to a site has a cost. The total amount of packets that can be distributed is limited.
use std::collections::HashSet;

use serde::Serialize;

use crate::error::InputError;

/// A location that relief packets are delivered to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Site {
    /// Unique identifier of the site within a problem.
    pub id: String,
    /// Name for display.
    pub name: String,
    /// Amount of packets the site needs at least.
    pub minimum_requirement: f64,
    /// Cost of delivering a single packet to this site.
    pub unit_cost: f64,
}

impl Site {
    /// Create a new site. Values are checked when the site becomes part of a `Problem`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        minimum_requirement: f64,
        unit_cost: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            minimum_requirement,
            unit_cost,
        }
    }
}

/// An allocation problem with validated data.
///
/// Can only be created through `Problem::new`, so all numbers are finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    sites: Vec<Site>,
    total_capacity: f64,
}

impl Problem {
    /// Create a new problem.
    ///
    /// # Arguments
    ///
    /// * `sites`: Demand sites in the order in which they appear in the tableau. May be empty.
    /// * `total_capacity`: Amount of packets available for distribution.
    ///
    /// # Return value
    ///
    /// The problem, or an `InputError` describing the first invalid value.
    pub fn new(sites: Vec<Site>, total_capacity: f64) -> Result<Self, InputError> {
        let valid = |value: f64| value.is_finite() && value >= 0f64;

        if !valid(total_capacity) {
            return Err(InputError::Capacity(total_capacity));
        }

        let mut ids = HashSet::with_capacity(sites.len());
        for site in &sites {
            if !valid(site.minimum_requirement) {
                return Err(InputError::MinimumRequirement {
                    site: site.id.clone(),
                    value: site.minimum_requirement,
                });
            }
            if !valid(site.unit_cost) {
                return Err(InputError::UnitCost { site: site.id.clone(), value: site.unit_cost });
            }
            if !ids.insert(site.id.as_str()) {
                return Err(InputError::DuplicateId(site.id.clone()));
            }
        }

        Ok(Self { sites, total_capacity })
    }

    /// All demand sites.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Number of demand sites.
    pub fn nr_sites(&self) -> usize {
        self.sites.len()
    }

    /// Amount of packets available.
    pub fn total_capacity(&self) -> f64 {
        self.total_capacity
    }

    /// Sum of the minimum requirements of all sites.
    pub fn total_minimum_requirement(&self) -> f64 {
        self.sites.iter().map(|site| site.minimum_requirement).sum()
    }

    /// Whether the stock suffices to meet every minimum requirement.
    pub fn is_capacity_sufficient(&self) -> bool {
        self.total_capacity >= self.total_minimum_requirement()
    }

    /// Highest cost per packet over all sites, zero if there are no sites.
    pub fn max_unit_cost(&self) -> f64 {
        self.sites.iter().map(|site| site.unit_cost).fold(0f64, f64::max)
    }
}
