//! # Solver configuration
//!
//! All numerical constants of the Big-M method live here rather than in module level constants,
//! so that each solve can be run with its own penalty, tolerance and iteration limit.
use serde::{Deserialize, Serialize};

use crate::data::number_types::float::Precision;
use crate::error::ConfigError;

/// Settings for a single solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Penalty per unit of any artificial variable.
    ///
    /// Should be larger than any unit cost, or unmet minimum requirements become cheaper than
    /// meeting them.
    pub big_m: f64,
    /// Maximum number of pivots before the solve is reported as not converging.
    ///
    /// A problem takes about one pivot per site.
    pub max_iterations: usize,
    /// Magnitudes below this value are treated as zero.
    pub tolerance: f64,
    /// Magnitudes above this value are displayed as `M` in tableau snapshots.
    pub display_threshold: f64,
    /// Drive unused stock out of the stock slack into the cheapest site once all minimum
    /// requirements are met.
    pub dispatch_remaining_stock: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            big_m: 1e6,
            max_iterations: 1000,
            tolerance: 1e-4,
            display_threshold: 1e5,
            dispatch_remaining_stock: true,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a configuration from TOML. Missing keys take their default value.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the Big-M penalty.
    pub fn with_big_m(mut self, big_m: f64) -> Self {
        self.big_m = big_m;
        self
    }

    /// Set the maximum number of pivots.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the zero tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the magnitude above which values display as `M`.
    pub fn with_display_threshold(mut self, display_threshold: f64) -> Self {
        self.display_threshold = display_threshold;
        self
    }

    /// Enable or disable dispatching unused stock to the cheapest site.
    pub fn with_dispatch_remaining_stock(mut self, enabled: bool) -> Self {
        self.dispatch_remaining_stock = enabled;
        self
    }

    /// Check that the values can be used for a solve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.big_m.is_finite() && self.big_m > 0f64) {
            return Err(ConfigError::BigM(self.big_m));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0f64 && self.tolerance < self.big_m) {
            return Err(ConfigError::Tolerance(self.tolerance));
        }
        if !(self.display_threshold.is_finite() && self.display_threshold > 0f64) {
            return Err(ConfigError::DisplayThreshold(self.display_threshold));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::IterationLimit);
        }

        Ok(())
    }

    pub(crate) fn precision(&self) -> Precision {
        Precision {
            tolerance: self.tolerance,
            display_threshold: self.display_threshold,
        }
    }
}
