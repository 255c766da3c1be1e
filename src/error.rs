//! # Errors
//!
//! Only malformed input is rejected with an error. Expected outcomes of a solve (infeasible,
//! unbounded, reaching the iteration limit) are reported through the
//! [`Status`](crate::algorithm::big_m::solution::Status) of a report instead.
use thiserror::Error;

/// A problem description that can't be turned into a linear program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The stock available for distribution is negative or not a number.
    #[error("total capacity must be a finite, non-negative number, got {0}")]
    Capacity(f64),
    /// A site requires a negative amount, or not a number.
    #[error("site \"{site}\": minimum requirement must be a finite, non-negative number, got {value}")]
    MinimumRequirement {
        /// Identifier of the offending site.
        site: String,
        /// The rejected value.
        value: f64,
    },
    /// A site has a negative per-unit cost, or not a number.
    #[error("site \"{site}\": unit cost must be a finite, non-negative number, got {value}")]
    UnitCost {
        /// Identifier of the offending site.
        site: String,
        /// The rejected value.
        value: f64,
    },
    /// Two sites share an identifier, so allocations can't be attributed.
    #[error("site identifier \"{0}\" is used more than once")]
    DuplicateId(String),
}

/// Solver settings that can't be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The Big-M penalty should be a positive number.
    #[error("big M must be a finite, positive number, got {0}")]
    BigM(f64),
    /// The tolerance should be positive and much smaller than the penalty.
    #[error("tolerance must be a finite, positive number smaller than big M, got {0}")]
    Tolerance(f64),
    /// The display threshold should be a positive number.
    #[error("display threshold must be a finite, positive number, got {0}")]
    DisplayThreshold(f64),
    /// At least one pivot should be allowed.
    #[error("the iteration limit must be at least one")]
    IterationLimit,
    /// The configuration file could not be read as TOML.
    #[error("could not parse solver configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
