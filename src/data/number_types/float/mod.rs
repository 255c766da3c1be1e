//! # Floating point numbers
//!
//! The tableau is computed with `f64`. Rounding errors accumulate while pivoting, so every
//! comparison against zero goes through an absolute tolerance, and values that are indistinguishable
//! from zero are snapped to exactly zero.
//!
//! Coefficients involving the Big-M penalty are many orders of magnitude larger than anything
//! else in the tableau. For display, they are saturated to a symbolic `M`.
use std::fmt::Display;

use num_traits::Float;
use serde::Serialize;

/// Tolerances used while computing with and displaying a tableau.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Precision {
    /// Magnitudes below this value are treated as zero.
    pub tolerance: f64,
    /// Magnitudes above this value are displayed as `M` or `-M`.
    pub display_threshold: f64,
}

/// Replace a value by exactly zero if its magnitude is below the tolerance.
pub fn snap_to_zero<F: Float>(value: F, tolerance: F) -> F {
    debug_assert!(tolerance >= F::zero());

    if value.abs() < tolerance {
        F::zero()
    } else {
        value
    }
}

/// Whether a value is negative beyond rounding noise.
pub fn is_negative<F: Float>(value: F, tolerance: F) -> bool {
    value < -tolerance
}

/// Whether a value is positive beyond rounding noise.
pub fn is_positive<F: Float>(value: F, tolerance: F) -> bool {
    value > tolerance
}

/// A value as it should be shown to a reader of the tableau.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Displayed<F> {
    /// Effectively zero.
    Zero,
    /// Of the order of the Big-M penalty; `true` when positive.
    BigM(bool),
    /// Any other value.
    Value(F),
}

impl<F: Float> Displayed<F> {
    /// Classify a value for display.
    ///
    /// # Arguments
    ///
    /// * `value`: Tableau coefficient.
    /// * `tolerance`: Magnitudes below this are shown as zero.
    /// * `threshold`: Magnitudes above this are shown as `M`.
    pub fn classify(value: F, tolerance: F, threshold: F) -> Self {
        if value.abs() < tolerance {
            Displayed::Zero
        } else if value.abs() > threshold {
            Displayed::BigM(value > F::zero())
        } else {
            Displayed::Value(value)
        }
    }
}

impl<F: Display> Display for Displayed<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Displayed::Zero => f.pad("0"),
            Displayed::BigM(true) => f.pad("M"),
            Displayed::BigM(false) => f.pad("-M"),
            Displayed::Value(value) => f.pad(&format!("{:.2}", value)),
        }
    }
}

impl Precision {
    /// Format a tableau coefficient, using the symbolic `M` for huge values.
    pub fn display(&self, value: f64) -> Displayed<f64> {
        Displayed::classify(value, self.tolerance, self.display_threshold)
    }
}

#[cfg(test)]
mod test {
    use crate::data::number_types::float::{Displayed, Precision, is_negative, is_positive, snap_to_zero};

    #[test]
    fn snap() {
        assert_eq!(snap_to_zero(1e-9f64, 1e-4), 0f64);
        assert_eq!(snap_to_zero(-1e-5f64, 1e-4), 0f64);
        assert_eq!(snap_to_zero(0.5f64, 1e-4), 0.5f64);
        assert_eq!(snap_to_zero(-1e6f64, 1e-4), -1e6f64);
    }

    #[test]
    fn signs() {
        assert!(is_negative(-1f64, 1e-4));
        assert!(!is_negative(-1e-6f64, 1e-4));
        assert!(is_positive(1e-3f64, 1e-4));
        assert!(!is_positive(1e-5f64, 1e-4));
    }

    #[test]
    fn display() {
        let precision = Precision { tolerance: 1e-4, display_threshold: 1e5 };
        assert_eq!(precision.display(3e-5), Displayed::Zero);
        assert_eq!(precision.display(-945_000f64), Displayed::BigM(false));
        assert_eq!(precision.display(1e6), Displayed::BigM(true));
        assert_eq!(precision.display(55_000f64), Displayed::Value(55_000f64));

        assert_eq!(precision.display(-945_000f64).to_string(), "-M");
        assert_eq!(precision.display(1.5).to_string(), "1.50");
        assert_eq!(format!("{:>5}", precision.display(0f64)), "    0");
    }
}
