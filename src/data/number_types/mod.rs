//! # Number types
//!
//! The tableau is computed in floating point arithmetic. This module holds the policy for
//! comparing against zero and for displaying values of the order of the Big-M penalty.
pub mod float;
