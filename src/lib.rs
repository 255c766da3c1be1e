//! # Allocating relief supplies with the Big-M method
//!
//! A limited stock of relief packets is distributed over a number of demand sites, each with a
//! minimum requirement and a cost per packet. The allocation of minimal cost is computed with the
//! primal simplex method on a dense tableau, where artificial variables penalized by a large
//! constant `M` provide the initial basis. Every iteration of the method is recorded, so that the
//! course of the computation can be shown step by step.
//!
//! A closed-form allocator computes the same allocations directly, for cross-checking.
#![warn(missing_docs)]

pub mod algorithm;
pub mod config;
pub mod data;
pub mod error;
pub mod io;

#[cfg(test)]
mod tests;
