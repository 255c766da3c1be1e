//! # Algorithms
//!
//! Two independent ways of allocating the stock of a problem: the Big-M simplex method, which
//! records every iteration, and a closed-form allocation that exploits the structure of the
//! problem.
pub mod big_m;
pub mod closed_form;
