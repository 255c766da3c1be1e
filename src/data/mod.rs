//! # Storing of allocation problems in memory
//!
//! This module provides the problem description and the numerical primitives used to represent
//! it as a linear program. Algorithms may introduce their specific data structures in
//! `algorithm::my_algorithm`.
pub mod linear_algebra;
pub mod number_types;
pub mod problem;
