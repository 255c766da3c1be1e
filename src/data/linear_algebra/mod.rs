//! # Linear algebra primitives
//!
//! A dense matrix of fixed shape, allocated once per solve.
pub mod matrix;
