//! # Problems shared by the unit tests of several modules
//!
//! Each scenario is a small problem of which the complete course of the simplex method is known.
