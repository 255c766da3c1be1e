//! # Integration tests
//!
//! Integration tests completely external from the crate. All code written in this module could be
//! written by an external user of the crate.
//!
//! ## Note
//!
//! The exhaustive sweep in `conformance` is only ran when the `exhaustive` feature is enabled, as
//! it takes a long time to run in debug builds.
mod conformance;
mod scenarios;
