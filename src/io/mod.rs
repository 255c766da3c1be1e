//! # Reading problem files
//!
//! Problems are described in TOML:
//!
//! ```toml
//! total_capacity = 1200
//!
//! [[sites]]
//! id = "north"
//! name = "North"
//! minimum_requirement = 500
//! unit_cost = 55000
//! ```
//!
//! The `id` of a site is optional and defaults to its 1-based position in the file; the `name`
//! defaults to the `id`.
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::data::problem::{Problem, Site};
use crate::io::error::ImportError;

pub mod error;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProblemFile {
    total_capacity: f64,
    #[serde(default)]
    sites: Vec<SiteEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SiteEntry {
    id: Option<String>,
    name: Option<String>,
    minimum_requirement: f64,
    unit_cost: f64,
}

/// Import a problem from a file.
///
/// # Errors
///
/// When the file can't be read, isn't valid TOML of the expected shape, or describes a problem with
/// invalid values.
pub fn import(file_path: &Path) -> Result<Problem, ImportError> {
    let text = fs::read_to_string(file_path)?;
    parse(&text)
}

/// Parse a problem from the contents of a problem file.
pub fn parse(text: &str) -> Result<Problem, ImportError> {
    let file: ProblemFile = toml::from_str(text)?;

    let sites = file.sites.into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let id = entry.id.unwrap_or_else(|| (i + 1).to_string());
            let name = entry.name.unwrap_or_else(|| id.clone());
            Site::new(id, name, entry.minimum_requirement, entry.unit_cost)
        })
        .collect();

    Ok(Problem::new(sites, file.total_capacity)?)
}
