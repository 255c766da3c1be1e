//! # Scenarios
//!
//! Small problem files of which the outcome is known exactly.
use std::path::{Path, PathBuf};

use relief::data::problem::Problem;
use relief::io::error::ImportError;
use relief::io::import;

/// # Solving the problem files
mod test;

/// Relative path of the folder where the problem files are stored.
///
/// The path is relative to the project root folder.
fn problem_file_directory() -> PathBuf {
    Path::new(file!()).parent().unwrap().join("problem_files")
}

/// Compute the path of the problem file, based on the problem name.
///
/// # Arguments
///
/// * `name`: Problem name without extension.
///
/// # Return value
///
/// File path relative to the project root folder.
fn get_test_file_path(name: &str) -> PathBuf {
    problem_file_directory().join(name).with_extension("toml")
}

fn read(name: &str) -> Result<Problem, ImportError> {
    import(&get_test_file_path(name))
}
