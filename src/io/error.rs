//! # Errors while reading problem files
use std::io;

use thiserror::Error;

use crate::error::InputError;

/// An `ImportError` is created when a problem file can't be read, parsed or validated.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file isn't found, or reading it couldn't start or was interrupted.
    #[error("could not read problem file: {0}")]
    IO(#[from] io::Error),
    /// Contents of the file are not a syntactically correct problem description.
    #[error("could not parse problem file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The file describes a problem with invalid values.
    ///
    /// For example, a site might have a negative minimum requirement.
    #[error("invalid problem: {0}")]
    Problem(#[from] InputError),
}
