//! Error types for the command line front end.

use std::path::PathBuf;

use thiserror::Error;
use wxg_codegen::CodegenError;

/// Errors reported by `wxg-to-go`.
#[derive(Error, Debug)]
pub enum CliError {
    /// The input document does not exist.
    #[error("Input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    /// No output file was given for a conversion.
    #[error("No output file given; pass --out")]
    MissingOutput,

    /// The output exists and `--force` was not given.
    #[error("Output file '{}' already exists; pass --force to replace it", .0.display())]
    OutputExists(PathBuf),

    /// Conversion failed.
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    /// Resolved units could not be serialized.
    #[error("Cannot serialize units: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map codegen's late overwrite check to the same error as the early one.
    pub fn normalize(self) -> Self {
        match self {
            CliError::Codegen(CodegenError::OutputExists(path)) => CliError::OutputExists(path),
            other => other,
        }
    }
}
