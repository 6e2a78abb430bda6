//! Error types for weight resolution.

use std::path::PathBuf;

use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to read runtime log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "runtime log '{log}' does not contain sufficient data to sort {tests} test files, please update or remove it"
    )]
    LogTooSmall { log: String, tests: usize },

    #[error("invalid tag pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("allowed missing percent must be between 0 and 100, got {0}")]
    InvalidPercent(f64),
}
