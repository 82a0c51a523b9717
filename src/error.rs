use polars::prelude::PolarsError;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Result alias used across the crate.
pub type DashboardResult<T> = Result<T, DashboardError>;

/**
Errors raised while loading, cleaning or filtering the crime table.

Malformed individual cells are not errors: they degrade to null during
cleaning. Everything listed here is fatal for the operation that raised it.
*/
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // Lazy plan failures and CSV structure errors surface here.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("File not found: {0:#?}")]
    FileNotFound(PathBuf),

    /// A required column (`ano` or `mes`) is absent from the source file.
    #[error("Required column '{0}' is missing from the source table")]
    MissingColumn(String),

    /// The selection named a metric the cleaned table does not have.
    #[error("Unknown metric column: '{0}'")]
    UnknownMetric(String),

    #[error("Invalid CSV delimiter: '{0}'")]
    InvalidDelimiter(String),
}
