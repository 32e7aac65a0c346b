//! Error types shared by the loaders and the pipeline.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Source file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("No spending files found in {}", dir.display())]
    NoData { dir: PathBuf },
    #[error("Column '{column}' not found in {}", path.display())]
    MissingColumn { column: &'static str, path: PathBuf },
    #[error("Year header cell at row {row}, column {column} is not a year: {value}")]
    MalformedYearHeader {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("Workbook has no worksheet: {}", path.display())]
    EmptyWorkbook { path: PathBuf },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl DataError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
