use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read table file '{0}'")]
    SourceRead(PathBuf, #[source] std::io::Error),

    #[error("Required column '{column}' not found in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Table file '{0}' has no header row")]
    EmptySource(PathBuf),

    // Also raised for numeric fields that cannot be parsed.
    #[error("Failed to parse CSV data from '{0}'")]
    CsvParse(PathBuf, #[source] PolarsError),

    #[error("Column '{column}' is not numeric")]
    NonNumericColumn {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("I/O error writing table file '{0}'")]
    OutputWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing table file '{0}'")]
    OutputWritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
