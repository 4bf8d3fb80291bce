use crate::table::error::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Output file name '{file_name}' produced by rows {first_row} and {row}")]
    DuplicateFileName {
        file_name: String,
        first_row: usize,
        row: usize,
    },
}
