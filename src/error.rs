use thiserror::Error;

/// One or more required columns are absent from the loaded sheet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing columns: {}", .missing.join(", "))]
pub struct SchemaValidationError {
    /// Missing column names, in required order.
    pub missing: Vec<String>,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        /// Line in the source sheet, the header being line 1.
        row: usize,
        column: String,
        value: String,
    },

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// The schema error, when that is what stopped the load.
    pub fn schema(&self) -> Option<&SchemaValidationError> {
        match self {
            LoadError::Schema(err) => Some(err),
            _ => None,
        }
    }
}
