use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(String),

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Row {row}: required column '{field}' is not in the sheet")]
    MissingField { row: usize, field: String },

    #[error("Row {row}: column '{field}' has no value")]
    MissingValue { row: usize, field: String },

    #[error("Row {row}: column '{field}' is not a number: '{value}'")]
    MalformedNumber {
        row: usize,
        field: String,
        value: String,
    },

    #[error("Row {row}: column '{field}' is not a date: '{value}'")]
    MalformedDate {
        row: usize,
        field: String,
        value: String,
    },

    #[error("Row {row}: unknown learning form '{token}'")]
    UnknownLearningForm { row: usize, token: String },

    #[error("Task columns do not line up: {0}")]
    TaskBlockMisaligned(String),
}

impl EngineError {
    /// Source line of the offending row, for row-level errors.
    pub fn row(&self) -> Option<usize> {
        match self {
            EngineError::MissingField { row, .. }
            | EngineError::MissingValue { row, .. }
            | EngineError::MalformedNumber { row, .. }
            | EngineError::MalformedDate { row, .. }
            | EngineError::UnknownLearningForm { row, .. } => Some(*row),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
