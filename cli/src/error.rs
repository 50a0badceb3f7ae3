use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum DataError {
    #[error("source table has no data rows")]
    EmptyTable,

    #[error("source table has no company columns after the date column")]
    MissingCompanyColumns,

    #[error("row {row}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: duplicate date '{value}'")]
    DuplicateDate { row: usize, value: String },

    #[error("row {row}, company '{company}': invalid price '{value}'")]
    InvalidPrice {
        row: usize,
        company: String,
        value: String,
    },

    #[error("company '{company}': {have} points available, {need} required")]
    InsufficientHistory {
        company: String,
        have: usize,
        need: usize,
    },

    #[error("unknown company: {0}")]
    UnknownCompany(String),

    #[error("recommendation window has no forecasted prices")]
    EmptyForecast,

    #[error("invalid forecast configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
