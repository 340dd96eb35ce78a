use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "xlsx")]
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[cfg(feature = "xlsx")]
    #[error("{0} days do not fit in one sheet (16384 columns max)")]
    TooManyColumns(usize),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Input is not valid {0} text")]
    Decode(&'static str),

    #[error("Delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),

    #[error("The {role} column ({index}) cannot also be the date column")]
    ColumnConflict { role: &'static str, index: usize },

    /// The amount field of a dated row is not an integer. Usually the amount
    /// column setting does not match the file.
    #[error(
        "Amount {value:?} on {} (row {row}) is not an integer; check the amount column setting",
        .date.format("%Y/%m/%d")
    )]
    MalformedAmount {
        date: NaiveDate,
        row: usize,
        value: String,
    },

    #[error(
        "Row {row} on {} has {field_count} fields besides the date, no {role} field at index {index}; check the {role} column setting",
        .date.format("%Y/%m/%d")
    )]
    ColumnOutOfRange {
        role: &'static str,
        index: usize,
        date: NaiveDate,
        row: usize,
        field_count: usize,
    },

    #[error("Refusing to overwrite the input file {0}; pass --output")]
    OutputIsInput(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
