use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrosscheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Required sheet '{sheet}' not found in {file}")]
    MissingRequiredSheet { sheet: String, file: String },

    #[error("Incomplete input: no usable {0} records")]
    IncompleteInput(&'static str),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, CrosscheckError>;
