use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("File type not allowed: {0}")]
    FileTypeNotAllowed(String),

    #[error("file is not valid UTF-8 text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("spreadsheet read failed: {0}")]
    Spreadsheet(String),

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),
}
