use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeeLedgerError {
    #[error("Config directory not found at {0}. Run 'feeledger init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Failed to fetch {endpoint}: {message}")]
    Fetch { endpoint: String, message: String },

    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read records from {path}: {message}")]
    InputFile { path: PathBuf, message: String },

    #[error("Record '{record}' is missing numeric field '{field}'")]
    MissingField { record: String, field: String },

    #[error("Payment '{0}' not found")]
    PaymentNotFound(String),

    #[error("Invalid standard '{0}'. Expected a class between 1 and 10.")]
    InvalidStandard(String),

    #[error("Invalid export format '{0}'. Use 'csv' or 'pdf'.")]
    InvalidExportFormat(String),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeeLedgerError>;
