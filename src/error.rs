//! Error types for Asha.

use thiserror::Error;

/// Library-level error type for Asha operations.
#[derive(Error, Debug)]
pub enum AshaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source unavailable: {collection} data file not found at {path}")]
    SourceUnavailable { collection: String, path: String },

    #[error("Unknown source: {0}. Expected one of: jobs, sessions, mentorship")]
    UnknownSource(String),

    #[error("Malformed data file: {0}")]
    DataFormat(String),

    #[error("Record/descriptor alignment violated: {0}")]
    Alignment(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Asha operations.
pub type Result<T> = std::result::Result<T, AshaError>;
