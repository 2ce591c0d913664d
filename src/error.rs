use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV decoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("could not extract file ID from URL: {0}")]
    InvalidSheetUrl(String),

    #[error("sheet is not public (403 Forbidden)")]
    SheetNotPublic,

    #[error("sheet not found (404 Not Found)")]
    SheetNotFound,

    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("sheet is empty")]
    EmptySheet,
}

pub type Result<T> = std::result::Result<T, ServiceError>;
