//! Error types for the lab assistant.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Dataset {file} is not a JSON array of objects")]
    NotAnArray { file: String },
}

pub type Result<T> = std::result::Result<T, LabError>;
