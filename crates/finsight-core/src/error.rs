//! Error types for FinSight

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Budget model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid budget model: {0}")]
    InvalidModel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
