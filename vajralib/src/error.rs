//! Единый тип ошибок публичного API.

use thiserror::Error;

use crate::loan::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum VajraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation failed: {}", .0.summary())]
    Validation(ValidationErrors),

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("Invalid loan terms: {0}")]
    InvalidTerms(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Arithmetic overflow in {0}")]
    Arithmetic(&'static str),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, VajraError>;
