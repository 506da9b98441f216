//! OKPets error type.

use thiserror::Error;

/// Errors surfaced by the OKPets crates.
#[derive(Error, Debug)]
pub enum OkpetsError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, OkpetsError>;
