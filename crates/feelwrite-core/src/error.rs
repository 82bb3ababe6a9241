//! Error types for Feel-Write

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The text-generation service could not produce a reply
    #[error("Generation service unavailable: {0}")]
    Generation(String),
}

impl Error {
    /// Whether this error came from the storage layer
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Pool(_) | Self::Encryption(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
