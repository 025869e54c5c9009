//! Error types for Plaza

use thiserror::Error;

/// Core error type for Plaza operations
#[derive(Error, Debug)]
pub enum PlazaError {
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Grid error: {0}")]
    Grid(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("SQL error: {0}")]
    Sql(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Plaza operations
pub type Result<T> = std::result::Result<T, PlazaError>;
