//! Common error types for MusikkMeta

use thiserror::Error;

/// Common result type for MusikkMeta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the catalog layer
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote service answered with a non-success status
    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Remote payload could not be decoded
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Remote payload decoded but held no usable track rows
    #[error("Catalog payload contained no tracks")]
    EmptyCatalog,

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
