//! Common error types for newsdesk

use thiserror::Error;

/// Common result type for newsdesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across newsdesk crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config file could not be parsed
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
