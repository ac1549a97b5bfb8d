//! Error types for hemoscan-core.

use thiserror::Error;

/// Result type alias for hemoscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for hemoscan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input raster is unusable: zero dimensions or channel/buffer mismatch.
    /// Raised before any stage of the pipeline runs on the image.
    #[error("invalid input raster: {0}")]
    InvalidInput(String),

    /// Configuration rejected at load time, before any image is processed.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Convenience constructor for input validation failures.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Convenience constructor for configuration failures.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigError(reason.into())
    }
}
