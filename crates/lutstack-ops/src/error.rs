//! Error types for batch operations.

use thiserror::Error;

/// Error type for batch operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Buffer length does not match the declared dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Channel count other than 3 (RGB) or 4 (RGBA).
    #[error("unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannels(usize),
}

/// Result type for batch operations.
pub type OpsResult<T> = Result<T, OpsError>;
