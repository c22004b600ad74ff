//! Error types for layer stacks.

use thiserror::Error;

/// Result type for layer stack operations.
pub type ColorResult<T> = Result<T, ColorError>;

/// Layer stack error.
///
/// Out-of-range opacity and color values are not errors; they are clamped
/// where they are used.
#[derive(Debug, Error)]
pub enum ColorError {
    /// The stack already holds its maximum number of layers.
    #[error("layer stack is full ({max} layers)")]
    TooManyLayers {
        /// Layer limit.
        max: usize,
    },
}
