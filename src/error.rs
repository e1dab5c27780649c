//! Error type shared by every coding operation.

use std::io;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CompressionError>;

/// Errors produced while encoding or decoding.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// Reading the source or writing the destination failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input cannot be represented in the encoded format.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The encoded buffer is shorter than the fixed header.
    #[error("truncated header: expected {expected} bytes, found {actual}")]
    TruncatedHeader {
        /// Bytes required by the header layout.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// The header parsed but its fields disagree with each other.
    #[error("corrupt header: {0}")]
    CorruptHeader(String),

    /// Decoding failed after the header was accepted.
    #[error("decompression failed: {0}")]
    DecompressionFailed(String),
}
