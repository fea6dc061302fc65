//! Error types for byte stream operations.

use thiserror::Error;

/// Result type for byte stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur while reading from a [`ByteStream`](crate::ByteStream).
///
/// Writes never fail; the buffer grows on demand and capacity exhaustion
/// aborts the process like any other allocation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StreamError {
    /// Attempted to read past the end of the buffer.
    #[error("unexpected end of stream: requested {requested} bytes, {available} available")]
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A variable-width integer ran past its maximum encoded width.
    ///
    /// Overlong encodings are rejected rather than silently accepted so a
    /// peer cannot smuggle the same value under multiple byte sequences.
    #[error("variable-width integer wider than {max_bytes} bytes")]
    VarIntTooBig {
        /// Maximum encoded width for the requested integer type.
        max_bytes: usize,
    },
}
