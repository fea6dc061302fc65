//! Error types for tag tree operations.

use bytestream::StreamError;
use thiserror::Error;

use crate::tag::TagType;

/// Result type for tag tree operations.
pub type NbtResult<T> = Result<T, NbtError>;

/// Errors that can occur while reading or writing a tag tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NbtError {
    /// The underlying byte stream ran out.
    #[error("byte stream: {0}")]
    Stream(#[from] StreamError),

    /// A tag id byte outside the known set.
    #[error("unknown tag type {id}")]
    UnknownTagType {
        /// The raw tag id.
        id: u8,
    },

    /// A stored payload whose root tag is not a compound.
    #[error("root tag must be a compound, found {found:?}")]
    RootNotCompound {
        /// The tag type actually found at the root.
        found: TagType,
    },

    /// An end tag where a value was required (list element, root).
    #[error("end tag is only valid as a compound terminator")]
    UnexpectedEndTag,

    /// The tree nests deeper than the recursion ceiling.
    #[error("tag tree deeper than {limit} levels")]
    DepthLimitExceeded {
        /// The recursion ceiling.
        limit: usize,
    },

    /// A declared element count or byte length that is negative or larger
    /// than the bytes remaining in the stream. Raised before any
    /// proportional allocation.
    #[error("declared length {declared} invalid with {available} bytes available")]
    InvalidLength {
        /// The length the wire declared.
        declared: i64,
        /// Bytes remaining in the stream at the point of the check.
        available: usize,
    },

    /// A value too large for the wire format's length field.
    #[error("length {length} does not fit the wire format")]
    LengthOverflow {
        /// The length of the offending value.
        length: usize,
    },

    /// List elements of differing tag types.
    #[error("list elements must share one tag type, found {found:?} after {expected:?}")]
    MixedList {
        /// The element type established by the first entry.
        expected: TagType,
        /// The offending element's type.
        found: TagType,
    },
}
