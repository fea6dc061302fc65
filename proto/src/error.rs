//! Error types for protocol codec operations.

use nbt::TagType;
use thiserror::Error;

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors raised while decoding a message.
///
/// A failed decode returns only the error; no partially built domain
/// object is observable to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// Byte cursor ran out of data or hit an overlong varint.
    #[error("byte stream: {0}")]
    Stream(#[from] bytestream::StreamError),

    /// Embedded nested-tag payload failed to parse.
    #[error("nested payload: {0}")]
    Nbt(#[from] nbt::NbtError),

    /// A wire-declared count exceeds its fixed ceiling.
    #[error("{kind} limit exceeded: {actual} > {limit}")]
    LimitExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A declared element count cannot be satisfied by the bytes left.
    #[error("declared length {declared} invalid with {available} bytes available")]
    InvalidLength { declared: i64, available: usize },

    /// Attribute name not present in the registry.
    #[error("unknown attribute type {name:?}")]
    UnknownAttribute { name: String },

    /// Runtime item id with no legacy mapping for this protocol.
    #[error("unknown runtime item id {id} for protocol {protocol}")]
    UnknownRuntimeId { id: i32, protocol: i32 },

    /// Envelope carried a message kind this codec does not know.
    #[error("unknown packet id 0x{id:02x}")]
    UnknownPacketId { id: u32 },

    /// Game rule value carried an unknown type tag.
    #[error("unknown game rule value type {tag}")]
    UnknownRuleType { tag: u32 },

    /// Legacy skin texture blob has no recognized dimensions.
    #[error("legacy skin image of {length} bytes has no known dimensions")]
    InvalidLegacyImage { length: usize },

    /// The durability entry of a stored item payload is not a number.
    #[error("damage entry in item payload is not numeric, found {found:?}")]
    DamageNotNumeric { found: TagType },

    /// Ingredient count outside what a single stack can hold.
    #[error("ingredient count {declared} outside 0..=255")]
    CountOutOfRange { declared: i32 },
}

/// Specific ceiling that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LimitKind {
    EmotePieces,
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::EmotePieces => "emote piece ids",
        };
        write!(f, "{name}")
    }
}

/// Errors raised while encoding a message.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// Legacy item id with no runtime mapping for this protocol.
    #[error("no runtime mapping for legacy item id {id} on protocol {protocol}")]
    UnknownLegacyId { id: i32, protocol: i32 },

    /// Stored payload does not fit the legacy u16 length prefix.
    #[error("item payload of {length} bytes does not fit the legacy length prefix")]
    PayloadTooLarge { length: usize },

    /// Stored nested-tag payload failed to parse or re-emit.
    #[error("nested payload: {0}")]
    Nbt(#[from] nbt::NbtError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display_limit() {
        let err = DecodeError::LimitExceeded {
            kind: LimitKind::EmotePieces,
            limit: 1000,
            actual: 1001,
        };
        let msg = err.to_string();
        assert!(msg.contains("1001"), "should mention actual");
        assert!(msg.contains("1000"), "should mention limit");
        assert!(msg.contains("emote"), "should name the ceiling");
    }

    #[test]
    fn decode_error_display_unknown_attribute() {
        let err = DecodeError::UnknownAttribute {
            name: "minecraft:bogus".to_owned(),
        };
        assert!(err.to_string().contains("minecraft:bogus"));
    }

    #[test]
    fn decode_error_display_unknown_packet() {
        let err = DecodeError::UnknownPacketId { id: 0x3e7 };
        assert!(err.to_string().contains("0x3e7"));
    }

    #[test]
    fn decode_error_from_stream_error() {
        let inner = bytestream::StreamError::UnexpectedEof {
            requested: 4,
            available: 1,
        };
        let err: DecodeError = inner.into();
        assert!(matches!(err, DecodeError::Stream(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn decode_error_from_nbt_error() {
        let inner = nbt::NbtError::UnknownTagType { id: 13 };
        let err: DecodeError = inner.into();
        assert!(matches!(err, DecodeError::Nbt(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn encode_error_display() {
        let err = EncodeError::UnknownLegacyId {
            id: 513,
            protocol: 419,
        };
        let msg = err.to_string();
        assert!(msg.contains("513"));
        assert!(msg.contains("419"));
    }

    #[test]
    fn source_none_for_flat_variants() {
        let err = DecodeError::UnknownRuleType { tag: 9 };
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn errors_are_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<DecodeError>();
        assert_error::<EncodeError>();
    }
}
