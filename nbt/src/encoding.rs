//! Encoding descriptors for the three wire variants.

/// Byte order for fixed-width fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

/// Selects one of the tag tree's wire variants.
///
/// In the varint ("network") variant, string lengths are unsigned varints
/// and Int/Long payloads plus all list and array counts are zig-zag
/// varints; Short, Float, and Double stay fixed-width in the selected
/// order. The fixed variants use u16 string lengths and i32 counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    /// Byte order of fixed-width fields.
    pub order: ByteOrder,
    /// Varint string lengths, counts, and Int/Long payloads.
    pub varint: bool,
}

impl Encoding {
    /// The classic big-endian disk format.
    #[must_use]
    pub const fn big_endian() -> Self {
        Self {
            order: ByteOrder::Big,
            varint: false,
        }
    }

    /// The persistent little-endian format item payloads are stored in.
    #[must_use]
    pub const fn little_endian() -> Self {
        Self {
            order: ByteOrder::Little,
            varint: false,
        }
    }

    /// The network format used inside packet bodies.
    #[must_use]
    pub const fn network() -> Self {
        Self {
            order: ByteOrder::Little,
            varint: true,
        }
    }
}
