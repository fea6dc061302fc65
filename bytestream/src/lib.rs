//! Byte-level cursor primitives for the bedwire codec.
//!
//! This crate provides [`ByteStream`], a cursor over an owned growable byte
//! buffer, plus the primitive encodings every higher codec is built from:
//! fixed-width integers and floats in both byte orders, 3-byte triads,
//! booleans, varints with zig-zag signed forms, length-prefixed strings and
//! byte arrays, and 16-byte unique identifiers.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked; reads that the
//!   wire format defines as clamping clamp, everything else errors.
//! - **No domain knowledge** - This crate knows nothing about items, skins,
//!   or protocol versions.
//! - **Byte-exact** - Encodings reproduce the reference wire layout bit for
//!   bit; peers are existing game clients.
//!
//! # Example
//!
//! ```
//! use bytestream::ByteStream;
//!
//! let mut stream = ByteStream::new();
//! stream.write_var_u32(300);
//! stream.write_string("hello");
//! stream.write_u16_le(0xBEEF);
//!
//! let mut stream = ByteStream::from_vec(stream.into_vec());
//! assert_eq!(stream.read_var_u32().unwrap(), 300);
//! assert_eq!(stream.read_string().unwrap(), "hello");
//! assert_eq!(stream.read_u16_le().unwrap(), 0xBEEF);
//! ```

mod error;
mod stream;
mod varint;

pub use error::{StreamError, StreamResult};
pub use stream::ByteStream;
pub use varint::{MAX_VAR_U32_BYTES, MAX_VAR_U64_BYTES};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = ByteStream::new();
        let _: StreamResult<()> = Ok(());
        assert_eq!(MAX_VAR_U32_BYTES, 5);
        assert_eq!(MAX_VAR_U64_BYTES, 10);
    }

    #[test]
    fn doctest_example() {
        let mut stream = ByteStream::new();
        stream.write_var_u32(300);
        stream.write_string("hello");
        stream.write_u16_le(0xBEEF);

        let mut stream = ByteStream::from_vec(stream.into_vec());
        assert_eq!(stream.read_var_u32().unwrap(), 300);
        assert_eq!(stream.read_string().unwrap(), "hello");
        assert_eq!(stream.read_u16_le().unwrap(), 0xBEEF);
    }

    #[test]
    fn mixed_message_roundtrip() {
        let mut stream = ByteStream::new();
        stream.write_bool(true);
        stream.write_var_i64(-9001);
        stream.write_u24_le(0xABCDE);
        stream.write_f32_le(19.5);
        stream.write_byte_array(&[7, 7, 7]);

        let mut stream = ByteStream::from_vec(stream.into_vec());
        assert!(stream.read_bool().unwrap());
        assert_eq!(stream.read_var_i64().unwrap(), -9001);
        assert_eq!(stream.read_u24_le().unwrap(), 0xABCDE);
        assert_eq!(stream.read_f32_le().unwrap(), 19.5);
        assert_eq!(stream.read_byte_array().unwrap(), &[7, 7, 7]);
        assert!(!stream.has_remaining());
    }
}
