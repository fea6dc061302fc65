//! Variable-width integers: 7-bit groups, least-significant group first,
//! high bit flags continuation. Signed forms are zig-zag mapped.

use crate::error::{StreamError, StreamResult};
use crate::stream::ByteStream;

/// Maximum encoded width of a 32-bit varint.
pub const MAX_VAR_U32_BYTES: usize = 5;

/// Maximum encoded width of a 64-bit varint.
pub const MAX_VAR_U64_BYTES: usize = 10;

impl ByteStream {
    /// Reads an unsigned 32-bit varint, rejecting encodings over 5 bytes.
    pub fn read_var_u32(&mut self) -> StreamResult<u32> {
        let mut value = 0u32;
        for shift in (0..35).step_by(7) {
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(StreamError::VarIntTooBig {
            max_bytes: MAX_VAR_U32_BYTES,
        })
    }

    /// Reads an unsigned 64-bit varint, rejecting encodings over 10 bytes.
    pub fn read_var_u64(&mut self) -> StreamResult<u64> {
        let mut value = 0u64;
        for shift in (0..70).step_by(7) {
            let byte = self.read_u8()?;
            value |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(StreamError::VarIntTooBig {
            max_bytes: MAX_VAR_U64_BYTES,
        })
    }

    /// Reads a zig-zag signed 32-bit varint.
    pub fn read_var_i32(&mut self) -> StreamResult<i32> {
        let value = self.read_var_u32()?;
        Ok(((value >> 1) as i32) ^ (-((value & 1) as i32)))
    }

    /// Reads a zig-zag signed 64-bit varint.
    pub fn read_var_i64(&mut self) -> StreamResult<i64> {
        let value = self.read_var_u64()?;
        Ok(((value >> 1) as i64) ^ (-((value & 1) as i64)))
    }

    /// Writes an unsigned 32-bit varint.
    pub fn write_var_u32(&mut self, mut value: u32) {
        loop {
            let byte = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                self.write_u8(byte);
                return;
            }
            self.write_u8(byte | 0x80);
        }
    }

    /// Writes an unsigned 64-bit varint.
    pub fn write_var_u64(&mut self, mut value: u64) {
        loop {
            let byte = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                self.write_u8(byte);
                return;
            }
            self.write_u8(byte | 0x80);
        }
    }

    /// Writes a zig-zag signed 32-bit varint.
    pub fn write_var_i32(&mut self, value: i32) {
        self.write_var_u32(((value << 1) ^ (value >> 31)) as u32);
    }

    /// Writes a zig-zag signed 64-bit varint.
    pub fn write_var_i64(&mut self, value: i64) {
        self.write_var_u64(((value << 1) ^ (value >> 63)) as u64);
    }

    /// Reads a varint-length-prefixed byte array.
    ///
    /// Like [`read`](Self::read), the payload is clamped to what remains.
    pub fn read_byte_array(&mut self) -> StreamResult<&[u8]> {
        let len = self.read_var_u32()? as usize;
        Ok(self.read(len))
    }

    /// Writes a varint-length-prefixed byte array.
    pub fn write_byte_array(&mut self, bytes: &[u8]) {
        self.write_var_u32(bytes.len() as u32);
        self.write(bytes);
    }

    /// Reads a varint-length-prefixed UTF-8 string.
    ///
    /// Invalid UTF-8 decodes lossily (replacement characters), matching the
    /// peer implementations this protocol talks to.
    pub fn read_string(&mut self) -> StreamResult<String> {
        let bytes = self.read_byte_array()?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Writes a varint-length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) {
        self.write_byte_array(value.as_bytes());
    }
}
