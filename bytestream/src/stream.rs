//! The byte cursor: one growable buffer, one read offset.

use uuid::Uuid;

use crate::error::{StreamError, StreamResult};

/// A cursor over an owned byte buffer.
///
/// Reads consume from a monotonically advancing offset; writes append to the
/// end and never disturb bytes already written. The same instance can decode
/// an inbound message or accumulate an outbound one, but it is meant to be
/// driven to completion and discarded per message; call [`reset`](Self::reset)
/// before reusing it for anything else.
///
/// All read operations are bounds-checked and return errors (or clamp, where
/// the wire format demands clamping) on malformed input. The cursor never
/// panics on any input byte sequence.
#[derive(Debug, Default, Clone)]
pub struct ByteStream {
    buf: Vec<u8>,
    offset: usize,
}

impl ByteStream {
    /// Creates an empty stream for writing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            offset: 0,
        }
    }

    /// Creates an empty stream with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            offset: 0,
        }
    }

    /// Wraps an existing buffer for reading, starting at offset zero.
    #[must_use]
    pub const fn from_vec(buf: Vec<u8>) -> Self {
        Self { buf, offset: 0 }
    }

    /// Wraps a copy of `data` for reading.
    #[must_use]
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            buf: data.to_vec(),
            offset: 0,
        }
    }

    /// Wraps an existing buffer for reading, starting at `offset`.
    #[must_use]
    pub const fn with_offset(buf: Vec<u8>, offset: usize) -> Self {
        Self { buf, offset }
    }

    /// Clears the buffer and rewinds the offset.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.offset = 0;
    }

    /// Returns the current read offset.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the read offset.
    ///
    /// Offsets past the end are permitted; subsequent reads simply see an
    /// exhausted stream.
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Returns the number of bytes written to the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.offset)
    }

    /// Returns `true` if the offset is still within the buffer.
    #[must_use]
    pub fn has_remaining(&self) -> bool {
        self.offset < self.buf.len()
    }

    /// Returns every byte written so far, regardless of the read offset.
    #[must_use]
    pub fn snapshot(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the stream and returns its buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    /// Reads up to `n` bytes, clamped to what remains.
    ///
    /// The protocol's length-prefixed blobs tolerate short reads, so this
    /// never errors; callers that need exact counts use the typed readers.
    pub fn read(&mut self, n: usize) -> &[u8] {
        let start = self.offset.min(self.buf.len());
        let end = start + n.min(self.buf.len() - start);
        self.offset = end;
        &self.buf[start..end]
    }

    /// Reads `len` bytes where the count came off the wire as a signed value.
    ///
    /// A negative length parks the offset on the last byte and yields
    /// nothing; the stream then reads as exhausted. Wire peers emit this
    /// shape, so it stays a defined no-op rather than an error.
    pub fn read_signed(&mut self, len: i64) -> &[u8] {
        if len < 0 {
            self.offset = self.buf.len().saturating_sub(1);
            return &[];
        }
        self.read(len as usize)
    }

    /// Reads every remaining byte.
    pub fn read_rest(&mut self) -> &[u8] {
        self.read(self.remaining())
    }

    /// Appends bytes to the buffer.
    pub fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> StreamResult<u8> {
        let [byte] = self.read_array()?;
        Ok(byte)
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Reads a boolean byte: `0x01` is true, anything else is false.
    pub fn read_bool(&mut self) -> StreamResult<bool> {
        Ok(self.read_u8()? == 0x01)
    }

    /// Writes a boolean as `0x00`/`0x01`.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16(&mut self) -> StreamResult<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16_le(&mut self) -> StreamResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Writes a big-endian `u16`.
    pub fn write_u16(&mut self, value: u16) {
        self.write(&value.to_be_bytes());
    }

    /// Writes a little-endian `u16`.
    pub fn write_u16_le(&mut self, value: u16) {
        self.write(&value.to_le_bytes());
    }

    /// Reads a big-endian 3-byte unsigned integer.
    pub fn read_u24(&mut self) -> StreamResult<u32> {
        let b = self.read_array::<3>()?;
        Ok(u32::from(b[0]) << 16 | u32::from(b[1]) << 8 | u32::from(b[2]))
    }

    /// Reads a little-endian 3-byte unsigned integer.
    pub fn read_u24_le(&mut self) -> StreamResult<u32> {
        let b = self.read_array::<3>()?;
        Ok(u32::from(b[2]) << 16 | u32::from(b[1]) << 8 | u32::from(b[0]))
    }

    /// Writes the low 24 bits of `value`, big-endian.
    pub fn write_u24(&mut self, value: u32) {
        self.write(&[(value >> 16) as u8, (value >> 8) as u8, value as u8]);
    }

    /// Writes the low 24 bits of `value`, little-endian.
    pub fn write_u24_le(&mut self, value: u32) {
        self.write(&[value as u8, (value >> 8) as u8, (value >> 16) as u8]);
    }

    /// Reads a big-endian `i32`.
    pub fn read_i32(&mut self) -> StreamResult<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    /// Reads a little-endian `i32`.
    pub fn read_i32_le(&mut self) -> StreamResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Writes a big-endian `i32`.
    pub fn write_i32(&mut self, value: i32) {
        self.write(&value.to_be_bytes());
    }

    /// Writes a little-endian `i32`.
    pub fn write_i32_le(&mut self, value: i32) {
        self.write(&value.to_le_bytes());
    }

    /// Reads a big-endian `i64`.
    pub fn read_i64(&mut self) -> StreamResult<i64> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    /// Reads a little-endian `i64`.
    pub fn read_i64_le(&mut self) -> StreamResult<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Writes a big-endian `i64`.
    pub fn write_i64(&mut self, value: i64) {
        self.write(&value.to_be_bytes());
    }

    /// Writes a little-endian `i64`.
    pub fn write_i64_le(&mut self, value: i64) {
        self.write(&value.to_le_bytes());
    }

    /// Reads a big-endian `u64`.
    pub fn read_u64(&mut self) -> StreamResult<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64_le(&mut self) -> StreamResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Writes a big-endian `u64`.
    pub fn write_u64(&mut self, value: u64) {
        self.write(&value.to_be_bytes());
    }

    /// Writes a little-endian `u64`.
    pub fn write_u64_le(&mut self, value: u64) {
        self.write(&value.to_le_bytes());
    }

    /// Reads a big-endian `f32`.
    pub fn read_f32(&mut self) -> StreamResult<f32> {
        Ok(f32::from_be_bytes(self.read_array()?))
    }

    /// Reads a little-endian `f32`.
    pub fn read_f32_le(&mut self) -> StreamResult<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Writes a big-endian `f32`.
    pub fn write_f32(&mut self, value: f32) {
        self.write(&value.to_be_bytes());
    }

    /// Writes a little-endian `f32`.
    pub fn write_f32_le(&mut self, value: f32) {
        self.write(&value.to_le_bytes());
    }

    /// Reads a big-endian `f64`.
    pub fn read_f64(&mut self) -> StreamResult<f64> {
        Ok(f64::from_be_bytes(self.read_array()?))
    }

    /// Reads a little-endian `f64`.
    pub fn read_f64_le(&mut self) -> StreamResult<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Writes a big-endian `f64`.
    pub fn write_f64(&mut self, value: f64) {
        self.write(&value.to_be_bytes());
    }

    /// Writes a little-endian `f64`.
    pub fn write_f64_le(&mut self, value: f64) {
        self.write(&value.to_le_bytes());
    }

    /// Reads a UUID transmitted as two little-endian `u64` halves,
    /// most-significant half first.
    pub fn read_uuid(&mut self) -> StreamResult<Uuid> {
        let high = self.read_u64_le()?;
        let low = self.read_u64_le()?;
        Ok(Uuid::from_u64_pair(high, low))
    }

    /// Writes a UUID as two little-endian `u64` halves.
    pub fn write_uuid(&mut self, uuid: Uuid) {
        let (high, low) = uuid.as_u64_pair();
        self.write_u64_le(high);
        self.write_u64_le(low);
    }

    fn read_array<const N: usize>(&mut self) -> StreamResult<[u8; N]> {
        let available = self.remaining();
        if N > available {
            return Err(StreamError::UnexpectedEof {
                requested: N,
                available,
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.offset..self.offset + N]);
        self.offset += N;
        Ok(out)
    }
}

impl From<Vec<u8>> for ByteStream {
    fn from(buf: Vec<u8>) -> Self {
        Self::from_vec(buf)
    }
}

impl From<ByteStream> for Vec<u8> {
    fn from(stream: ByteStream) -> Self {
        stream.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stream() {
        let stream = ByteStream::new();
        assert!(stream.is_empty());
        assert_eq!(stream.remaining(), 0);
        assert!(!stream.has_remaining());
        assert_eq!(stream.offset(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut stream = ByteStream::new();
        let result = stream.read_u8();
        assert!(matches!(
            result,
            Err(StreamError::UnexpectedEof {
                requested: 1,
                available: 0
            })
        ));
    }

    #[test]
    fn read_clamps_to_available() {
        let mut stream = ByteStream::from_slice(&[1, 2, 3]);
        assert_eq!(stream.read(5), &[1, 2, 3]);
        assert_eq!(stream.remaining(), 0);
        assert_eq!(stream.read(5), &[] as &[u8]);
    }

    #[test]
    fn read_advances_offset() {
        let mut stream = ByteStream::from_slice(&[1, 2, 3, 4]);
        assert_eq!(stream.read(2), &[1, 2]);
        assert_eq!(stream.offset(), 2);
        assert_eq!(stream.read(2), &[3, 4]);
        assert!(!stream.has_remaining());
    }

    #[test]
    fn read_signed_negative_parks_offset() {
        let mut stream = ByteStream::from_slice(&[1, 2, 3, 4]);
        assert_eq!(stream.read_signed(-1), &[] as &[u8]);
        assert_eq!(stream.offset(), 3);
        assert!(stream.has_remaining());
        assert_eq!(stream.read_rest(), &[4]);
    }

    #[test]
    fn read_signed_negative_on_empty_buffer() {
        let mut stream = ByteStream::new();
        assert_eq!(stream.read_signed(-5), &[] as &[u8]);
        assert_eq!(stream.offset(), 0);
        assert!(!stream.has_remaining());
    }

    #[test]
    fn read_signed_positive_behaves_like_read() {
        let mut stream = ByteStream::from_slice(&[9, 8, 7]);
        assert_eq!(stream.read_signed(2), &[9, 8]);
        assert_eq!(stream.remaining(), 1);
    }

    #[test]
    fn offset_past_end_reads_nothing() {
        let mut stream = ByteStream::from_slice(&[1, 2]);
        stream.set_offset(10);
        assert_eq!(stream.remaining(), 0);
        assert_eq!(stream.read(4), &[] as &[u8]);
        assert!(matches!(
            stream.read_u8(),
            Err(StreamError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn write_appends_without_truncating() {
        let mut stream = ByteStream::new();
        stream.write(&[1, 2]);
        stream.write(&[3]);
        assert_eq!(stream.snapshot(), &[1, 2, 3]);
        assert_eq!(stream.read(1), &[1]);
        stream.write(&[4]);
        assert_eq!(stream.snapshot(), &[1, 2, 3, 4]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut stream = ByteStream::from_slice(&[1, 2, 3]);
        let _ = stream.read(2);
        stream.reset();
        assert!(stream.is_empty());
        assert_eq!(stream.offset(), 0);
    }

    #[test]
    fn with_offset_starts_mid_buffer() {
        let mut stream = ByteStream::with_offset(vec![1, 2, 3, 4], 2);
        assert_eq!(stream.read_rest(), &[3, 4]);
    }

    #[test]
    fn bool_decode_strict_on_one() {
        let mut stream = ByteStream::from_slice(&[0x01, 0x00, 0x02]);
        assert!(stream.read_bool().unwrap());
        assert!(!stream.read_bool().unwrap());
        assert!(!stream.read_bool().unwrap());
    }

    #[test]
    fn bool_encodes_as_zero_or_one() {
        let mut stream = ByteStream::new();
        stream.write_bool(true);
        stream.write_bool(false);
        assert_eq!(stream.snapshot(), &[0x01, 0x00]);
    }

    #[test]
    fn u16_byte_orders() {
        let mut stream = ByteStream::new();
        stream.write_u16(0xBEEF);
        stream.write_u16_le(0xBEEF);
        assert_eq!(stream.snapshot(), &[0xBE, 0xEF, 0xEF, 0xBE]);

        assert_eq!(stream.read_u16().unwrap(), 0xBEEF);
        assert_eq!(stream.read_u16_le().unwrap(), 0xBEEF);
    }

    #[test]
    fn u24_byte_orders() {
        let mut stream = ByteStream::new();
        stream.write_u24(0x0012_3456);
        stream.write_u24_le(0x0012_3456);
        assert_eq!(stream.snapshot(), &[0x12, 0x34, 0x56, 0x56, 0x34, 0x12]);

        assert_eq!(stream.read_u24().unwrap(), 0x0012_3456);
        assert_eq!(stream.read_u24_le().unwrap(), 0x0012_3456);
    }

    #[test]
    fn u24_truncates_high_bits() {
        let mut stream = ByteStream::new();
        stream.write_u24(0xFF12_3456);
        assert_eq!(stream.snapshot(), &[0x12, 0x34, 0x56]);
    }

    #[test]
    fn i32_roundtrip_both_orders() {
        let mut stream = ByteStream::new();
        stream.write_i32(-2);
        stream.write_i32_le(-2);
        assert_eq!(stream.read_i32().unwrap(), -2);
        assert_eq!(stream.read_i32_le().unwrap(), -2);
    }

    #[test]
    fn i64_golden_bytes() {
        let mut stream = ByteStream::new();
        stream.write_i64(1);
        stream.write_i64_le(1);
        assert_eq!(
            stream.snapshot(),
            &[0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn float_roundtrip_both_orders() {
        let mut stream = ByteStream::new();
        stream.write_f32(1.5);
        stream.write_f32_le(-0.25);
        stream.write_f64(2.75);
        stream.write_f64_le(-10.5);
        assert_eq!(stream.read_f32().unwrap(), 1.5);
        assert_eq!(stream.read_f32_le().unwrap(), -0.25);
        assert_eq!(stream.read_f64().unwrap(), 2.75);
        assert_eq!(stream.read_f64_le().unwrap(), -10.5);
    }

    #[test]
    fn uuid_roundtrip() {
        let uuid = Uuid::from_u128(0x0011_2233_4455_6677_8899_AABB_CCDD_EEFF);
        let mut stream = ByteStream::new();
        stream.write_uuid(uuid);
        assert_eq!(stream.len(), 16);
        assert_eq!(stream.read_uuid().unwrap(), uuid);
    }

    #[test]
    fn uuid_wire_layout_is_two_le_halves() {
        let uuid = Uuid::from_u64_pair(0x0102_0304_0506_0708, 0x090A_0B0C_0D0E_0F10);
        let mut stream = ByteStream::new();
        stream.write_uuid(uuid);
        assert_eq!(
            stream.snapshot(),
            &[
                0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, //
                0x10, 0x0F, 0x0E, 0x0D, 0x0C, 0x0B, 0x0A, 0x09,
            ]
        );
    }

    #[test]
    fn truncated_typed_read_reports_counts() {
        let mut stream = ByteStream::from_slice(&[1, 2, 3]);
        let err = stream.read_i32().unwrap_err();
        assert_eq!(
            err,
            StreamError::UnexpectedEof {
                requested: 4,
                available: 3
            }
        );
        // A failed read consumes nothing.
        assert_eq!(stream.offset(), 0);
    }

    #[test]
    fn into_vec_returns_buffer() {
        let mut stream = ByteStream::new();
        stream.write(&[1, 2, 3]);
        let buf: Vec<u8> = stream.into_vec();
        assert_eq!(buf, vec![1, 2, 3]);
    }

    #[test]
    fn from_conversions() {
        let stream: ByteStream = vec![1u8, 2].into();
        assert_eq!(stream.len(), 2);
        let back: Vec<u8> = stream.into();
        assert_eq!(back, vec![1, 2]);
    }
}
