//! Reading tag trees off a byte stream.

use bytestream::ByteStream;

use crate::encoding::{ByteOrder, Encoding};
use crate::error::{NbtError, NbtResult};
use crate::tag::{Compound, TagType, Value};

/// Recursion ceiling for nested compounds and lists.
pub const MAX_DEPTH: usize = 512;

/// Reads a named root compound in the given encoding.
///
/// The root must be a compound; anything else is an error. Declared
/// lengths and counts are validated against the bytes remaining before
/// any allocation happens, so a hostile length field cannot reserve
/// memory it has no bytes to fill.
pub fn read_root(stream: &mut ByteStream, encoding: Encoding) -> NbtResult<(String, Compound)> {
    let tag = read_tag_type(stream)?;
    if tag != TagType::Compound {
        return Err(NbtError::RootNotCompound { found: tag });
    }
    let name = read_tag_string(stream, encoding)?;
    let body = read_compound_body(stream, encoding, 1)?;
    Ok((name, body))
}

fn read_tag_type(stream: &mut ByteStream) -> NbtResult<TagType> {
    let id = stream.read_u8()?;
    TagType::try_from(id).map_err(|_| NbtError::UnknownTagType { id })
}

fn read_tag_string(stream: &mut ByteStream, encoding: Encoding) -> NbtResult<String> {
    let len = if encoding.varint {
        stream.read_var_u32()? as usize
    } else {
        usize::from(match encoding.order {
            ByteOrder::Big => stream.read_u16()?,
            ByteOrder::Little => stream.read_u16_le()?,
        })
    };
    let available = stream.remaining();
    if len > available {
        return Err(NbtError::InvalidLength {
            declared: len as i64,
            available,
        });
    }
    Ok(String::from_utf8_lossy(stream.read(len)).into_owned())
}

/// Reads an element count, rejecting negative values and counts larger
/// than the bytes left to parse them from.
fn read_checked_count(stream: &mut ByteStream, encoding: Encoding) -> NbtResult<usize> {
    let declared = if encoding.varint {
        stream.read_var_i32()?
    } else {
        match encoding.order {
            ByteOrder::Big => stream.read_i32()?,
            ByteOrder::Little => stream.read_i32_le()?,
        }
    };
    let available = stream.remaining();
    match usize::try_from(declared) {
        Ok(count) if count <= available => Ok(count),
        _ => Err(NbtError::InvalidLength {
            declared: i64::from(declared),
            available,
        }),
    }
}

fn check_depth(depth: usize) -> NbtResult<()> {
    if depth > MAX_DEPTH {
        return Err(NbtError::DepthLimitExceeded { limit: MAX_DEPTH });
    }
    Ok(())
}

fn read_compound_body(
    stream: &mut ByteStream,
    encoding: Encoding,
    depth: usize,
) -> NbtResult<Compound> {
    check_depth(depth)?;
    let mut entries = Compound::new();
    loop {
        let tag = read_tag_type(stream)?;
        if tag == TagType::End {
            return Ok(entries);
        }
        let name = read_tag_string(stream, encoding)?;
        let value = read_value(stream, encoding, tag, depth)?;
        entries.insert(name, value);
    }
}

fn read_i32_field(stream: &mut ByteStream, encoding: Encoding) -> NbtResult<i32> {
    if encoding.varint {
        Ok(stream.read_var_i32()?)
    } else {
        Ok(match encoding.order {
            ByteOrder::Big => stream.read_i32()?,
            ByteOrder::Little => stream.read_i32_le()?,
        })
    }
}

fn read_i64_field(stream: &mut ByteStream, encoding: Encoding) -> NbtResult<i64> {
    if encoding.varint {
        Ok(stream.read_var_i64()?)
    } else {
        Ok(match encoding.order {
            ByteOrder::Big => stream.read_i64()?,
            ByteOrder::Little => stream.read_i64_le()?,
        })
    }
}

fn read_value(
    stream: &mut ByteStream,
    encoding: Encoding,
    tag: TagType,
    depth: usize,
) -> NbtResult<Value> {
    check_depth(depth)?;
    Ok(match tag {
        TagType::End => return Err(NbtError::UnexpectedEndTag),
        TagType::Byte => Value::Byte(stream.read_u8()? as i8),
        TagType::Short => Value::Short(match encoding.order {
            ByteOrder::Big => stream.read_u16()? as i16,
            ByteOrder::Little => stream.read_u16_le()? as i16,
        }),
        TagType::Int => Value::Int(read_i32_field(stream, encoding)?),
        TagType::Long => Value::Long(read_i64_field(stream, encoding)?),
        TagType::Float => Value::Float(match encoding.order {
            ByteOrder::Big => stream.read_f32()?,
            ByteOrder::Little => stream.read_f32_le()?,
        }),
        TagType::Double => Value::Double(match encoding.order {
            ByteOrder::Big => stream.read_f64()?,
            ByteOrder::Little => stream.read_f64_le()?,
        }),
        TagType::ByteArray => {
            let len = read_checked_count(stream, encoding)?;
            Value::ByteArray(stream.read(len).to_vec())
        }
        TagType::String => Value::String(read_tag_string(stream, encoding)?),
        TagType::List => {
            let elem = read_tag_type(stream)?;
            let count = read_checked_count(stream, encoding)?;
            if count > 0 && elem == TagType::End {
                return Err(NbtError::UnexpectedEndTag);
            }
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(read_value(stream, encoding, elem, depth + 1)?);
            }
            Value::List(items)
        }
        TagType::Compound => Value::Compound(read_compound_body(stream, encoding, depth + 1)?),
        TagType::IntArray => {
            let count = read_checked_count(stream, encoding)?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(read_i32_field(stream, encoding)?);
            }
            Value::IntArray(items)
        }
        TagType::LongArray => {
            let count = read_checked_count(stream, encoding)?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(read_i64_field(stream, encoding)?);
            }
            Value::LongArray(items)
        }
    })
}
