//! Writing tag trees onto a byte stream.

use bytestream::ByteStream;

use crate::encoding::{ByteOrder, Encoding};
use crate::error::{NbtError, NbtResult};
use crate::tag::{Compound, TagType, Value};

/// Writes a named root compound in the given encoding.
///
/// Fails when a string exceeds the fixed-width length field of the
/// chosen encoding or when a list mixes element types.
pub fn write_root(
    stream: &mut ByteStream,
    name: &str,
    compound: &Compound,
    encoding: Encoding,
) -> NbtResult<()> {
    stream.write_u8(u8::from(TagType::Compound));
    write_tag_string(stream, name, encoding)?;
    write_compound_body(stream, compound, encoding)
}

fn write_tag_string(stream: &mut ByteStream, value: &str, encoding: Encoding) -> NbtResult<()> {
    let bytes = value.as_bytes();
    if encoding.varint {
        stream.write_var_u32(bytes.len() as u32);
    } else {
        let len = u16::try_from(bytes.len()).map_err(|_| NbtError::LengthOverflow {
            length: bytes.len(),
        })?;
        match encoding.order {
            ByteOrder::Big => stream.write_u16(len),
            ByteOrder::Little => stream.write_u16_le(len),
        }
    }
    stream.write(bytes);
    Ok(())
}

fn write_count(stream: &mut ByteStream, count: usize, encoding: Encoding) -> NbtResult<()> {
    let count = i32::try_from(count).map_err(|_| NbtError::LengthOverflow { length: count })?;
    if encoding.varint {
        stream.write_var_i32(count);
    } else {
        match encoding.order {
            ByteOrder::Big => stream.write_i32(count),
            ByteOrder::Little => stream.write_i32_le(count),
        }
    }
    Ok(())
}

fn write_i32_field(stream: &mut ByteStream, value: i32, encoding: Encoding) {
    if encoding.varint {
        stream.write_var_i32(value);
    } else {
        match encoding.order {
            ByteOrder::Big => stream.write_i32(value),
            ByteOrder::Little => stream.write_i32_le(value),
        }
    }
}

fn write_i64_field(stream: &mut ByteStream, value: i64, encoding: Encoding) {
    if encoding.varint {
        stream.write_var_i64(value);
    } else {
        match encoding.order {
            ByteOrder::Big => stream.write_i64(value),
            ByteOrder::Little => stream.write_i64_le(value),
        }
    }
}

fn write_compound_body(
    stream: &mut ByteStream,
    entries: &Compound,
    encoding: Encoding,
) -> NbtResult<()> {
    for (name, value) in entries {
        stream.write_u8(u8::from(value.tag_type()));
        write_tag_string(stream, name, encoding)?;
        write_value(stream, value, encoding)?;
    }
    stream.write_u8(u8::from(TagType::End));
    Ok(())
}

fn write_value(stream: &mut ByteStream, value: &Value, encoding: Encoding) -> NbtResult<()> {
    match value {
        Value::Byte(v) => stream.write_u8(*v as u8),
        Value::Short(v) => match encoding.order {
            ByteOrder::Big => stream.write_u16(*v as u16),
            ByteOrder::Little => stream.write_u16_le(*v as u16),
        },
        Value::Int(v) => write_i32_field(stream, *v, encoding),
        Value::Long(v) => write_i64_field(stream, *v, encoding),
        Value::Float(v) => match encoding.order {
            ByteOrder::Big => stream.write_f32(*v),
            ByteOrder::Little => stream.write_f32_le(*v),
        },
        Value::Double(v) => match encoding.order {
            ByteOrder::Big => stream.write_f64(*v),
            ByteOrder::Little => stream.write_f64_le(*v),
        },
        Value::ByteArray(v) => {
            write_count(stream, v.len(), encoding)?;
            stream.write(v);
        }
        Value::String(v) => write_tag_string(stream, v, encoding)?,
        Value::List(items) => {
            let elem = items.first().map_or(TagType::End, Value::tag_type);
            stream.write_u8(u8::from(elem));
            write_count(stream, items.len(), encoding)?;
            for item in items {
                let found = item.tag_type();
                if found != elem {
                    return Err(NbtError::MixedList {
                        expected: elem,
                        found,
                    });
                }
                write_value(stream, item, encoding)?;
            }
        }
        Value::Compound(entries) => write_compound_body(stream, entries, encoding)?,
        Value::IntArray(v) => {
            write_count(stream, v.len(), encoding)?;
            for item in v {
                write_i32_field(stream, *item, encoding);
            }
        }
        Value::LongArray(v) => {
            write_count(stream, v.len(), encoding)?;
            for item in v {
                write_i64_field(stream, *item, encoding);
            }
        }
    }
    Ok(())
}
