//! The tag model: type ids and the value tree.

use std::collections::BTreeMap;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// A named compound's children, keyed by tag name.
pub type Compound = BTreeMap<String, Value>;

/// The classic tag type ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum TagType {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

/// A tag payload.
///
/// Compound children carry their names as map keys; list children are
/// unnamed and homogeneous. `End` has no payload and no variant here, since
/// it only terminates compounds on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List(Vec<Value>),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Value {
    /// Returns the wire tag type of this value.
    #[must_use]
    pub const fn tag_type(&self) -> TagType {
        match self {
            Self::Byte(_) => TagType::Byte,
            Self::Short(_) => TagType::Short,
            Self::Int(_) => TagType::Int,
            Self::Long(_) => TagType::Long,
            Self::Float(_) => TagType::Float,
            Self::Double(_) => TagType::Double,
            Self::ByteArray(_) => TagType::ByteArray,
            Self::String(_) => TagType::String,
            Self::List(_) => TagType::List,
            Self::Compound(_) => TagType::Compound,
            Self::IntArray(_) => TagType::IntArray,
            Self::LongArray(_) => TagType::LongArray,
        }
    }

    /// Returns the value as an `i32` if it is numeric, truncating wider
    /// numerics the way the reference implementation's number tags do.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Byte(v) => Some(i32::from(*v)),
            Self::Short(v) => Some(i32::from(*v)),
            Self::Int(v) => Some(*v),
            Self::Long(v) => Some(*v as i32),
            Self::Float(v) => Some(*v as i32),
            Self::Double(v) => Some(*v as i32),
            _ => None,
        }
    }

    /// Returns the value as a string slice if it is a string tag.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_type_from_valid_ids() {
        assert_eq!(TagType::try_from(0u8).unwrap(), TagType::End);
        assert_eq!(TagType::try_from(1u8).unwrap(), TagType::Byte);
        assert_eq!(TagType::try_from(10u8).unwrap(), TagType::Compound);
        assert_eq!(TagType::try_from(12u8).unwrap(), TagType::LongArray);
    }

    #[test]
    fn tag_type_rejects_unknown_ids() {
        assert!(TagType::try_from(13u8).is_err());
        assert!(TagType::try_from(0xFFu8).is_err());
    }

    #[test]
    fn tag_type_back_to_raw() {
        assert_eq!(u8::from(TagType::End), 0);
        assert_eq!(u8::from(TagType::IntArray), 11);
    }

    #[test]
    fn value_reports_its_tag_type() {
        assert_eq!(Value::Byte(1).tag_type(), TagType::Byte);
        assert_eq!(Value::String(String::new()).tag_type(), TagType::String);
        assert_eq!(Value::List(Vec::new()).tag_type(), TagType::List);
        assert_eq!(Value::Compound(Compound::new()).tag_type(), TagType::Compound);
    }

    #[test]
    fn as_i32_widens_and_truncates_numerics() {
        assert_eq!(Value::Byte(-3).as_i32(), Some(-3));
        assert_eq!(Value::Short(300).as_i32(), Some(300));
        assert_eq!(Value::Int(70_000).as_i32(), Some(70_000));
        assert_eq!(Value::Long(5).as_i32(), Some(5));
        assert_eq!(Value::Double(2.9).as_i32(), Some(2));
        assert_eq!(Value::String("5".into()).as_i32(), None);
    }

    #[test]
    fn as_str_only_for_strings() {
        assert_eq!(Value::String("abc".into()).as_str(), Some("abc"));
        assert_eq!(Value::Int(1).as_str(), None);
    }
}
