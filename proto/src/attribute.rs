//! Entity attribute lists.

use bytestream::ByteStream;

use crate::error::{DecodeError, DecodeResult};

/// A named entity attribute with its live value range.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub min_value: f32,
    pub current_value: f32,
    pub max_value: f32,
}

impl Attribute {
    /// Builds an attribute at its registered defaults.
    #[must_use]
    pub fn from_template(name: impl Into<String>, template: AttributeTemplate) -> Self {
        Self {
            name: name.into(),
            min_value: template.min_value,
            current_value: template.default_value,
            max_value: template.max_value,
        }
    }
}

/// Registered value range and default for an attribute name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeTemplate {
    pub min_value: f32,
    pub max_value: f32,
    pub default_value: f32,
}

const fn template(min_value: f32, max_value: f32, default_value: f32) -> AttributeTemplate {
    AttributeTemplate {
        min_value,
        max_value,
        default_value,
    }
}

/// Injected closed set of attribute names the decoder accepts.
pub trait AttributeRegistry {
    /// Looks up the template registered under `name`.
    fn lookup(&self, name: &str) -> Option<AttributeTemplate>;
}

/// The standard vanilla attribute set.
#[derive(Debug, Clone, Copy, Default)]
pub struct VanillaAttributes;

impl AttributeRegistry for VanillaAttributes {
    fn lookup(&self, name: &str) -> Option<AttributeTemplate> {
        Some(match name {
            "minecraft:absorption" => template(0.0, f32::MAX, 0.0),
            "minecraft:player.saturation" => template(0.0, 20.0, 20.0),
            "minecraft:player.exhaustion" => template(0.0, 5.0, 0.41),
            "minecraft:knockback_resistance" => template(0.0, 1.0, 0.0),
            "minecraft:health" => template(0.0, 20.0, 20.0),
            "minecraft:movement" => template(0.0, f32::MAX, 0.1),
            "minecraft:follow_range" => template(0.0, 2048.0, 16.0),
            "minecraft:player.hunger" => template(0.0, 20.0, 20.0),
            "minecraft:attack_damage" => template(0.0, f32::MAX, 1.0),
            "minecraft:player.level" => template(0.0, 24791.0, 0.0),
            "minecraft:player.experience" => template(0.0, 1.0, 0.0),
            "minecraft:luck" => template(-1024.0, 1024.0, 0.0),
            _ => return None,
        })
    }
}

/// Writes a count-prefixed attribute list in its existing order.
pub fn encode_attribute_list(stream: &mut ByteStream, attributes: &[Attribute]) {
    stream.write_var_u32(attributes.len() as u32);
    for attribute in attributes {
        stream.write_string(&attribute.name);
        stream.write_f32_le(attribute.min_value);
        stream.write_f32_le(attribute.current_value);
        stream.write_f32_le(attribute.max_value);
    }
}

/// Reads a count-prefixed attribute list.
///
/// An unresolvable name fails the whole list; no partial result is
/// returned.
pub fn decode_attribute_list(
    stream: &mut ByteStream,
    registry: &dyn AttributeRegistry,
) -> DecodeResult<Vec<Attribute>> {
    let count = stream.read_var_u32()?;
    let mut attributes = Vec::new();
    for _ in 0..count {
        let name = stream.read_string()?;
        if registry.lookup(&name).is_none() {
            return Err(DecodeError::UnknownAttribute { name });
        }
        let min_value = stream.read_f32_le()?;
        let current_value = stream.read_f32_le()?;
        let max_value = stream.read_f32_le()?;
        attributes.push(Attribute {
            name,
            min_value,
            current_value,
            max_value,
        });
    }
    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health() -> Attribute {
        Attribute {
            name: "minecraft:health".to_owned(),
            min_value: 0.0,
            current_value: 17.5,
            max_value: 20.0,
        }
    }

    #[test]
    fn vanilla_registry_lookup() {
        let template = VanillaAttributes.lookup("minecraft:luck").unwrap();
        assert_eq!(template.min_value, -1024.0);
        assert_eq!(template.max_value, 1024.0);
        assert!(VanillaAttributes.lookup("minecraft:bogus").is_none());
    }

    #[test]
    fn from_template_uses_default() {
        let template = VanillaAttributes.lookup("minecraft:movement").unwrap();
        let attribute = Attribute::from_template("minecraft:movement", template);
        assert_eq!(attribute.current_value, 0.1);
        assert_eq!(attribute.min_value, 0.0);
    }

    #[test]
    fn list_roundtrip_preserves_order() {
        let attributes = vec![
            health(),
            Attribute {
                name: "minecraft:movement".to_owned(),
                min_value: 0.0,
                current_value: 0.25,
                max_value: 1.0,
            },
        ];
        let mut stream = ByteStream::new();
        encode_attribute_list(&mut stream, &attributes);

        let mut stream = ByteStream::from_vec(stream.into_vec());
        let decoded = decode_attribute_list(&mut stream, &VanillaAttributes).unwrap();
        assert_eq!(decoded, attributes);
        assert!(!stream.has_remaining());
    }

    #[test]
    fn golden_bytes_single_attribute() {
        let mut stream = ByteStream::new();
        encode_attribute_list(&mut stream, &[health()]);

        let mut expected = vec![0x01, 0x10];
        expected.extend_from_slice(b"minecraft:health");
        expected.extend_from_slice(&0.0f32.to_le_bytes());
        expected.extend_from_slice(&17.5f32.to_le_bytes());
        expected.extend_from_slice(&20.0f32.to_le_bytes());
        assert_eq!(stream.snapshot(), expected.as_slice());
    }

    #[test]
    fn unknown_name_fails_whole_list() {
        let attributes = vec![
            health(),
            Attribute {
                name: "minecraft:not_a_thing".to_owned(),
                min_value: 0.0,
                current_value: 0.0,
                max_value: 1.0,
            },
        ];
        let mut stream = ByteStream::new();
        encode_attribute_list(&mut stream, &attributes);

        let mut stream = ByteStream::from_vec(stream.into_vec());
        let err = decode_attribute_list(&mut stream, &VanillaAttributes).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownAttribute {
                name: "minecraft:not_a_thing".to_owned()
            }
        );
    }

    #[test]
    fn truncated_list_errors() {
        let mut stream = ByteStream::new();
        encode_attribute_list(&mut stream, &[health()]);
        let bytes = stream.into_vec();

        let mut short = ByteStream::from_slice(&bytes[..bytes.len() - 2]);
        let err = decode_attribute_list(&mut short, &VanillaAttributes).unwrap_err();
        assert!(matches!(err, DecodeError::Stream(_)));
    }
}
