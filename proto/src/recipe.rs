//! Recipe ingredient serialization.
//!
//! Ingredients are a slimmer cousin of the inventory slot: id, meta
//! and count only, with no tag payload and no block lists.

use bytestream::ByteStream;

use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::item::ItemStack;
use crate::mapping::RuntimeItemMap;
use crate::version::V1_16_100;

/// Meta wildcard on the wire; an ingredient without meta matches any.
const ANY_META: i32 = 0x7fff;

/// Writes one ingredient. From protocol 419 on the id is translated
/// through `items`, and a meta-absorbing mapping zeroes the meta.
pub fn encode_recipe_ingredient(
    stream: &mut ByteStream,
    protocol: i32,
    item: &ItemStack,
    items: &dyn RuntimeItemMap,
) -> EncodeResult<()> {
    if item.is_empty() {
        stream.write_var_i32(0);
        return Ok(());
    }

    let mut network_id = item.id;
    let mut meta = item.meta.unwrap_or(ANY_META);
    if protocol >= V1_16_100 {
        match items.to_runtime(protocol, item.id, item.meta) {
            Some(mapping) => {
                network_id = mapping.runtime_id;
                if mapping.absorbs_meta {
                    meta = 0;
                }
            }
            None => {
                return Err(EncodeError::UnknownLegacyId {
                    id: item.id,
                    protocol,
                })
            }
        }
    }

    stream.write_var_i32(network_id);
    stream.write_var_i32(meta);
    stream.write_var_i32(i32::from(item.count));
    Ok(())
}

/// Reads one ingredient. The runtime mapping recovers only the legacy
/// id here; meta always comes from the wire. The count travels as a
/// full varint but must fit a single stack.
pub fn decode_recipe_ingredient(
    stream: &mut ByteStream,
    protocol: i32,
    items: &dyn RuntimeItemMap,
) -> DecodeResult<ItemStack> {
    let raw_id = stream.read_var_i32()?;
    if raw_id == 0 {
        return Ok(ItemStack::empty());
    }

    let id = if protocol >= V1_16_100 {
        match items.to_legacy(protocol, raw_id) {
            Some(mapping) => mapping.legacy_id,
            None => {
                return Err(DecodeError::UnknownRuntimeId {
                    id: raw_id,
                    protocol,
                })
            }
        }
    } else {
        raw_id
    };

    let meta = match stream.read_var_i32()? {
        ANY_META => None,
        value => Some(value),
    };
    let declared = stream.read_var_i32()?;
    let count = u8::try_from(declared).map_err(|_| DecodeError::CountOutOfRange { declared })?;
    Ok(ItemStack::new(id, meta, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::StaticItemMap;
    use crate::version::V1_12_0;

    fn map() -> StaticItemMap {
        StaticItemMap::new()
            .entry(5, None, 2005)
            .entry(351, Some(4), 2351)
    }

    #[test]
    fn empty_ingredient_is_single_zero_byte() {
        let mut stream = ByteStream::new();
        encode_recipe_ingredient(&mut stream, V1_12_0, &ItemStack::empty(), &map()).unwrap();
        assert_eq!(stream.snapshot(), [0x00]);
    }

    #[test]
    fn roundtrip_below_runtime_mapping() {
        let item = ItemStack::new(280, Some(0), 4);
        let mut stream = ByteStream::new();
        encode_recipe_ingredient(&mut stream, V1_12_0, &item, &map()).unwrap();

        let mut stream = ByteStream::from_vec(stream.into_vec());
        let decoded = decode_recipe_ingredient(&mut stream, V1_12_0, &map()).unwrap();
        assert_eq!(decoded, item);
        assert!(!stream.has_remaining());
    }

    #[test]
    fn wildcard_meta_uses_sentinel() {
        let item = ItemStack::new(280, None, 1);
        let mut stream = ByteStream::new();
        encode_recipe_ingredient(&mut stream, V1_12_0, &item, &map()).unwrap();

        let mut stream = ByteStream::from_vec(stream.into_vec());
        assert_eq!(stream.read_var_i32().unwrap(), 280);
        assert_eq!(stream.read_var_i32().unwrap(), ANY_META);

        let mut stream = ByteStream::new();
        encode_recipe_ingredient(&mut stream, V1_12_0, &item, &map()).unwrap();
        let mut stream = ByteStream::from_vec(stream.into_vec());
        let decoded = decode_recipe_ingredient(&mut stream, V1_12_0, &map()).unwrap();
        assert_eq!(decoded.meta, None);
    }

    #[test]
    fn runtime_mapping_translates_id() {
        let item = ItemStack::new(5, None, 2);
        let mut stream = ByteStream::new();
        encode_recipe_ingredient(&mut stream, V1_16_100, &item, &map()).unwrap();

        let mut probe = ByteStream::from_slice(stream.snapshot());
        assert_eq!(probe.read_var_i32().unwrap(), 2005);

        let mut stream = ByteStream::from_vec(stream.into_vec());
        let decoded = decode_recipe_ingredient(&mut stream, V1_16_100, &map()).unwrap();
        assert_eq!(decoded.id, 5);
    }

    #[test]
    fn absorbing_mapping_zeroes_meta() {
        let item = ItemStack::new(351, Some(4), 1);
        let mut stream = ByteStream::new();
        encode_recipe_ingredient(&mut stream, V1_16_100, &item, &map()).unwrap();

        let mut stream = ByteStream::from_vec(stream.into_vec());
        assert_eq!(stream.read_var_i32().unwrap(), 2351);
        assert_eq!(stream.read_var_i32().unwrap(), 0);
    }

    #[test]
    fn count_must_fit_a_single_stack() {
        let ingredient = |count: i32| {
            let mut stream = ByteStream::new();
            stream.write_var_i32(280);
            stream.write_var_i32(ANY_META);
            stream.write_var_i32(count);
            let mut stream = ByteStream::from_vec(stream.into_vec());
            decode_recipe_ingredient(&mut stream, V1_12_0, &map())
        };

        assert_eq!(ingredient(255).unwrap().count, 255);
        assert_eq!(
            ingredient(300).unwrap_err(),
            DecodeError::CountOutOfRange { declared: 300 }
        );
        assert_eq!(
            ingredient(-1).unwrap_err(),
            DecodeError::CountOutOfRange { declared: -1 }
        );
    }

    #[test]
    fn unmapped_ids_fail_both_directions() {
        let item = ItemStack::new(999, None, 1);
        let mut stream = ByteStream::new();
        let err = encode_recipe_ingredient(&mut stream, V1_16_100, &item, &map()).unwrap_err();
        assert!(matches!(err, EncodeError::UnknownLegacyId { id: 999, .. }));

        let mut stream = ByteStream::new();
        stream.write_var_i32(4242);
        let mut stream = ByteStream::from_vec(stream.into_vec());
        let err = decode_recipe_ingredient(&mut stream, V1_16_100, &map()).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownRuntimeId { id: 4242, .. }));
    }
}
