//! Item stack slot serialization.
//!
//! A non-empty slot travels as a signed varint id, an aux word packing
//! count and meta, a little-endian u16 control word introducing the tag
//! payload, two block name lists and, for shields on 1.12+, a blocking
//! tick. The control word distinguishes a raw little-endian payload
//! (its byte length, below 0x7fff) from the 0xffff marker introducing a
//! counted run of network-form tag trees.

use bytestream::ByteStream;
use nbt::{read_root, write_root, Compound, Encoding, Value};
use tracing::debug;

use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::mapping::RuntimeItemMap;
use crate::version::{V1_12_0, V1_13_0, V1_14_0, V1_16_0, V1_16_100};

/// Legacy item ids the codec itself must recognize.
pub mod ids {
    /// Empty slot marker.
    pub const AIR: i32 = 0;
    /// Placeholder sent in place of items the client does not know.
    pub const INFO_UPDATE: i32 = 248;
    pub const SHIELD: i32 = 513;
    pub const SUSPICIOUS_STEW: i32 = 734;
    pub const HONEYCOMB: i32 = 736;
    /// First id of the 1.16 item range.
    pub const LODESTONE_COMPASS: i32 = 741;
}

/// Meta value in the aux word that stands for "no meta".
const NO_META: i32 = 0x7fff;
/// Control word announcing network-form tag trees instead of a raw
/// payload length.
const PAYLOAD_IN_NETWORK_FORM: u16 = 0xffff;

/// One inventory slot: legacy id, optional meta, count and the stored
/// tag payload in little-endian form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemStack {
    pub id: i32,
    pub meta: Option<i32>,
    pub count: u8,
    /// Stored tag tree serialized little-endian; empty when absent.
    pub nbt: Vec<u8>,
}

impl ItemStack {
    #[must_use]
    pub fn new(id: i32, meta: Option<i32>, count: u8) -> Self {
        Self {
            id,
            meta,
            count,
            nbt: Vec::new(),
        }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            id: ids::AIR,
            meta: None,
            count: 0,
            nbt: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.id == ids::AIR
    }
}

fn parse_stored(payload: &[u8]) -> Result<Option<(String, Compound)>, nbt::NbtError> {
    if payload.is_empty() {
        return Ok(None);
    }
    let mut stream = ByteStream::from_slice(payload);
    Ok(Some(read_root(&mut stream, Encoding::little_endian())?))
}

fn string_list(stored: Option<&(String, Compound)>, key: &str) -> Vec<String> {
    match stored.and_then(|(_, tree)| tree.get(key)) {
        Some(Value::List(entries)) => entries
            .iter()
            .filter_map(|entry| entry.as_str().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    }
}

/// Replaces ids the client does not know yet with the update
/// placeholder it renders as a flashing question mark.
fn downgrade_substitute(network_id: i32, protocol: i32) -> i32 {
    let too_new = (protocol < V1_14_0 && network_id == ids::HONEYCOMB)
        || (protocol < V1_13_0 && network_id == ids::SUSPICIOUS_STEW)
        || (protocol < V1_16_0 && network_id >= ids::LODESTONE_COMPASS);
    if too_new {
        debug!(network_id, protocol, "item id replaced with update placeholder");
        return ids::INFO_UPDATE;
    }
    network_id
}

/// Writes one slot in the layout of the given protocol.
///
/// From protocol 419 on the legacy id is translated through `items`;
/// an id the map cannot place on the wire fails the encode. A stored
/// payload that does not parse fails before any byte is written.
pub fn encode_item(
    stream: &mut ByteStream,
    protocol: i32,
    item: &ItemStack,
    items: &dyn RuntimeItemMap,
) -> EncodeResult<()> {
    if item.is_empty() {
        stream.write_var_i32(0);
        return Ok(());
    }

    let stored = parse_stored(&item.nbt)?;
    let can_place_on = string_list(stored.as_ref(), "CanPlaceOn");
    let can_destroy = string_list(stored.as_ref(), "CanDestroy");

    let durable = items.is_durable(item.id);
    let (mapped_id, absorbs_meta) = if protocol >= V1_16_100 {
        match items.to_runtime(protocol, item.id, item.meta) {
            Some(mapping) => (mapping.runtime_id, mapping.absorbs_meta),
            None => {
                return Err(EncodeError::UnknownLegacyId {
                    id: item.id,
                    protocol,
                })
            }
        }
    } else {
        (item.id, false)
    };
    stream.write_var_i32(downgrade_substitute(mapped_id, protocol));

    let aux = if protocol >= V1_12_0 {
        let mut aux = i32::from(item.count);
        if !durable {
            let meta = if absorbs_meta { 0 } else { item.meta.unwrap_or(-1) };
            aux |= (meta & NO_META) << 8;
        }
        aux
    } else {
        ((item.meta.unwrap_or(-1) & NO_META) << 8) | i32::from(item.count)
    };
    stream.write_var_i32(aux);

    if !item.nbt.is_empty() || (durable && protocol >= V1_12_0) {
        if protocol < V1_12_0 {
            let length = u16::try_from(item.nbt.len()).map_err(|_| EncodeError::PayloadTooLarge {
                length: item.nbt.len(),
            })?;
            stream.write_u16_le(length);
            stream.write(&item.nbt);
        } else {
            let (name, mut tree) = stored.unwrap_or_default();
            // Live durability travels under "Damage"; stash any stored
            // entry of that name so it survives the roundtrip.
            if let Some(value) = tree.remove("Damage") {
                tree.insert("__DamageConflict__".to_owned(), value);
            }
            if durable {
                tree.insert("Damage".to_owned(), Value::Int(item.meta.unwrap_or(0)));
            }
            stream.write_u16_le(PAYLOAD_IN_NETWORK_FORM);
            stream.write_var_u32(1);
            write_root(stream, &name, &tree, Encoding::network())?;
        }
    } else {
        stream.write_u16_le(0);
    }

    write_block_list(stream, &can_place_on);
    write_block_list(stream, &can_destroy);

    if item.id == ids::SHIELD && protocol >= V1_12_0 {
        stream.write_var_i64(0);
    }
    Ok(())
}

fn write_block_list(stream: &mut ByteStream, names: &[String]) {
    stream.write_var_i32(names.len() as i32);
    for name in names {
        stream.write_string(name);
    }
}

/// Reads one slot in the layout of the given protocol.
pub fn decode_item(
    stream: &mut ByteStream,
    protocol: i32,
    items: &dyn RuntimeItemMap,
) -> DecodeResult<ItemStack> {
    let raw_id = stream.read_var_i32()?;
    if raw_id == 0 {
        return Ok(ItemStack::empty());
    }

    let (id, mapped_meta) = if protocol >= V1_16_100 {
        match items.to_legacy(protocol, raw_id) {
            Some(mapping) => (mapping.legacy_id, mapping.meta),
            None => {
                return Err(DecodeError::UnknownRuntimeId {
                    id: raw_id,
                    protocol,
                })
            }
        }
    } else {
        (raw_id, None)
    };

    let aux = stream.read_var_i32()?;
    let mut meta = match aux >> 8 {
        NO_META => None,
        value => Some(value),
    };
    if mapped_meta.is_some() {
        meta = mapped_meta;
    }
    let count = (aux & 0xff) as u8;

    let mut payload = Vec::new();
    let control = stream.read_u16_le()?;
    match control {
        PAYLOAD_IN_NETWORK_FORM => {
            let tag_count = stream.read_var_u32()?;
            for _ in 0..tag_count {
                let (name, mut tree) = read_root(stream, Encoding::network())?;
                if let Some(value) = tree.remove("Damage") {
                    match value.as_i32() {
                        Some(damage) => meta = Some(damage),
                        None => {
                            return Err(DecodeError::DamageNotNumeric {
                                found: value.tag_type(),
                            })
                        }
                    }
                }
                if let Some(value) = tree.remove("__DamageConflict__") {
                    tree.insert("Damage".to_owned(), value);
                }
                if !tree.is_empty() {
                    let mut out = ByteStream::new();
                    write_root(&mut out, &name, &tree, Encoding::little_endian())?;
                    payload = out.into_vec();
                }
            }
        }
        0..=0x7ffe => payload = stream.read(control as usize).to_vec(),
        // 0x7fff..=0xfffe declare no payload at all
        _ => {}
    }

    let can_place_on = read_block_list(stream)?;
    let can_destroy = read_block_list(stream)?;
    if !can_place_on.is_empty() || !can_destroy.is_empty() {
        let (name, mut tree) = match parse_stored(&payload)? {
            Some(parsed) => parsed,
            None => (String::new(), Compound::new()),
        };
        if !can_destroy.is_empty() {
            tree.insert("CanDestroy".to_owned(), string_values(&can_destroy));
        }
        if !can_place_on.is_empty() {
            tree.insert("CanPlaceOn".to_owned(), string_values(&can_place_on));
        }
        let mut out = ByteStream::new();
        write_root(&mut out, &name, &tree, Encoding::little_endian())?;
        payload = out.into_vec();
    }

    if id == ids::SHIELD && protocol >= V1_12_0 {
        stream.read_var_i64()?;
    }

    Ok(ItemStack {
        id,
        meta,
        count,
        nbt: payload,
    })
}

fn read_block_list(stream: &mut ByteStream) -> DecodeResult<Vec<String>> {
    let declared = stream.read_var_i32()?;
    let count = match usize::try_from(declared) {
        Ok(count) if count <= stream.remaining() => count,
        _ => {
            return Err(DecodeError::InvalidLength {
                declared: i64::from(declared),
                available: stream.remaining(),
            })
        }
    };
    let mut names = Vec::with_capacity(count);
    for _ in 0..count {
        names.push(stream.read_string()?);
    }
    Ok(names)
}

fn string_values(names: &[String]) -> Value {
    Value::List(names.iter().cloned().map(Value::String).collect())
}
