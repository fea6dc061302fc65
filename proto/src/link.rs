//! Entity link records for mount and passenger relationships.

use bytestream::ByteStream;

use crate::error::DecodeResult;
use crate::version::V1_16_0;

/// Link kind: 0 removes the link, 1 is a passenger, 2 is the driver.
pub const LINK_REMOVE: u8 = 0;
pub const LINK_PASSENGER: u8 = 1;
pub const LINK_DRIVER: u8 = 2;

/// A link between two entities, identified by their unique ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityLink {
    pub from_unique_id: i64,
    pub to_unique_id: i64,
    pub kind: u8,
    pub immediate: bool,
    /// Only on the wire from protocol 407 on.
    pub rider_initiated: bool,
}

/// Writes one link record.
pub fn encode_entity_link(stream: &mut ByteStream, protocol: i32, link: &EntityLink) {
    stream.write_var_i64(link.from_unique_id);
    stream.write_var_i64(link.to_unique_id);
    stream.write_u8(link.kind);
    stream.write_bool(link.immediate);
    if protocol >= V1_16_0 {
        stream.write_bool(link.rider_initiated);
    }
}

/// Reads one link record. Before protocol 407 `rider_initiated` is not
/// on the wire and decodes as `false`.
pub fn decode_entity_link(stream: &mut ByteStream, protocol: i32) -> DecodeResult<EntityLink> {
    let from_unique_id = stream.read_var_i64()?;
    let to_unique_id = stream.read_var_i64()?;
    let kind = stream.read_u8()?;
    let immediate = stream.read_bool()?;
    let rider_initiated = if protocol >= V1_16_0 {
        stream.read_bool()?
    } else {
        false
    };
    Ok(EntityLink {
        from_unique_id,
        to_unique_id,
        kind,
        immediate,
        rider_initiated,
    })
}
