//! Packet envelope and the packet bodies built from the shared codecs.
//!
//! Every packet starts with an unsigned varint whose low ten bits are
//! the packet id; the remaining bits route between sub-clients on a
//! split screen and are ignored here.

use bytestream::ByteStream;
use uuid::Uuid;

use crate::attribute::{
    decode_attribute_list, encode_attribute_list, Attribute, AttributeRegistry,
};
use crate::error::{DecodeError, DecodeResult, EncodeResult, LimitKind};
use crate::item::{decode_item, encode_item, ItemStack};
use crate::limits::MAX_EMOTE_PIECES;
use crate::link::{decode_entity_link, encode_entity_link, EntityLink};
use crate::mapping::RuntimeItemMap;
use crate::rules::{decode_game_rules, encode_game_rules, GameRules};
use crate::skin::{decode_skin, encode_skin, Skin};
use crate::version::V1_13_0;

/// Bits of the envelope word that carry the packet id.
pub const PACKET_ID_MASK: u32 = 0x3ff;

const ID_UPDATE_ATTRIBUTES: u32 = 0x1d;
const ID_MOB_EQUIPMENT: u32 = 0x1f;
const ID_SET_ENTITY_LINK: u32 = 0x29;
const ID_GAME_RULES_CHANGED: u32 = 0x48;
const ID_PLAYER_SKIN: u32 = 0x5d;
const ID_EMOTE_LIST: u32 = 0x98;

/// The game packets this layer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    UpdateAttributes {
        runtime_entity_id: u64,
        attributes: Vec<Attribute>,
    },
    MobEquipment {
        runtime_entity_id: u64,
        item: ItemStack,
        inventory_slot: u8,
        hotbar_slot: u8,
        window_id: u8,
    },
    SetEntityLink {
        link: EntityLink,
    },
    GameRulesChanged {
        rules: GameRules,
    },
    PlayerSkin {
        uuid: Uuid,
        skin: Skin,
        new_skin_name: String,
        old_skin_name: String,
        /// Only on the wire from protocol 388 on.
        trusted: bool,
    },
    EmoteList {
        runtime_entity_id: u64,
        emote_ids: Vec<Uuid>,
    },
}

impl Packet {
    /// Wire id of this packet.
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::UpdateAttributes { .. } => ID_UPDATE_ATTRIBUTES,
            Self::MobEquipment { .. } => ID_MOB_EQUIPMENT,
            Self::SetEntityLink { .. } => ID_SET_ENTITY_LINK,
            Self::GameRulesChanged { .. } => ID_GAME_RULES_CHANGED,
            Self::PlayerSkin { .. } => ID_PLAYER_SKIN,
            Self::EmoteList { .. } => ID_EMOTE_LIST,
        }
    }
}

/// Writes the envelope and body of one packet.
///
/// Only item-bearing packets can fail, and only through their slot
/// codec.
pub fn encode_packet(
    stream: &mut ByteStream,
    protocol: i32,
    packet: &Packet,
    items: &dyn RuntimeItemMap,
) -> EncodeResult<()> {
    stream.write_var_u32(packet.id());
    match packet {
        Packet::UpdateAttributes {
            runtime_entity_id,
            attributes,
        } => {
            stream.write_var_u64(*runtime_entity_id);
            encode_attribute_list(stream, attributes);
        }
        Packet::MobEquipment {
            runtime_entity_id,
            item,
            inventory_slot,
            hotbar_slot,
            window_id,
        } => {
            stream.write_var_u64(*runtime_entity_id);
            encode_item(stream, protocol, item, items)?;
            stream.write_u8(*inventory_slot);
            stream.write_u8(*hotbar_slot);
            stream.write_u8(*window_id);
        }
        Packet::SetEntityLink { link } => encode_entity_link(stream, protocol, link),
        Packet::GameRulesChanged { rules } => encode_game_rules(stream, rules),
        Packet::PlayerSkin {
            uuid,
            skin,
            new_skin_name,
            old_skin_name,
            trusted,
        } => {
            stream.write_uuid(*uuid);
            encode_skin(stream, protocol, skin);
            stream.write_string(new_skin_name);
            stream.write_string(old_skin_name);
            if protocol >= V1_13_0 {
                stream.write_bool(*trusted);
            }
        }
        Packet::EmoteList {
            runtime_entity_id,
            emote_ids,
        } => {
            stream.write_var_u64(*runtime_entity_id);
            stream.write_var_u32(emote_ids.len() as u32);
            for emote_id in emote_ids {
                stream.write_uuid(*emote_id);
            }
        }
    }
    Ok(())
}

/// Reads the envelope and dispatches to the body decoder.
pub fn decode_packet(
    stream: &mut ByteStream,
    protocol: i32,
    items: &dyn RuntimeItemMap,
    attributes: &dyn AttributeRegistry,
) -> DecodeResult<Packet> {
    let id = stream.read_var_u32()? & PACKET_ID_MASK;
    match id {
        ID_UPDATE_ATTRIBUTES => Ok(Packet::UpdateAttributes {
            runtime_entity_id: stream.read_var_u64()?,
            attributes: decode_attribute_list(stream, attributes)?,
        }),
        ID_MOB_EQUIPMENT => {
            let runtime_entity_id = stream.read_var_u64()?;
            let item = decode_item(stream, protocol, items)?;
            let inventory_slot = stream.read_u8()?;
            let hotbar_slot = stream.read_u8()?;
            let window_id = stream.read_u8()?;
            Ok(Packet::MobEquipment {
                runtime_entity_id,
                item,
                inventory_slot,
                hotbar_slot,
                window_id,
            })
        }
        ID_SET_ENTITY_LINK => Ok(Packet::SetEntityLink {
            link: decode_entity_link(stream, protocol)?,
        }),
        ID_GAME_RULES_CHANGED => Ok(Packet::GameRulesChanged {
            rules: decode_game_rules(stream)?,
        }),
        ID_PLAYER_SKIN => {
            let uuid = stream.read_uuid()?;
            let skin = decode_skin(stream, protocol)?;
            let new_skin_name = stream.read_string()?;
            let old_skin_name = stream.read_string()?;
            let trusted = if protocol >= V1_13_0 {
                stream.read_bool()?
            } else {
                false
            };
            Ok(Packet::PlayerSkin {
                uuid,
                skin,
                new_skin_name,
                old_skin_name,
                trusted,
            })
        }
        ID_EMOTE_LIST => {
            let runtime_entity_id = stream.read_var_u64()?;
            let declared = stream.read_var_u32()? as usize;
            if declared > MAX_EMOTE_PIECES {
                return Err(DecodeError::LimitExceeded {
                    kind: LimitKind::EmotePieces,
                    limit: MAX_EMOTE_PIECES,
                    actual: declared,
                });
            }
            let mut emote_ids = Vec::with_capacity(declared);
            for _ in 0..declared {
                emote_ids.push(stream.read_uuid()?);
            }
            Ok(Packet::EmoteList {
                runtime_entity_id,
                emote_ids,
            })
        }
        _ => Err(DecodeError::UnknownPacketId { id }),
    }
}
