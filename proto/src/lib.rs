//! Versioned serialization of game packets and their building blocks.
//!
//! Every operation here takes the protocol number negotiated at login,
//! because the wire layout moved under the same packets release after
//! release: fields appear behind version gates, item ids pass through
//! a per-version runtime table, and skins switched formats wholesale
//! at protocol 388. One in-memory value per concept covers all
//! supported protocols; the gates pick what actually hits the wire.
//!
//! # Design principles
//!
//! - **Hostile input is the normal case.** Wire-declared counts are
//!   validated against the bytes remaining or a fixed ceiling before
//!   anything is allocated, and every rejection is a typed
//!   [`DecodeError`].
//! - **Lookup tables are injected.** Item id translation and the
//!   attribute registry come in as trait objects, so tests run against
//!   small fixed tables instead of a global registry.
//!
//! # Example
//!
//! ```
//! use bytestream::ByteStream;
//! use proto::{
//!     decode_packet, encode_packet, GameRuleValue, GameRules, Packet, StaticItemMap,
//!     VanillaAttributes, V1_16_100,
//! };
//!
//! let mut rules = GameRules::new();
//! rules.set("doDaylightCycle", GameRuleValue::Bool(false));
//! let packet = Packet::GameRulesChanged { rules };
//!
//! let items = StaticItemMap::new();
//! let mut stream = ByteStream::new();
//! encode_packet(&mut stream, V1_16_100, &packet, &items)?;
//!
//! let mut stream = ByteStream::from_vec(stream.into_vec());
//! let decoded = decode_packet(&mut stream, V1_16_100, &items, &VanillaAttributes)?;
//! assert_eq!(decoded, packet);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod attribute;
mod error;
mod item;
mod limits;
mod link;
mod mapping;
mod packet;
mod recipe;
mod rules;
mod skin;
mod version;

pub use attribute::{
    decode_attribute_list, encode_attribute_list, Attribute, AttributeRegistry, AttributeTemplate,
    VanillaAttributes,
};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult, LimitKind};
pub use item::{decode_item, encode_item, ids, ItemStack};
pub use limits::{MAX_EMOTE_PIECES, MAX_SKIN_LIST_ENTRIES};
pub use link::{
    decode_entity_link, encode_entity_link, EntityLink, LINK_DRIVER, LINK_PASSENGER, LINK_REMOVE,
};
pub use mapping::{ItemMapEntry, LegacyMapping, RuntimeItemMap, RuntimeMapping, StaticItemMap};
pub use packet::{decode_packet, encode_packet, Packet, PACKET_ID_MASK};
pub use recipe::{decode_recipe_ingredient, encode_recipe_ingredient};
pub use rules::{decode_game_rules, encode_game_rules, GameRuleValue, GameRules};
pub use skin::{
    decode_skin, encode_skin, PersonaPiece, PersonaPieceTint, Skin, SkinAnimation, SkinImage,
    DEFAULT_GEOMETRY_DATA, GEOMETRY_CUSTOM, GEOMETRY_CUSTOM_SLIM,
};
pub use version::{V1_12_0, V1_13_0, V1_14_0, V1_14_60, V1_16_0, V1_16_100, V1_16_210, V1_2_13};
