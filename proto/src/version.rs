//! Protocol version gates.
//!
//! Historical client revisions are identified by their protocol number.
//! Each gate below changes field presence or encoding somewhere in the
//! codec family, never field meaning. Comparisons are always `>=` against
//! a gate; the gates are strictly ordered.

/// v1.2.13: capes join the legacy skin layout.
pub const V1_2_13: i32 = 223;

/// v1.12.0: item stacks move damage for durable items into the nested
/// payload and shields gain a trailing blocking tick.
pub const V1_12_0: i32 = 361;

/// v1.13.0: the rich skin layout replaces the legacy one, and the
/// player-skin message gains its trusted flag.
pub const V1_13_0: i32 = 388;

/// v1.14.0: honeycomb items exist; older clients get a placeholder.
pub const V1_14_0: i32 = 389;

/// v1.14.60: skins gain arm size, skin color, persona pieces and tints.
pub const V1_14_60: i32 = 390;

/// v1.16.0: entity links gain the rider-initiated flag; lodestone-era
/// item ids exist.
pub const V1_16_0: i32 = 407;

/// v1.16.100: item ids on the wire become version-specific runtime ids,
/// and skin animations gain an expression field.
pub const V1_16_100: i32 = 419;

/// v1.16.210: skins gain a PlayFab id.
pub const V1_16_210: i32 = 428;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gates_strictly_ordered() {
        let gates = [
            V1_2_13, V1_12_0, V1_13_0, V1_14_0, V1_14_60, V1_16_0, V1_16_100, V1_16_210,
        ];
        for pair in gates.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }
}
