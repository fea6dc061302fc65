//! Decode ceilings for wire-supplied lengths.
//!
//! These are protocol constants, not tunables: peers agree on them, so
//! they are not part of any configuration surface. Skin sub-lists clamp
//! silently to their ceiling; the emote piece list fails hard instead.
//! Both checks run before any proportional allocation.

/// Hard ceiling on the piece id list of an emote-list message.
pub const MAX_EMOTE_PIECES: usize = 1000;

/// Silent clamp applied to every skin sub-list count (animations,
/// persona pieces, piece tints, tint colors).
pub const MAX_SKIN_LIST_ENTRIES: i32 = 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceilings_are_sane() {
        assert!(MAX_EMOTE_PIECES >= 100);
        assert!(MAX_SKIN_LIST_ENTRIES >= 100);
    }
}
