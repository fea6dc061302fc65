//! Legacy/runtime item id translation contract.
//!
//! From v1.16.100 the wire carries version-specific runtime item ids
//! instead of the stable legacy ids servers use internally. The table
//! that relates the two is data shipped outside this crate; the codecs
//! only query it through [`RuntimeItemMap`]. Items that were flattened
//! during the runtime id migration bind their damage value into the
//! mapping itself, so their wire form carries no inline meta.

/// Runtime identity of a legacy item on one protocol revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeMapping {
    /// Version-specific id written to the wire.
    pub runtime_id: i32,
    /// The mapping carries the damage value; inline meta is written as 0.
    pub absorbs_meta: bool,
}

/// Legacy identity recovered from a runtime id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyMapping {
    /// Stable id used internally.
    pub legacy_id: i32,
    /// Damage value bound into the mapping, when the item was flattened.
    pub meta: Option<i32>,
}

/// Injected lookup service for legacy/runtime item id translation.
///
/// Implementations are read-only; the codecs never mutate them. The
/// durability predicate decides whether an item's damage travels inside
/// the nested payload instead of the inline meta field.
pub trait RuntimeItemMap {
    /// Resolves the wire identity of a legacy item, or `None` when the
    /// id has no mapping on this protocol.
    fn to_runtime(&self, protocol: i32, legacy_id: i32, meta: Option<i32>)
        -> Option<RuntimeMapping>;

    /// Resolves the legacy identity of a wire id, or `None` when the
    /// runtime id is unknown on this protocol.
    fn to_legacy(&self, protocol: i32, runtime_id: i32) -> Option<LegacyMapping>;

    /// Whether the item kind carries its damage in the nested payload.
    fn is_durable(&self, legacy_id: i32) -> bool;
}

/// One row of a [`StaticItemMap`].
///
/// A row with `meta: Some(_)` binds that exact damage value to its own
/// runtime id; a row with `meta: None` is the wildcard for the legacy id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemMapEntry {
    pub legacy_id: i32,
    pub meta: Option<i32>,
    pub runtime_id: i32,
}

/// A fixed in-memory mapping table for a single protocol family.
///
/// Real servers load one table per supported revision from data files;
/// this implementation ignores the protocol argument and serves whatever
/// rows it was built with, which is also what tests want.
#[derive(Debug, Clone, Default)]
pub struct StaticItemMap {
    entries: Vec<ItemMapEntry>,
    durable: Vec<i32>,
}

impl StaticItemMap {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            durable: Vec::new(),
        }
    }

    /// Adds a mapping row.
    #[must_use]
    pub fn entry(mut self, legacy_id: i32, meta: Option<i32>, runtime_id: i32) -> Self {
        self.entries.push(ItemMapEntry {
            legacy_id,
            meta,
            runtime_id,
        });
        self
    }

    /// Marks a legacy id as a durable kind.
    #[must_use]
    pub fn durable(mut self, legacy_id: i32) -> Self {
        self.durable.push(legacy_id);
        self
    }
}

impl RuntimeItemMap for StaticItemMap {
    fn to_runtime(
        &self,
        _protocol: i32,
        legacy_id: i32,
        meta: Option<i32>,
    ) -> Option<RuntimeMapping> {
        // exact-meta rows win over the wildcard row
        if let Some(meta) = meta {
            if let Some(entry) = self
                .entries
                .iter()
                .find(|e| e.legacy_id == legacy_id && e.meta == Some(meta))
            {
                return Some(RuntimeMapping {
                    runtime_id: entry.runtime_id,
                    absorbs_meta: true,
                });
            }
        }
        self.entries
            .iter()
            .find(|e| e.legacy_id == legacy_id && e.meta.is_none())
            .map(|entry| RuntimeMapping {
                runtime_id: entry.runtime_id,
                absorbs_meta: false,
            })
    }

    fn to_legacy(&self, _protocol: i32, runtime_id: i32) -> Option<LegacyMapping> {
        self.entries
            .iter()
            .find(|e| e.runtime_id == runtime_id)
            .map(|entry| LegacyMapping {
                legacy_id: entry.legacy_id,
                meta: entry.meta,
            })
    }

    fn is_durable(&self, legacy_id: i32) -> bool {
        self.durable.contains(&legacy_id)
    }
}
