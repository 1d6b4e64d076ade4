use alloc::vec::Vec;

use crate::key::{KeyCacheKey, KeyMap};
use crate::offsets::OffsetTable;
use crate::{Align, ScrollAnchor, SizeStore, ViewportState, VirtualItem};

/// Keyed extents along one scroll axis: items for a list, rows for a grid.
///
/// Owns the per-index key table, the [`SizeStore`] and the derived [`OffsetTable`]. Every extent
/// written to the store is mirrored into the table before the next range computation.
#[derive(Clone, Debug)]
pub(crate) struct Track<K> {
    keys: Vec<K>,
    index_of: KeyMap<K, usize>,
    store: SizeStore<K>,
    table: OffsetTable,
}

impl<K: KeyCacheKey + Clone> Track<K> {
    pub(crate) fn new(estimated_size: u32, gap: u32) -> Self {
        Self {
            keys: Vec::new(),
            index_of: KeyMap::default(),
            store: SizeStore::new(estimated_size),
            table: OffsetTable::new(gap),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn table(&self) -> &OffsetTable {
        &self.table
    }

    pub(crate) fn store(&self) -> &SizeStore<K> {
        &self.store
    }

    pub(crate) fn key(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    pub(crate) fn index_of(&self, key: &K) -> Option<usize> {
        self.index_of.get(key).copied()
    }

    /// Replaces the key sequence. Extents follow keys, so measured items keep their size when
    /// they move. Duplicate keys resolve to their last index.
    pub(crate) fn set_keys(&mut self, keys: impl IntoIterator<Item = K>) {
        self.keys.clear();
        self.keys.extend(keys);
        self.index_of.clear();
        for (i, k) in self.keys.iter().enumerate() {
            if self.index_of.insert(k.clone(), i).is_some() {
                vwarn!(index = i, "duplicate item key; last occurrence wins");
            }
        }
        self.rebuild_extents();
    }

    pub(crate) fn rebuild_extents(&mut self) {
        let store = &self.store;
        self.table.rebuild(self.keys.iter().map(|k| store.get(k)));
    }

    pub(crate) fn set_gap(&mut self, gap: u32) {
        self.table.set_gap(gap);
    }

    pub(crate) fn set_estimated_size(&mut self, estimated_size: u32) {
        self.store.set_estimated_size(estimated_size);
        self.rebuild_extents();
    }

    pub(crate) fn touch(&mut self, key: K) {
        self.store.touch(key);
    }

    /// Forgets every measurement and installs a new key sequence.
    pub(crate) fn reset(&mut self, keys: impl IntoIterator<Item = K>) {
        self.store.clear();
        self.set_keys(keys);
    }

    /// Drops the stored extent of every key matching `forget`.
    pub(crate) fn forget(&mut self, mut forget: impl FnMut(&K) -> bool) {
        self.store.retain(|k| !forget(k));
        self.rebuild_extents();
    }

    pub(crate) fn clear_store(&mut self) {
        self.store.clear();
        self.rebuild_extents();
    }

    pub(crate) fn import(&mut self, entries: impl IntoIterator<Item = (K, u32)>) {
        self.store.import(entries);
        self.rebuild_extents();
    }

    pub(crate) fn evict_stale(&mut self) {
        let index_of = &self.index_of;
        self.store.retain(|k| index_of.contains_key(k));
    }

    pub(crate) fn item(&self, index: usize) -> Option<VirtualItem> {
        Some(VirtualItem {
            index,
            start: self.table.start(index)?,
            size: self.table.extent(index)?,
        })
    }

    /// Records measured extents and returns the scroll offset that keeps the entry covering
    /// `scroll_offset` at the same pixel position (or `scroll_offset` itself when `pin` is off).
    pub(crate) fn record_anchored(
        &mut self,
        scroll_offset: u64,
        pin: bool,
        measurements: impl IntoIterator<Item = (K, u32)>,
    ) -> u64 {
        let anchor = self
            .table
            .index_at(scroll_offset)
            .and_then(|i| Some((i, self.table.start(i)?)));

        let mut updates = Vec::new();
        for (key, extent) in measurements {
            self.store.record(key.clone(), extent);
            if let Some(index) = self.index_of(&key) {
                updates.push((index, extent));
            }
        }
        self.table.set_many(updates);
        self.repin(scroll_offset, pin, anchor)
    }

    /// Drops the measurement for `key` and returns the re-pinned scroll offset.
    pub(crate) fn invalidate_anchored(&mut self, scroll_offset: u64, pin: bool, key: &K) -> u64 {
        if !self.store.invalidate(key) {
            return scroll_offset;
        }
        let anchor = self
            .table
            .index_at(scroll_offset)
            .and_then(|i| Some((i, self.table.start(i)?)));
        if let Some(index) = self.index_of(key) {
            self.table.set(index, self.store.estimated_size());
        }
        self.repin(scroll_offset, pin, anchor)
    }

    fn repin(&self, scroll_offset: u64, pin: bool, anchor: Option<(usize, u64)>) -> u64 {
        let Some((index, old_start)) = anchor else {
            return scroll_offset;
        };
        if !pin {
            return scroll_offset;
        }
        let Some(new_start) = self.table.start(index) else {
            return scroll_offset;
        };
        let offset_in_viewport = scroll_offset.saturating_sub(old_start);
        new_start.saturating_add(offset_in_viewport)
    }

    pub(crate) fn capture_anchor(&self, scroll_offset: u64) -> Option<ScrollAnchor<K>> {
        let index = self.table.index_at(scroll_offset)?;
        let start = self.table.start(index)?;
        Some(ScrollAnchor {
            key: self.keys.get(index)?.clone(),
            offset_in_viewport: scroll_offset.saturating_sub(start),
        })
    }

    pub(crate) fn anchor_offset(&self, anchor: &ScrollAnchor<K>) -> Option<u64> {
        let index = self.index_of(&anchor.key)?;
        let start = self.table.start(index)?;
        Some(start.saturating_add(anchor.offset_in_viewport))
    }

    pub(crate) fn max_scroll_offset(&self, viewport_extent: u32) -> u64 {
        self.table.total().saturating_sub(viewport_extent as u64)
    }

    /// Offset that brings `index` into view with `align`, clamped to the scrollable range.
    pub(crate) fn scroll_to_offset(&self, index: usize, align: Align, viewport: ViewportState) -> u64 {
        let n = self.len();
        if n == 0 {
            return 0;
        }
        let Some(item) = self.item(index.min(n - 1)) else {
            return 0;
        };
        let view = viewport.viewport_extent as u64;
        let target = match align {
            Align::Start => item.start,
            Align::End => item.end().saturating_sub(view),
            Align::Center => item
                .start
                .saturating_add(item.size as u64 / 2)
                .saturating_sub(view / 2),
            Align::Auto => {
                let cur = viewport.scroll_offset;
                if item.start >= cur && item.end() <= viewport.end() {
                    cur
                } else if item.start < cur {
                    item.start
                } else {
                    item.end().saturating_sub(view)
                }
            }
        };
        target.min(self.max_scroll_offset(viewport.viewport_extent))
    }
}
