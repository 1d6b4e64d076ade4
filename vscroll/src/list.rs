use alloc::vec::Vec;

use crate::key::KeyCacheKey;
use crate::offsets::OffsetTable;
use crate::track::Track;
use crate::{
    Align, ListOptions, RangeCalculator, Rect, ScrollAnchor, SizeStore, ViewportState,
    VirtualItem, VirtualItemKeyed, Window,
};

/// A headless, single-axis list virtualizer.
///
/// The host owns the item sequence and hands the virtualizer one key per item (in order). The
/// virtualizer tracks extents per key, answers "which indexes are rendered and where", and keeps
/// the viewport stable while estimated extents are replaced by measured ones.
///
/// It holds no UI objects and never reads the clock: scroll and resize updates arrive through the
/// viewport setters, measurements through `measure*`.
#[derive(Clone, Debug)]
pub struct ListVirtualizer<K> {
    options: ListOptions,
    viewport: ViewportState,
    track: Track<K>,
}

impl<K: KeyCacheKey + Clone> ListVirtualizer<K> {
    /// Creates an empty virtualizer. Call [`Self::set_keys`] to provide the sequence.
    pub fn new(options: ListOptions) -> Self {
        let rect = options.initial_rect.unwrap_or_default();
        let viewport = ViewportState {
            scroll_offset: options.initial_offset.resolve(),
            viewport_extent: rect.main,
            cross_extent: rect.cross,
        };
        vdebug!(
            estimated_size = options.estimated_size,
            overscan = options.overscan,
            gap = options.gap,
            "ListVirtualizer::new"
        );
        Self {
            track: Track::new(options.estimated_size, options.gap),
            viewport,
            options,
        }
    }

    pub fn with_keys(options: ListOptions, keys: impl IntoIterator<Item = K>) -> Self {
        let mut v = Self::new(options);
        v.set_keys(keys);
        v
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn count(&self) -> usize {
        self.track.len()
    }

    /// Replaces the item sequence (one key per item, in order).
    ///
    /// Measured extents follow their keys. With anchor correction on, the item at the top of the
    /// viewport keeps its pixel position when it is still present, so prepends don't jump.
    pub fn set_keys(&mut self, keys: impl IntoIterator<Item = K>) {
        let anchor = if self.options.anchor_correction {
            self.track.capture_anchor(self.viewport.scroll_offset)
        } else {
            None
        };
        self.track.set_keys(keys);
        vtrace!(count = self.track.len(), "ListVirtualizer::set_keys");
        if let Some(anchor) = anchor {
            self.apply_anchor(&anchor);
        }
    }

    pub fn key_for(&self, index: usize) -> Option<&K> {
        self.track.key(index)
    }

    pub fn index_of_key(&self, key: &K) -> Option<usize> {
        self.track.index_of(key)
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn scroll_offset(&self) -> u64 {
        self.viewport.scroll_offset
    }

    pub fn viewport_extent(&self) -> u32 {
        self.viewport.viewport_extent
    }

    pub fn set_viewport(&mut self, viewport: ViewportState) {
        self.viewport = viewport;
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.viewport.scroll_offset = offset;
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        self.viewport.scroll_offset = self.clamp_scroll_offset(offset);
    }

    pub fn set_viewport_extent(&mut self, extent: u32) {
        self.viewport.viewport_extent = extent;
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.viewport.viewport_extent = rect.main;
        self.viewport.cross_extent = rect.cross;
    }

    /// Applies a scroll event: offset and viewport extent together.
    pub fn set_viewport_and_scroll(&mut self, viewport_extent: u32, scroll_offset: u64) {
        self.viewport.viewport_extent = viewport_extent;
        self.viewport.scroll_offset = scroll_offset;
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
    }

    pub fn set_gap(&mut self, gap: u32) {
        self.options.gap = gap;
        self.track.set_gap(gap);
    }

    pub fn set_estimated_size(&mut self, estimated_size: u32) {
        self.options.estimated_size = estimated_size;
        self.track.set_estimated_size(estimated_size);
    }

    pub fn set_anchor_correction(&mut self, anchor_correction: bool) {
        self.options.anchor_correction = anchor_correction;
    }

    /// Computes the current window.
    pub fn window(&self) -> Window {
        self.window_for(self.viewport)
    }

    /// Computes the window for an arbitrary viewport without changing state.
    pub fn window_for(&self, viewport: ViewportState) -> Window {
        RangeCalculator::new(self.options.overscan).compute(self.track.table(), viewport)
    }

    pub fn total_extent(&self) -> u64 {
        self.track.table().total()
    }

    pub fn offsets(&self) -> &OffsetTable {
        self.track.table()
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.track.table().index_at(offset)
    }

    pub fn item(&self, index: usize) -> Option<VirtualItem> {
        self.track.item(index)
    }

    pub fn item_start(&self, index: usize) -> Option<u64> {
        self.track.table().start(index)
    }

    pub fn item_size(&self, index: usize) -> Option<u32> {
        self.track.table().extent(index)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.track
            .key(index)
            .is_some_and(|k| self.track.store().is_measured(k))
    }

    /// Calls `f` for every rendered item (visible plus overscan), in index order.
    pub fn for_each_virtual_item(&self, mut f: impl FnMut(VirtualItem)) {
        let Some(rendered) = self.window().rendered else {
            return;
        };
        for i in rendered.iter() {
            if let Some(item) = self.track.item(i) {
                f(item);
            }
        }
    }

    pub fn for_each_virtual_item_keyed(&self, mut f: impl FnMut(VirtualItemKeyed<K>)) {
        self.for_each_virtual_item(|item| {
            if let Some(key) = self.track.key(item.index) {
                f(VirtualItemKeyed {
                    key: key.clone(),
                    index: item.index,
                    start: item.start,
                    size: item.size,
                });
            }
        });
    }

    /// Collects rendered items into `out` (clears `out` first).
    pub fn collect_virtual_items(&self, out: &mut Vec<VirtualItem>) {
        out.clear();
        self.for_each_virtual_item(|it| out.push(it));
    }

    /// Records the measured extent of the item at `index`.
    ///
    /// Returns the scroll correction applied to keep the topmost visible item in place (`0` when
    /// nothing above the viewport moved or anchor correction is off).
    pub fn measure(&mut self, index: usize, extent: u32) -> i64 {
        let Some(key) = self.track.key(index).cloned() else {
            return 0;
        };
        self.measure_keys([(key, extent)])
    }

    /// Records a measured extent by key. Keys that are not in the sequence are still cached.
    pub fn measure_key(&mut self, key: K, extent: u32) -> i64 {
        self.measure_keys([(key, extent)])
    }

    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) -> i64 {
        let keyed: Vec<(K, u32)> = measurements
            .into_iter()
            .filter_map(|(i, extent)| Some((self.track.key(i)?.clone(), extent)))
            .collect();
        self.measure_keys(keyed)
    }

    /// Records a batch of measurements with a single offset refresh and anchor correction.
    pub fn measure_keys(&mut self, measurements: impl IntoIterator<Item = (K, u32)>) -> i64 {
        let prev = self.viewport.scroll_offset;
        let next = self.track.record_anchored(
            prev,
            self.options.anchor_correction,
            measurements,
        );
        self.apply_correction(prev, next)
    }

    /// Forgets the measurement for `key` (its content changed shape); it reverts to the estimate.
    pub fn invalidate_key(&mut self, key: &K) -> i64 {
        let prev = self.viewport.scroll_offset;
        let next = self
            .track
            .invalidate_anchored(prev, self.options.anchor_correction, key);
        self.apply_correction(prev, next)
    }

    pub fn invalidate(&mut self, index: usize) -> i64 {
        let Some(key) = self.track.key(index).cloned() else {
            return 0;
        };
        self.invalidate_key(&key)
    }

    fn apply_correction(&mut self, prev: u64, next: u64) -> i64 {
        self.viewport.scroll_offset = next;
        let delta = next as i64 - prev as i64;
        if delta != 0 {
            vtrace!(prev, next, "anchor correction");
        }
        delta
    }

    /// Inserts an estimated size-store entry for a rendered key.
    pub fn touch(&mut self, key: K) {
        self.track.touch(key);
    }

    pub fn size_store(&self) -> &SizeStore<K> {
        self.track.store()
    }

    /// Drops size-store entries for keys no longer in the sequence.
    pub fn evict_stale(&mut self) {
        self.track.evict_stale();
    }

    pub fn reset_measurements(&mut self) {
        self.track.clear_store();
    }

    pub fn measurement_cache_len(&self) -> usize {
        self.track.store().measured_len()
    }

    pub fn export_measurement_cache(&self) -> Vec<(K, u32)> {
        self.track.store().export()
    }

    pub fn import_measurement_cache(&mut self, entries: impl IntoIterator<Item = (K, u32)>) {
        self.track.import(entries);
        vdebug!(
            measured = self.track.store().measured_len(),
            "import_measurement_cache"
        );
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.track.max_scroll_offset(self.viewport.viewport_extent)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        self.track.scroll_to_offset(index, align, self.viewport)
    }

    /// Jumps to `index` (no animation) and returns the applied offset.
    ///
    /// This is best effort: unmeasured items before `index` contribute their estimate, so the
    /// target may move once they are measured.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.viewport.scroll_offset = offset;
        offset
    }

    pub fn capture_anchor(&self) -> Option<ScrollAnchor<K>> {
        self.track.capture_anchor(self.viewport.scroll_offset)
    }

    /// Restores a previously captured anchor. Returns `false` when its key is gone.
    pub fn apply_anchor(&mut self, anchor: &ScrollAnchor<K>) -> bool {
        let Some(offset) = self.track.anchor_offset(anchor) else {
            return false;
        };
        self.set_scroll_offset_clamped(offset);
        true
    }
}
