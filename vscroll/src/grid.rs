use alloc::vec::Vec;

use crate::key::{KeyCacheKey, KeyMap};
use crate::track::Track;
use crate::{
    Align, GridOptions, GridWindow, RangeCalculator, Rect, ScrollAnchor, ViewportState,
    VirtualRange, VirtualRow, Window,
};

/// A headless grid virtualizer that windows whole rows.
///
/// The column count comes from [`crate::ColumnBreakpoints`] and the viewport's cross extent, and
/// is re-resolved on every resize. Rows start at `estimated_row_height` and self-correct from
/// [`Self::measure_row`]. Because a new column count changes what each row holds, every row
/// measurement is dropped when the resolved column count changes.
#[derive(Clone, Debug)]
pub struct GridVirtualizer<K> {
    options: GridOptions,
    viewport: ViewportState,
    keys: Vec<K>,
    index_of: KeyMap<K, usize>,
    columns: usize,
    rows: Track<usize>,
}

fn row_count(count: usize, columns: usize) -> usize {
    count.div_ceil(columns.max(1))
}

impl<K: KeyCacheKey + Clone> GridVirtualizer<K> {
    pub fn new(options: GridOptions) -> Self {
        let rect = options.initial_rect.unwrap_or_default();
        let viewport = ViewportState {
            scroll_offset: options.initial_offset.resolve(),
            viewport_extent: rect.main,
            cross_extent: rect.cross,
        };
        let columns = options.columns.resolve(rect.cross);
        vdebug!(
            estimated_row_height = options.estimated_row_height,
            columns,
            overscan = options.overscan,
            "GridVirtualizer::new"
        );
        Self {
            rows: Track::new(options.estimated_row_height, options.gap),
            viewport,
            keys: Vec::new(),
            index_of: KeyMap::default(),
            columns,
            options,
        }
    }

    pub fn with_keys(options: GridOptions, keys: impl IntoIterator<Item = K>) -> Self {
        let mut v = Self::new(options);
        v.set_keys(keys);
        v
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn count(&self) -> usize {
        self.keys.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Replaces the item sequence. With anchor correction on, the first item of the top row
    /// stays in view when it is still present.
    ///
    /// Row measurements describe what a row held when it was measured, so every row from the
    /// first changed index onward falls back to the estimate. Appends keep all full rows.
    pub fn set_keys(&mut self, keys: impl IntoIterator<Item = K>) {
        let anchor = if self.options.anchor_correction {
            self.capture_anchor()
        } else {
            None
        };

        let old = core::mem::take(&mut self.keys);
        self.keys.extend(keys);
        let first_changed = old
            .iter()
            .zip(&self.keys)
            .position(|(a, b)| a != b)
            .unwrap_or(old.len().min(self.keys.len()));
        let unchanged = old.len() == self.keys.len() && first_changed == old.len();
        self.index_of.clear();
        for (i, k) in self.keys.iter().enumerate() {
            if self.index_of.insert(k.clone(), i).is_some() {
                vwarn!(index = i, "duplicate item key; last occurrence wins");
            }
        }
        self.rows
            .set_keys(0..row_count(self.keys.len(), self.columns));
        if !unchanged {
            let first_row = first_changed / self.columns.max(1);
            self.rows.forget(|&row| row >= first_row);
        }
        vtrace!(
            count = self.keys.len(),
            rows = self.rows.len(),
            "GridVirtualizer::set_keys"
        );

        if let Some(anchor) = anchor {
            self.apply_anchor(&anchor);
        }
    }

    pub fn key_for(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    pub fn index_of_key(&self, key: &K) -> Option<usize> {
        self.index_of.get(key).copied()
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn scroll_offset(&self) -> u64 {
        self.viewport.scroll_offset
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

    /// Applies container geometry and re-resolves the column count from `rect.cross`.
    pub fn set_rect(&mut self, rect: Rect) {
        self.viewport.viewport_extent = rect.main;
        self.set_cross_extent(rect.cross);
    }

    pub fn set_viewport(&mut self, viewport: ViewportState) {
        self.viewport.scroll_offset = viewport.scroll_offset;
        self.viewport.viewport_extent = viewport.viewport_extent;
        self.set_cross_extent(viewport.cross_extent);
    }

    fn set_cross_extent(&mut self, cross: u32) {
        self.viewport.cross_extent = cross;
        let columns = self.options.columns.resolve(cross);
        if columns != self.columns {
            self.relayout(columns);
        }
    }

    fn relayout(&mut self, columns: usize) {
        let anchor = if self.options.anchor_correction {
            self.capture_anchor()
        } else {
            None
        };
        vdebug!(
            from = self.columns,
            to = columns,
            measured_rows = self.rows.store().measured_len(),
            "column count changed; dropping row measurements"
        );
        self.columns = columns;
        self.rows.reset(0..row_count(self.keys.len(), columns));
        if let Some(anchor) = anchor {
            self.apply_anchor(&anchor);
        }
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
    }

    pub fn set_gap(&mut self, gap: u32) {
        self.options.gap = gap;
        self.rows.set_gap(gap);
    }

    pub fn set_estimated_row_height(&mut self, estimated_row_height: u32) {
        self.options.estimated_row_height = estimated_row_height;
        self.rows.set_estimated_size(estimated_row_height);
    }

    pub fn set_columns(&mut self, columns: crate::ColumnBreakpoints) {
        self.options.columns = columns;
        let resolved = columns.resolve(self.viewport.cross_extent);
        if resolved != self.columns {
            self.relayout(resolved);
        }
    }

    pub fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }

    /// Item indexes held by `row`.
    pub fn row_items(&self, row: usize) -> Option<VirtualRange> {
        let n = self.keys.len();
        let start_index = row.checked_mul(self.columns)?;
        if start_index >= n {
            return None;
        }
        Some(VirtualRange {
            start_index,
            end_index: (start_index + self.columns - 1).min(n - 1),
        })
    }

    pub fn window(&self) -> GridWindow {
        self.window_for(self.viewport)
    }

    /// Computes the row window for `viewport` using the current column count.
    pub fn window_for(&self, viewport: ViewportState) -> GridWindow {
        let rows: Window =
            RangeCalculator::new(self.options.overscan).compute(self.rows.table(), viewport);
        let items = rows.rendered.and_then(|r| {
            let first = self.row_items(r.start_index)?;
            let last = self.row_items(r.end_index)?;
            Some(VirtualRange {
                start_index: first.start_index,
                end_index: last.end_index,
            })
        });
        GridWindow {
            rows,
            items,
            columns: self.columns,
        }
    }

    pub fn total_extent(&self) -> u64 {
        self.rows.table().total()
    }

    pub fn row(&self, row: usize) -> Option<VirtualRow> {
        let item = self.rows.item(row)?;
        Some(VirtualRow {
            row,
            start: item.start,
            size: item.size,
            items: self.row_items(row)?,
        })
    }

    pub fn item_start(&self, index: usize) -> Option<u64> {
        if index >= self.keys.len() {
            return None;
        }
        self.rows.table().start(self.row_of(index))
    }

    pub fn is_row_measured(&self, row: usize) -> bool {
        self.rows.store().is_measured(&row)
    }

    /// Calls `f` for every rendered row (visible plus overscan), in order.
    pub fn for_each_virtual_row(&self, mut f: impl FnMut(VirtualRow)) {
        let Some(rendered) = self.window().rows.rendered else {
            return;
        };
        for r in rendered.iter() {
            if let Some(row) = self.row(r) {
                f(row);
            }
        }
    }

    /// Records the measured extent of `row`. Returns the scroll correction applied.
    ///
    /// The measurement holds until the row's contents change: a new column count drops every
    /// row, and [`Self::set_keys`] drops the rows from the first changed item onward.
    pub fn measure_row(&mut self, row: usize, extent: u32) -> i64 {
        self.measure_rows([(row, extent)])
    }

    pub fn measure_rows(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) -> i64 {
        let rows = self.rows.len();
        let prev = self.viewport.scroll_offset;
        let next = self.rows.record_anchored(
            prev,
            self.options.anchor_correction,
            measurements.into_iter().filter(|&(row, _)| row < rows),
        );
        self.viewport.scroll_offset = next;
        next as i64 - prev as i64
    }

    pub fn invalidate_row(&mut self, row: usize) -> i64 {
        let prev = self.viewport.scroll_offset;
        let next = self
            .rows
            .invalidate_anchored(prev, self.options.anchor_correction, &row);
        self.viewport.scroll_offset = next;
        next as i64 - prev as i64
    }

    pub fn touch_row(&mut self, row: usize) {
        self.rows.touch(row);
    }

    pub fn measured_row_count(&self) -> usize {
        self.rows.store().measured_len()
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.rows.max_scroll_offset(self.viewport.viewport_extent)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Offset that brings the row holding item `index` into view.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        let n = self.keys.len();
        if n == 0 {
            return 0;
        }
        let row = self.row_of(index.min(n - 1));
        self.rows.scroll_to_offset(row, align, self.viewport)
    }

    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.viewport.scroll_offset = offset;
        offset
    }

    /// Captures the first item of the row at the top of the viewport.
    pub fn capture_anchor(&self) -> Option<ScrollAnchor<K>> {
        let row = self.rows.table().index_at(self.viewport.scroll_offset)?;
        let start = self.rows.table().start(row)?;
        let index = self.row_items(row)?.start_index;
        Some(ScrollAnchor {
            key: self.keys.get(index)?.clone(),
            offset_in_viewport: self.viewport.scroll_offset.saturating_sub(start),
        })
    }

    /// Scrolls so the anchor item's row is back at its captured position. The in-row offset is
    /// capped at the row's current extent, since rows may have been rebuilt.
    pub fn apply_anchor(&mut self, anchor: &ScrollAnchor<K>) -> bool {
        let Some(index) = self.index_of_key(&anchor.key) else {
            return false;
        };
        let Some(row) = self.row(self.row_of(index)) else {
            return false;
        };
        let offset_in_row = anchor.offset_in_viewport.min(row.size as u64);
        self.set_scroll_offset_clamped(row.start.saturating_add(offset_in_row));
        true
    }
}
