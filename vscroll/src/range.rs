use crate::offsets::OffsetTable;
use crate::{ViewportState, VirtualRange, Window};

/// Maps a viewport onto the visible and overscanned index ranges of an [`OffsetTable`].
///
/// The same calculation serves lists (one entry per item) and grids (one entry per row).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeCalculator {
    pub overscan: usize,
}

impl RangeCalculator {
    pub const fn new(overscan: usize) -> Self {
        Self { overscan }
    }

    /// Computes the window for `viewport`.
    ///
    /// - `visible.start_index` is the entry covering `scroll_offset`.
    /// - `visible.end_index` is the last entry starting at or before the viewport end.
    /// - `rendered` widens both bounds by `overscan`, clamped to `[0, n-1]`; budget cut off at a
    ///   boundary is not moved to the other side.
    /// - A zero `viewport_extent` (not laid out yet) yields a single visible entry so the first
    ///   paint still renders `overscan` neighbours instead of nothing.
    pub fn compute(&self, table: &OffsetTable, viewport: ViewportState) -> Window {
        let n = table.len();
        let Some(start) = table.index_at(viewport.scroll_offset) else {
            return Window::EMPTY;
        };

        let end = if viewport.viewport_extent == 0 {
            start
        } else {
            let after = table.first_starting_after(start, viewport.end());
            after.saturating_sub(1).clamp(start, n - 1)
        };

        let visible = VirtualRange {
            start_index: start,
            end_index: end,
        };
        Window {
            visible: Some(visible),
            rendered: Some(self.widen(visible, n)),
            total_extent: table.total(),
        }
    }

    fn widen(&self, visible: VirtualRange, n: usize) -> VirtualRange {
        VirtualRange {
            start_index: visible.start_index.saturating_sub(self.overscan),
            end_index: visible
                .end_index
                .saturating_add(self.overscan)
                .min(n - 1),
        }
    }
}
