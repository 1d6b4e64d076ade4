use alloc::vec::Vec;

use vscroll::{
    Align, GridVirtualizer, GridWindow, ListVirtualizer, Rect, ViewportState, Window,
};

use crate::EngineKey;

/// The virtualizer surface the [`crate::ScrollController`] drives.
///
/// Implemented for [`ListVirtualizer`] (measurements keyed by item key) and [`GridVirtualizer`]
/// (measurements keyed by row index).
pub trait Engine {
    /// Key that measurements and observation are expressed in.
    type Key: EngineKey;
    /// Range output, compared to tell whether a viewport update changed what is rendered.
    type Window: Copy + PartialEq;

    fn window(&self) -> Self::Window;
    fn viewport(&self) -> ViewportState;
    fn total_extent(&self) -> u64;

    /// Items per measured unit. Queued measurements are dropped when this changes.
    fn columns(&self) -> usize {
        1
    }

    fn set_rect(&mut self, rect: Rect);
    fn set_scroll(&mut self, viewport_extent: u32, scroll_offset: u64);

    /// Records a batch of measurements, returning the scroll correction applied.
    fn measure(&mut self, measurements: Vec<(Self::Key, u32)>) -> i64;
    fn touch(&mut self, key: Self::Key);

    fn scroll_to_index(&mut self, index: usize, align: Align) -> u64;
}

impl<K: EngineKey> Engine for ListVirtualizer<K> {
    type Key = K;
    type Window = Window;

    fn window(&self) -> Window {
        ListVirtualizer::window(self)
    }

    fn viewport(&self) -> ViewportState {
        ListVirtualizer::viewport(self)
    }

    fn total_extent(&self) -> u64 {
        ListVirtualizer::total_extent(self)
    }

    fn set_rect(&mut self, rect: Rect) {
        ListVirtualizer::set_rect(self, rect);
    }

    fn set_scroll(&mut self, viewport_extent: u32, scroll_offset: u64) {
        self.set_viewport_and_scroll(viewport_extent, scroll_offset);
    }

    fn measure(&mut self, measurements: Vec<(K, u32)>) -> i64 {
        self.measure_keys(measurements)
    }

    fn touch(&mut self, key: K) {
        ListVirtualizer::touch(self, key);
    }

    fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        ListVirtualizer::scroll_to_index(self, index, align)
    }
}

impl<K: EngineKey> Engine for GridVirtualizer<K> {
    type Key = usize;
    type Window = GridWindow;

    fn window(&self) -> GridWindow {
        GridVirtualizer::window(self)
    }

    fn viewport(&self) -> ViewportState {
        GridVirtualizer::viewport(self)
    }

    fn total_extent(&self) -> u64 {
        GridVirtualizer::total_extent(self)
    }

    fn columns(&self) -> usize {
        GridVirtualizer::columns(self)
    }

    fn set_rect(&mut self, rect: Rect) {
        GridVirtualizer::set_rect(self, rect);
    }

    fn set_scroll(&mut self, viewport_extent: u32, scroll_offset: u64) {
        self.set_viewport_extent(viewport_extent);
        self.set_scroll_offset(scroll_offset);
    }

    fn measure(&mut self, measurements: Vec<(usize, u32)>) -> i64 {
        self.measure_rows(measurements)
    }

    fn touch(&mut self, row: usize) {
        self.touch_row(row);
    }

    fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        GridVirtualizer::scroll_to_index(self, index, align)
    }
}
