use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use vscroll::{Align, ColumnBreakpoints, GridOptions, GridVirtualizer, Rect};

use crate::render::{GridPass, GridRenderer, KeyOf, RegionProps, RenderItem};
use crate::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_OVERSCAN, EngineKey, MeasurementProvider, ScrollController,
    Scheduler,
};

pub const DEFAULT_ESTIMATED_ROW_HEIGHT: u32 = 200;

/// Construction-time configuration for [`VirtualGrid`].
pub struct GridConfig<T, K, V> {
    pub key_of: KeyOf<T, K>,
    pub render_item: RenderItem<T, V>,
    pub estimated_row_height: u32,
    pub gap: u32,
    pub overscan: usize,
    pub columns: ColumnBreakpoints,
    pub initial_offset: u64,
    pub anchor_correction: bool,
    pub class_name: String,
    pub aria_label: String,
    pub debounce_ms: u64,
}

impl<T, K, V> Clone for GridConfig<T, K, V> {
    fn clone(&self) -> Self {
        Self {
            key_of: Arc::clone(&self.key_of),
            render_item: Arc::clone(&self.render_item),
            estimated_row_height: self.estimated_row_height,
            gap: self.gap,
            overscan: self.overscan,
            columns: self.columns,
            initial_offset: self.initial_offset,
            anchor_correction: self.anchor_correction,
            class_name: self.class_name.clone(),
            aria_label: self.aria_label.clone(),
            debounce_ms: self.debounce_ms,
        }
    }
}

impl<T, K, V> fmt::Debug for GridConfig<T, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridConfig")
            .field("estimated_row_height", &self.estimated_row_height)
            .field("gap", &self.gap)
            .field("overscan", &self.overscan)
            .field("columns", &self.columns)
            .field("class_name", &self.class_name)
            .field("aria_label", &self.aria_label)
            .field("debounce_ms", &self.debounce_ms)
            .finish_non_exhaustive()
    }
}

impl<T, K, V> GridConfig<T, K, V> {
    pub fn new(
        key_of: impl Fn(&T) -> K + Send + Sync + 'static,
        render_item: impl Fn(&T, usize) -> V + Send + Sync + 'static,
    ) -> Self {
        Self {
            key_of: Arc::new(key_of),
            render_item: Arc::new(render_item),
            estimated_row_height: DEFAULT_ESTIMATED_ROW_HEIGHT,
            gap: 0,
            overscan: DEFAULT_OVERSCAN,
            columns: ColumnBreakpoints::default(),
            initial_offset: 0,
            anchor_correction: true,
            class_name: String::new(),
            aria_label: String::new(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    pub fn with_estimated_row_height(mut self, estimated_row_height: u32) -> Self {
        self.estimated_row_height = estimated_row_height;
        self
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_columns(mut self, columns: ColumnBreakpoints) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: u64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_anchor_correction(mut self, anchor_correction: bool) -> Self {
        self.anchor_correction = anchor_correction;
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_aria_label(mut self, aria_label: impl Into<String>) -> Self {
        self.aria_label = aria_label.into();
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn grid_options(&self) -> GridOptions {
        GridOptions::new(self.estimated_row_height, self.columns)
            .with_gap(self.gap)
            .with_overscan(self.overscan)
            .with_initial_offset_value(self.initial_offset)
            .with_anchor_correction(self.anchor_correction)
    }
}

/// A virtualized grid handle. Measurements are reported per row (`report_row_size`).
pub struct VirtualGrid<T, K, V, S, M>
where
    K: EngineKey,
    S: Scheduler,
    M: MeasurementProvider<usize>,
{
    controller: ScrollController<GridVirtualizer<K>, S, M>,
    renderer: GridRenderer<T, K, V>,
}

impl<T, K, V, S, M> VirtualGrid<T, K, V, S, M>
where
    K: EngineKey,
    S: Scheduler,
    M: MeasurementProvider<usize>,
{
    pub fn create(config: GridConfig<T, K, V>, items: &[T], scheduler: S, provider: M) -> Self {
        let options = config.grid_options();
        let engine = GridVirtualizer::with_keys(options, items.iter().map(|it| (config.key_of)(it)));
        vdebug!(count = items.len(), "VirtualGrid::create");
        let controller =
            ScrollController::new(engine, scheduler, provider).with_debounce_ms(config.debounce_ms);
        let renderer = GridRenderer::new(
            config.key_of,
            config.render_item,
            RegionProps {
                class_name: config.class_name,
                aria_label: config.aria_label,
            },
        );
        Self {
            controller,
            renderer,
        }
    }

    pub fn controller(&self) -> &ScrollController<GridVirtualizer<K>, S, M> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ScrollController<GridVirtualizer<K>, S, M> {
        &mut self.controller
    }

    pub fn virtualizer(&self) -> &GridVirtualizer<K> {
        self.controller.engine()
    }

    pub fn attach(&mut self, rect: Rect) -> bool {
        self.controller.attach(rect)
    }

    pub fn detach(&mut self) {
        self.controller.detach();
    }

    pub fn on_scroll(&mut self, scroll_offset: u64, viewport_extent: u32) -> bool {
        self.controller.on_scroll(scroll_offset, viewport_extent)
    }

    pub fn on_resize(&mut self, rect: Rect) -> bool {
        self.controller.on_resize(rect)
    }

    pub fn tick(&mut self) -> bool {
        self.controller.tick()
    }

    pub fn flush(&mut self) -> bool {
        self.controller.flush()
    }

    /// Queues the measured height of `row` for the next `after_paint`.
    pub fn report_row_size(&mut self, row: usize, extent: u32) -> bool {
        self.controller.report_item_size(row, extent)
    }

    pub fn after_paint(&mut self) -> Option<i64> {
        self.controller.after_paint()
    }

    pub fn is_scrolling(&self) -> bool {
        self.controller.is_scrolling()
    }

    /// Re-reads keys from `items`. Queued row reports are dropped, since rows may now hold
    /// different items.
    pub fn sync_items(&mut self, items: &[T]) {
        let renderer = &self.renderer;
        self.controller
            .engine_mut()
            .set_keys(items.iter().map(|it| renderer.key_of(it)));
        self.controller.discard_measurements();
    }

    /// Whether `items` yields exactly the engine's keys, in order. Checks the whole slice: a
    /// reorder outside the window still moves the window's offsets.
    fn is_synced(&self, items: &[T]) -> bool {
        let engine = self.controller.engine();
        items.len() == engine.count()
            && items
                .iter()
                .enumerate()
                .all(|(i, it)| engine.key_for(i) == Some(&self.renderer.key_of(it)))
    }

    /// Produces the current render pass, resyncing first when the keys in `items` changed.
    pub fn render(&mut self, items: &[T]) -> GridPass<K, V> {
        if !self.is_synced(items) {
            self.sync_items(items);
        }
        let pass = self.renderer.pass(items, self.controller.engine());
        self.controller
            .sync_rendered(pass.rows.iter().map(|r| r.row));
        pass
    }

    /// Scrolls the row holding item `index` into view.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<u64> {
        self.controller.scroll_to_index(index, align)
    }

    pub fn dispose(&mut self) {
        self.controller.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.controller.is_disposed()
    }
}

impl<T, K, V, S, M> fmt::Debug for VirtualGrid<T, K, V, S, M>
where
    K: EngineKey + fmt::Debug,
    S: Scheduler,
    M: MeasurementProvider<usize>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualGrid")
            .field("controller", &self.controller)
            .field("renderer", &self.renderer)
            .finish()
    }
}
