use alloc::vec::Vec;
use core::fmt;

use vscroll::{Align, KeySet, Rect};

use crate::{Debouncer, Engine, MeasurementProvider, Scheduler};

/// Debounce window applied to scroll and resize bursts unless configured otherwise.
pub const DEFAULT_DEBOUNCE_MS: u64 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Detached,
    Attached,
    Disposed,
}

/// A framework-neutral controller that wraps an [`Engine`] and turns raw host events into
/// debounced viewport updates and batched measurement write-backs.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `attach(rect)` once the scroll container exists
/// - `on_scroll` / `on_resize` when UI events occur
/// - `tick()` when the scheduler's requested tick is due
/// - `report_item_size` from the measurement callback, then `after_paint()` after the frame
///
/// Until `attach` (and after `detach` or `dispose`) every event is ignored.
pub struct ScrollController<E, S, M>
where
    E: Engine,
    S: Scheduler,
    M: MeasurementProvider<E::Key>,
{
    engine: E,
    scheduler: S,
    provider: M,
    lifecycle: Lifecycle,
    scroll: Debouncer<(u64, u32)>,
    resize: Debouncer<Rect>,
    measurements: Vec<(E::Key, u32)>,
    observed: KeySet<E::Key>,
}

impl<E, S, M> ScrollController<E, S, M>
where
    E: Engine,
    S: Scheduler,
    M: MeasurementProvider<E::Key>,
{
    pub fn new(engine: E, scheduler: S, provider: M) -> Self {
        Self {
            engine,
            scheduler,
            provider,
            lifecycle: Lifecycle::Detached,
            scroll: Debouncer::new(DEFAULT_DEBOUNCE_MS),
            resize: Debouncer::new(DEFAULT_DEBOUNCE_MS),
            measurements: Vec::new(),
            observed: KeySet::default(),
        }
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.scroll.set_window_ms(debounce_ms);
        self.resize.set_window_ms(debounce_ms);
        self
    }

    pub fn debounce_ms(&self) -> u64 {
        self.scroll.window_ms()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn provider(&self) -> &M {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut M {
        &mut self.provider
    }

    pub fn is_attached(&self) -> bool {
        self.lifecycle == Lifecycle::Attached
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }

    /// True from the first scroll event of a burst until the burst has been applied.
    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_pending()
    }

    /// Binds the controller to a laid-out container. Returns `false` after `dispose`.
    pub fn attach(&mut self, rect: Rect) -> bool {
        match self.lifecycle {
            Lifecycle::Disposed => false,
            Lifecycle::Attached | Lifecycle::Detached => {
                self.lifecycle = Lifecycle::Attached;
                self.set_rect(rect);
                vdebug!(main = rect.main, cross = rect.cross, "attach");
                true
            }
        }
    }

    /// Stops reacting to events and cancels pending debounced updates.
    pub fn detach(&mut self) {
        if self.lifecycle == Lifecycle::Attached {
            self.lifecycle = Lifecycle::Detached;
        }
        self.scroll.cancel();
        self.resize.cancel();
    }

    /// Reports a scroll event. Returns `false` when the event was ignored.
    pub fn on_scroll(&mut self, scroll_offset: u64, viewport_extent: u32) -> bool {
        if !self.is_attached() {
            return false;
        }
        let now = self.scheduler.now_ms();
        if let Some(deadline) = self.scroll.push((scroll_offset, viewport_extent), now) {
            self.scheduler.request_tick(deadline);
        }
        vtrace!(scroll_offset, viewport_extent, "on_scroll");
        true
    }

    /// Reports a container resize. Returns `false` when the event was ignored.
    pub fn on_resize(&mut self, rect: Rect) -> bool {
        if !self.is_attached() {
            return false;
        }
        let now = self.scheduler.now_ms();
        if let Some(deadline) = self.resize.push(rect, now) {
            self.scheduler.request_tick(deadline);
        }
        true
    }

    /// Applies viewport updates whose debounce window has elapsed.
    ///
    /// Returns `true` when the rendered window changed and the host should render again.
    pub fn tick(&mut self) -> bool {
        if !self.is_attached() {
            return false;
        }
        let now = self.scheduler.now_ms();
        let resize = self.resize.poll(now);
        let scroll = self.scroll.poll(now);
        let changed = self.apply(resize, scroll);

        let next = [self.resize.deadline(), self.scroll.deadline()]
            .into_iter()
            .flatten()
            .min();
        if let Some(at) = next {
            self.scheduler.request_tick(at);
        }
        changed
    }

    /// Applies pending viewport updates now, ignoring the debounce window.
    pub fn flush(&mut self) -> bool {
        if !self.is_attached() {
            return false;
        }
        let resize = self.resize.flush();
        let scroll = self.scroll.flush();
        self.apply(resize, scroll)
    }

    /// Row measurements queued under another column count would land on rows that now hold
    /// different items.
    fn set_rect(&mut self, rect: Rect) {
        let columns = self.engine.columns();
        self.engine.set_rect(rect);
        if self.engine.columns() != columns {
            self.discard_measurements();
        }
    }

    fn apply(&mut self, resize: Option<Rect>, scroll: Option<(u64, u32)>) -> bool {
        if resize.is_none() && scroll.is_none() {
            return false;
        }
        let before = self.engine.window();
        if let Some(rect) = resize {
            self.set_rect(rect);
        }
        if let Some((offset, extent)) = scroll {
            self.engine.set_scroll(extent, offset);
        }
        self.engine.window() != before
    }

    /// Queues a measured extent. It is written to the engine by the next `after_paint`.
    pub fn report_item_size(&mut self, key: E::Key, extent: u32) -> bool {
        if !self.is_attached() {
            return false;
        }
        if self.measurements.is_empty() {
            self.scheduler.request_after_paint();
        }
        self.measurements.push((key, extent));
        true
    }

    /// Drops measurements queued since the last `after_paint`. Called when they no longer
    /// describe the current layout.
    pub fn discard_measurements(&mut self) {
        if !self.measurements.is_empty() {
            vdebug!(queued = self.measurements.len(), "discarding queued measurements");
            self.measurements.clear();
        }
    }

    /// Writes queued measurements to the engine in one batch.
    ///
    /// Returns the scroll correction the host must apply to its container, or `None` when the
    /// viewport did not move.
    pub fn after_paint(&mut self) -> Option<i64> {
        if !self.is_attached() || self.measurements.is_empty() {
            return None;
        }
        let batch = core::mem::take(&mut self.measurements);
        let correction = self.engine.measure(batch);
        if correction == 0 {
            return None;
        }
        // A scroll still in its debounce window was reported against the old layout.
        if let Some((offset, _)) = self.scroll.pending_mut() {
            *offset = offset.saturating_add_signed(correction);
        }
        vtrace!(correction, "after_paint correction");
        Some(correction)
    }

    /// Reconciles observation with the keys rendered by the latest pass.
    pub fn sync_rendered(&mut self, keys: impl IntoIterator<Item = E::Key>) {
        if self.is_disposed() {
            return;
        }
        let mut next = KeySet::default();
        for key in keys {
            if !self.observed.contains(&key) {
                self.provider.observe(&key);
            }
            self.engine.touch(key.clone());
            next.insert(key);
        }
        for key in self.observed.iter() {
            if !next.contains(key) {
                self.provider.unobserve(key);
            }
        }
        self.observed = next;
    }

    pub fn observed_len(&self) -> usize {
        self.observed.len()
    }

    /// Jumps to `index`, dropping any pending debounced scroll. Returns the offset for the host
    /// to apply to its container.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<u64> {
        if !self.is_attached() {
            return None;
        }
        if let Some(rect) = self.resize.flush() {
            self.set_rect(rect);
        }
        self.scroll.cancel();
        Some(self.engine.scroll_to_index(index, align))
    }

    /// Detaches, cancels pending work, drops queued measurements and stops observing every key.
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.detach();
        self.measurements.clear();
        for key in self.observed.iter() {
            self.provider.unobserve(key);
        }
        vdebug!(observed = self.observed.len(), "dispose");
        self.observed.clear();
        self.lifecycle = Lifecycle::Disposed;
    }
}

impl<E, S, M> Drop for ScrollController<E, S, M>
where
    E: Engine,
    S: Scheduler,
    M: MeasurementProvider<E::Key>,
{
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<E, S, M> fmt::Debug for ScrollController<E, S, M>
where
    E: Engine,
    S: Scheduler,
    M: MeasurementProvider<E::Key>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollController")
            .field("lifecycle", &self.lifecycle)
            .field("viewport", &self.engine.viewport())
            .field("is_scrolling", &self.is_scrolling())
            .field("queued_measurements", &self.measurements.len())
            .field("observed", &self.observed.len())
            .finish_non_exhaustive()
    }
}
