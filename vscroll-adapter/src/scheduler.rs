/// Clock and frame requests injected into the controller.
///
/// The controller never sleeps or spawns timers. It reads `now_ms` and asks the host to call back:
/// `request_tick` for a debounce deadline and `request_after_paint` once rendered items can be
/// measured. A browser maps these to `setTimeout` / `requestAnimationFrame`, a TUI to its event
/// loop timeout, and tests to [`ManualScheduler`].
pub trait Scheduler {
    fn now_ms(&self) -> u64;

    /// Asks for `tick()` to be called at or after `at_ms`.
    fn request_tick(&mut self, at_ms: u64);

    /// Asks for `after_paint()` to be called once the next frame has been painted.
    fn request_after_paint(&mut self);
}

/// A deterministic scheduler whose clock only moves when told to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    now_ms: u64,
    tick_at: Option<u64>,
    after_paint: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }

    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    /// Earliest requested tick, if any.
    pub fn pending_tick(&self) -> Option<u64> {
        self.tick_at
    }

    pub fn is_tick_due(&self) -> bool {
        self.tick_at.is_some_and(|at| at <= self.now_ms)
    }

    /// Consumes the tick request when it is due.
    pub fn take_due_tick(&mut self) -> bool {
        if self.is_tick_due() {
            self.tick_at = None;
            true
        } else {
            false
        }
    }

    pub fn after_paint_requested(&self) -> bool {
        self.after_paint
    }

    pub fn take_after_paint(&mut self) -> bool {
        core::mem::take(&mut self.after_paint)
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn request_tick(&mut self, at_ms: u64) {
        self.tick_at = Some(self.tick_at.map_or(at_ms, |t| t.min(at_ms)));
    }

    fn request_after_paint(&mut self) {
        self.after_paint = true;
    }
}

/// Coalesces bursts of events into one update per window.
///
/// The window opens on the first event of a burst and its deadline is fixed there: later events
/// only replace the pending value. A continuous stream therefore still produces an update every
/// `window_ms` instead of being postponed until it stops.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    window_ms: u64,
    pending: Option<T>,
    deadline: Option<u64>,
}

impl<T> Debouncer<T> {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            pending: None,
            deadline: None,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn set_window_ms(&mut self, window_ms: u64) {
        self.window_ms = window_ms;
    }

    /// Stores `value` as the pending update. Returns the deadline when this event opened a new
    /// burst, so the caller can schedule a tick for it.
    pub fn push(&mut self, value: T, now_ms: u64) -> Option<u64> {
        self.pending = Some(value);
        if self.deadline.is_some() {
            return None;
        }
        let deadline = now_ms.saturating_add(self.window_ms);
        self.deadline = Some(deadline);
        Some(deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    pub fn pending_mut(&mut self) -> Option<&mut T> {
        self.pending.as_mut()
    }

    /// Takes the pending value once its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match self.deadline {
            Some(deadline) if deadline <= now_ms => self.flush(),
            _ => None,
        }
    }

    /// Takes the pending value regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.deadline = None;
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
    }
}
