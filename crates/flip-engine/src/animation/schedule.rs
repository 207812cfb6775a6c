//! Frame and timer primitives the engines schedule work on.
//!
//! The engines never own a real frame callback. Each one keeps a
//! `FrameQueue` of tasks and the host pumps it once per paint preparation:
//!
//! ```text
//! trigger()            request(Invert)
//! frame #1   ──────▶   take_due() → [Invert]   read all, write all, request(Play)
//! frame #2   ──────▶   take_due() → [Play]     clear transforms
//! ```
//!
//! Tasks requested while a frame is being processed land in the next frame.
//! `Debouncer` coalesces bursts (viewport resize) into one trailing call
//! after a quiet window, measured on a pluggable `Clock`.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

/// Handle returned by [`FrameQueue::request`], used to cancel the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Tasks waiting for the next frame callback.
#[derive(Debug)]
pub struct FrameQueue<T> {
    pending: VecDeque<(FrameHandle, T)>,
    next_handle: u64,
    requested: u64,
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
            next_handle: 0,
            requested: 0,
        }
    }
}

impl<T> FrameQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` for the next frame.
    pub fn request(&mut self, task: T) -> FrameHandle {
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.requested += 1;
        self.pending.push_back((handle, task));
        handle
    }

    /// Drop a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(h, _)| *h != handle);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Everything due this frame, in request order.
    pub fn take_due(&mut self) -> Vec<T> {
        self.pending.drain(..).map(|(_, task)| task).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of tasks ever requested, including cancelled ones.
    pub fn requested_count(&self) -> u64 {
        self.requested
    }
}

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: f64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

/// Trailing-edge debounce: fires once `window_ms` after the last request.
#[derive(Debug)]
pub struct Debouncer<C: Clock> {
    clock: C,
    window_ms: f64,
    deadline: Option<f64>,
}

impl<C: Clock> Debouncer<C> {
    pub fn new(clock: C, window_ms: f64) -> Self {
        Self {
            clock,
            window_ms: window_ms.max(0.0),
            deadline: None,
        }
    }

    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    /// Takes effect on the next `request`.
    pub fn set_window_ms(&mut self, window_ms: f64) {
        self.window_ms = window_ms.max(0.0);
    }

    /// Restart the quiet window.
    pub fn request(&mut self) {
        self.deadline = Some(self.clock.now_ms() + self.window_ms);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time until the pending call fires, if any.
    pub fn remaining_ms(&self) -> Option<f64> {
        self.deadline
            .map(|deadline| (deadline - self.clock.now_ms()).max(0.0))
    }

    /// Returns true exactly once when the quiet window has elapsed.
    pub fn poll(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if self.clock.now_ms() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
