use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Handle of one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameRequestId(pub u64);

/// Host frame clock.
///
/// `request_frame` asks for one callback on the next display frame; the host
/// then calls `LineChart::on_frame` with the returned id.
pub trait FrameScheduler {
    /// Monotonic time in milliseconds.
    fn now_ms(&self) -> f64;

    fn request_frame(&mut self) -> FrameRequestId;

    /// Cancelling an id that already fired or was cancelled is a no-op.
    fn cancel_frame(&mut self, id: FrameRequestId);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for Box<T> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }

    fn request_frame(&mut self) -> FrameRequestId {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        (**self).cancel_frame(id);
    }
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }

    fn request_frame(&mut self) -> FrameRequestId {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        (**self).cancel_frame(id);
    }
}

/// Deterministic scheduler driven by the caller, used by tests and headless
/// hosts.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameScheduler {
    now_ms: f64,
    next_id: u64,
    pending: BTreeSet<FrameRequestId>,
    requested_total: usize,
    cancelled_total: usize,
}

impl ManualFrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_now(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    pub fn advance(&mut self, delta_ms: f64) {
        self.now_ms += delta_ms;
    }

    /// Pending requests in request order.
    #[must_use]
    pub fn pending(&self) -> Vec<FrameRequestId> {
        self.pending.iter().copied().collect()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Removes and returns the oldest pending request, as if it fired.
    pub fn fire_next(&mut self) -> Option<FrameRequestId> {
        self.pending.pop_first()
    }

    #[must_use]
    pub fn requested_total(&self) -> usize {
        self.requested_total
    }

    #[must_use]
    pub fn cancelled_total(&self) -> usize {
        self.cancelled_total
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn request_frame(&mut self) -> FrameRequestId {
        self.next_id += 1;
        let id = FrameRequestId(self.next_id);
        self.pending.insert(id);
        self.requested_total += 1;
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        if self.pending.remove(&id) {
            self.cancelled_total += 1;
        }
    }
}
