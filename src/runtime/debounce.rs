use crate::core::Viewport;

/// Coalesces bursts of size notifications into one relayout.
///
/// Every `notify` replaces the pending size and pushes the deadline to
/// `now + delay`; `poll` hands the size out once, after the deadline.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDebouncer {
    delay_ms: f64,
    pending: Option<(Viewport, f64)>,
}

impl ResizeDebouncer {
    #[must_use]
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: sanitize_delay(delay_ms),
            pending: None,
        }
    }

    #[must_use]
    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    pub fn set_delay_ms(&mut self, delay_ms: f64) {
        self.delay_ms = sanitize_delay(delay_ms);
    }

    pub fn notify(&mut self, viewport: Viewport, now_ms: f64) {
        self.pending = Some((viewport, now_ms + self.delay_ms));
    }

    /// Returns the latest notified size once its deadline has passed.
    pub fn poll(&mut self, now_ms: f64) -> Option<Viewport> {
        match self.pending {
            Some((viewport, deadline)) if now_ms >= deadline => {
                self.pending = None;
                Some(viewport)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending notification, if any.
    #[must_use]
    pub fn deadline_ms(&self) -> Option<f64> {
        self.pending.map(|(_, deadline)| deadline)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

fn sanitize_delay(delay_ms: f64) -> f64 {
    if delay_ms.is_finite() {
        delay_ms.max(0.0)
    } else {
        0.0
    }
}
