use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::runtime::{FrameRequestId, FrameScheduler};

/// Progress reported for one accepted animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameTick {
    pub progress: f64,
    /// Set on the single frame that reaches progress 1.
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AnimationRun {
    start_ms: f64,
    duration_ms: f64,
    pending: Option<FrameRequestId>,
}

/// Time-based reveal progress with at most one active run.
///
/// The driver never owns the scheduler; callers pass it in so the chart can
/// share one scheduler between animation and resize handling.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationDriver {
    run: Option<AnimationRun>,
    progress: f64,
}

impl AnimationDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new run from progress 0, cancelling the previous run's frame
    /// before requesting the first frame of this one.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S, duration_ms: f64) {
        self.cancel(scheduler);
        self.progress = 0.0;
        let start_ms = scheduler.now_ms();
        let pending = scheduler.request_frame();
        trace!(start_ms, duration_ms, frame = pending.0, "animation run started");
        self.run = Some(AnimationRun {
            start_ms,
            duration_ms,
            pending: Some(pending),
        });
    }

    /// Ends any run and jumps to progress 1 without scheduling frames.
    pub fn complete<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.cancel(scheduler);
        self.progress = 1.0;
    }

    /// Resets progress to 0 and drops any run.
    pub fn reset<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.cancel(scheduler);
        self.progress = 0.0;
    }

    /// Handles a fired frame. Ids that do not belong to the active run
    /// return `None` and change nothing.
    pub fn on_frame<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        id: FrameRequestId,
        now_ms: f64,
    ) -> Option<FrameTick> {
        let run = self.run.as_mut()?;
        if run.pending != Some(id) {
            trace!(frame = id.0, "ignoring stale animation frame");
            return None;
        }
        run.pending = None;

        let raw = if run.duration_ms > 0.0 {
            (now_ms - run.start_ms) / run.duration_ms
        } else {
            1.0
        };
        let raw = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };
        self.progress = self.progress.max(raw);

        let finished = self.progress >= 1.0;
        if finished {
            self.run = None;
        } else {
            run.pending = Some(scheduler.request_frame());
        }
        trace!(frame = id.0, progress = self.progress, finished, "animation frame");
        Some(FrameTick {
            progress: self.progress,
            finished,
        })
    }

    /// Releases the pending frame, if any. Progress is kept.
    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(pending) = self.run.take().and_then(|run| run.pending) {
            scheduler.cancel_frame(pending);
        }
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameRequestId> {
        self.run.and_then(|run| run.pending)
    }
}
