use tracing::debug;

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{RasterSurface, VectorSurface};
use crate::runtime::FrameScheduler;

use super::LineChart;

impl<V: VectorSurface, R: RasterSurface, F: FrameScheduler> LineChart<V, R, F> {
    /// Applies a new size immediately and re-renders.
    ///
    /// An empty viewport is stored but renders nothing until a valid size
    /// arrives.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<&mut Self> {
        debug!(
            width = viewport.width,
            height = viewport.height,
            "resize chart"
        );
        self.viewport = viewport;
        self.render()?;
        Ok(self)
    }

    /// Records a size change; bursts are coalesced by [`LineChart::poll_resize`].
    pub fn notify_resize(&mut self, viewport: Viewport) {
        let now_ms = self.scheduler.now_ms();
        self.debouncer.notify(viewport, now_ms);
    }

    /// Applies the latest notified size once the debounce delay has elapsed.
    ///
    /// Returns whether a resize was applied.
    pub fn poll_resize(&mut self) -> ChartResult<bool> {
        let now_ms = self.scheduler.now_ms();
        match self.debouncer.poll(now_ms) {
            Some(viewport) => {
                self.resize(viewport)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[must_use]
    pub fn has_pending_resize(&self) -> bool {
        self.debouncer.is_pending()
    }
}
