use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::{RasterSurface, VectorSurface, full_surface};
use crate::runtime::{FrameRequestId, FrameScheduler, FrameTick};

use super::LineChart;

impl<V: VectorSurface, R: RasterSurface, F: FrameScheduler> LineChart<V, R, F> {
    /// Toggles the reveal animation for later passes.
    ///
    /// Does not re-render; the next setter, resize or
    /// [`LineChart::restart_animation`] uses the new settings.
    pub fn set_enable_animation(
        &mut self,
        enable: bool,
        duration_ms: Option<f64>,
    ) -> ChartResult<&mut Self> {
        if let Some(duration_ms) = duration_ms {
            if !duration_ms.is_finite() || duration_ms < 0.0 {
                return Err(ChartError::invalid_config(
                    "animation_duration_ms",
                    format!("must be finite and >= 0, got {duration_ms}"),
                ));
            }
            self.config.animation_duration_ms = duration_ms;
        }
        self.config.enable_animation = enable;
        debug!(
            enable,
            duration_ms = self.config.animation_duration_ms,
            "set enable animation"
        );
        Ok(self)
    }

    /// Replays the reveal from progress 0 over the current layout.
    pub fn restart_animation(&mut self) -> ChartResult<&mut Self> {
        self.attached = true;
        self.markers.clear();
        if self.layout.is_none() {
            self.animation.reset(&mut self.scheduler);
            return Ok(self);
        }
        self.raster.clear(full_surface(self.viewport))?;
        if self.config.enable_animation {
            self.animation
                .start(&mut self.scheduler, self.config.animation_duration_ms);
        } else {
            self.animation.complete(&mut self.scheduler);
            self.draw_line(1.0)?;
            self.place_markers();
        }
        Ok(self)
    }

    /// Handles a fired frame request.
    ///
    /// Stale ids (from a cancelled or superseded run) and frames arriving
    /// after [`LineChart::detach`] return `Ok(None)` without drawing.
    pub fn on_frame(&mut self, id: FrameRequestId, now_ms: f64) -> ChartResult<Option<FrameTick>> {
        if !self.attached {
            return Ok(None);
        }
        let Some(tick) = self.animation.on_frame(&mut self.scheduler, id, now_ms) else {
            return Ok(None);
        };

        self.raster.clear(full_surface(self.viewport))?;
        self.draw_line(tick.progress)?;
        if tick.finished {
            self.place_markers();
            debug!("animation finished");
        }
        Ok(Some(tick))
    }
}
