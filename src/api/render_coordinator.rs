use tracing::{debug, trace, warn};

use crate::error::ChartResult;
use crate::extensions::place_annotations;
use crate::render::{LineFrame, RasterSurface, VectorSurface, full_surface};
use crate::runtime::FrameScheduler;

use super::{AxisLayoutEngine, AxisLayoutInputs, ChartConfigPatch, LineChart};

impl<V: VectorSurface, R: RasterSurface, F: FrameScheduler> LineChart<V, R, F> {
    /// Merges `patch` into the configuration and re-renders.
    ///
    /// The patch is validated as a whole first; on error nothing changes.
    pub fn set_config(&mut self, patch: &ChartConfigPatch) -> ChartResult<&mut Self> {
        let next = match self.config.merged(patch) {
            Ok(next) => next,
            Err(err) => {
                warn!(error = %err, "rejecting config patch");
                return Err(err);
            }
        };

        let resimplify =
            patch.touches_simplification() && next.simplification != self.config.simplification;
        self.config = next;
        self.debouncer.set_delay_ms(self.config.resize_debounce_ms);
        if resimplify {
            self.resimplify();
        }
        debug!(resimplify, "set config");
        self.render()?;
        Ok(self)
    }

    /// Full render pass: clears both layers, lays out axes, then either
    /// starts the reveal animation or draws the finished line and markers.
    ///
    /// Without data or with an empty viewport the layers are cleared and
    /// nothing else happens.
    pub(super) fn render(&mut self) -> ChartResult<()> {
        self.attached = true;
        self.animation.cancel(&mut self.scheduler);
        self.markers.clear();
        self.vector.clear();
        if self.viewport.is_valid() {
            self.raster.clear(full_surface(self.viewport))?;
        }

        let inputs = AxisLayoutInputs {
            samples: &self.data,
            annotation_ticks: &self.annotation_ticks,
            viewport: self.viewport,
            config: &self.config,
        };
        self.layout = AxisLayoutEngine::layout(inputs, &mut self.vector);
        let Some(layout) = &self.layout else {
            debug!(
                samples = self.data.len(),
                width = self.viewport.width,
                height = self.viewport.height,
                "skipping render pass"
            );
            return Ok(());
        };
        layout.frame.draw(&mut self.vector)?;

        if self.config.enable_animation {
            self.animation
                .start(&mut self.scheduler, self.config.animation_duration_ms);
        } else {
            self.animation.complete(&mut self.scheduler);
            self.draw_line(1.0)?;
            self.place_markers();
        }
        Ok(())
    }

    pub(super) fn draw_line(&mut self, progress: f64) -> ChartResult<()> {
        let Some(layout) = &self.layout else {
            return Ok(());
        };
        let Some(frame) = LineFrame::build(
            &layout.context,
            &self.simplified,
            progress,
            self.config.line_style(),
        ) else {
            trace!(progress, "fewer than two points visible");
            return Ok(());
        };
        frame.draw(&mut self.raster)
    }

    pub(super) fn place_markers(&mut self) {
        let Some(layout) = &self.layout else {
            return;
        };
        self.markers = place_annotations(
            &self.annotations,
            &layout.context,
            self.config.marker_placement,
            &mut self.vector,
        );
        debug!(
            placed = self.markers.len(),
            total = self.annotations.len(),
            "placed annotations"
        );
    }
}
