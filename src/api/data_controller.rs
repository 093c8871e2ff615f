use tracing::{debug, warn};

use crate::core::{Annotation, AnnotationTick, Sample};
use crate::error::{ChartError, ChartResult};
use crate::render::{RasterSurface, VectorSurface};
use crate::runtime::FrameScheduler;

use super::LineChart;

impl<V: VectorSurface, R: RasterSurface, F: FrameScheduler> LineChart<V, R, F> {
    /// Replaces the series and re-renders from progress 0.
    ///
    /// Samples must have finite coordinates; on error the current series is
    /// kept. Samples are expected in non-decreasing x order.
    pub fn set_data(&mut self, data: impl Into<Vec<Sample>>) -> ChartResult<&mut Self> {
        let data = data.into();
        if let Some(index) = data.iter().position(|sample| !sample.is_finite()) {
            warn!(index, "rejecting series with non-finite sample");
            return Err(ChartError::InvalidData(format!(
                "sample {index} must have finite coordinates"
            )));
        }

        self.data = data;
        self.resimplify();
        self.animation.reset(&mut self.scheduler);
        self.render()?;
        Ok(self)
    }

    /// Replaces the annotation overlays and re-renders.
    pub fn set_annotations(
        &mut self,
        annotations: impl Into<Vec<Annotation>>,
    ) -> ChartResult<&mut Self> {
        self.annotations = annotations.into();
        debug!(count = self.annotations.len(), "set annotations");
        self.render()?;
        Ok(self)
    }

    /// Replaces the labels drawn under the baseline and re-renders.
    pub fn set_annotation_ticks(
        &mut self,
        ticks: impl Into<Vec<AnnotationTick>>,
    ) -> ChartResult<&mut Self> {
        self.annotation_ticks = ticks.into();
        debug!(count = self.annotation_ticks.len(), "set annotation ticks");
        self.render()?;
        Ok(self)
    }

    pub(super) fn resimplify(&mut self) {
        let policy = self.config.simplification;
        self.simplified = policy.apply(&self.data);
        debug!(
            original_count = self.data.len(),
            simplified_count = self.simplified.len(),
            epsilon = policy.select_epsilon(&self.data),
            bypassed = policy.is_below_threshold(&self.data),
            "simplified series"
        );
    }
}
