use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{Margins, PixelPoint, PlotBounds, Sample, ScaleState, TickValues, Viewport};

/// Samples above this count are projected in parallel when the
/// `parallel-projection` feature is enabled.
#[cfg(feature = "parallel-projection")]
const PARALLEL_PROJECTION_MIN_SAMPLES: usize = 8_192;

/// Geometry fixed by the axis layout for one render pass.
///
/// Every stage after the axis layout (line, shadow, markers) reads its
/// left edge, scales and baseline from here so all layers stay aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderContext {
    pub viewport: Viewport,
    /// Margins as configured; `left_margin` supersedes `margins.left`.
    pub margins: Margins,
    pub left_margin: f64,
    pub scales: ScaleState,
    /// Y ticks in ascending order.
    pub y_ticks: TickValues,
    pub baseline_y: f64,
}

impl RenderContext {
    #[must_use]
    pub fn plot_bounds(&self) -> PlotBounds {
        PlotBounds::from_viewport(self.viewport, self.margins).with_left(self.left_margin)
    }

    #[must_use]
    pub fn project(&self, sample: Sample) -> PixelPoint {
        PixelPoint::new(self.scales.x.map(sample.x), self.scales.y.map(sample.y))
    }

    #[must_use]
    pub fn project_all(&self, samples: &[Sample]) -> Vec<PixelPoint> {
        #[cfg(feature = "parallel-projection")]
        {
            if samples.len() >= PARALLEL_PROJECTION_MIN_SAMPLES {
                return samples
                    .par_iter()
                    .map(|sample| self.project(*sample))
                    .collect();
            }
        }

        samples.iter().map(|sample| self.project(*sample)).collect()
    }
}
