use serde::{Deserialize, Serialize};

use crate::core::primitives::{x_extent, y_extent};
use crate::core::ticks::{TickValues, extend_domain_floor, nice_ticks};
use crate::core::{Margins, Sample, Viewport};

/// Linear map from a data-space domain onto a pixel-space range.
///
/// A degenerate domain (`start == end`) maps every value to the middle of the
/// range instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn with_domain(mut self, start: f64, end: f64) -> Self {
        self.domain_start = start;
        self.domain_end = end;
        self
    }

    #[must_use]
    pub fn with_range(mut self, start: f64, end: f64) -> Self {
        self.range_start = start;
        self.range_end = end;
        self
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            return 0.5 * (self.range_start + self.range_end);
        }
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return 0.5 * (self.domain_start + self.domain_end);
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> TickValues {
        nice_ticks(self.domain_start, self.domain_end, count)
    }
}

/// The x/y scale pair for one data set and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleState {
    pub x: LinearScale,
    pub y: LinearScale,
    /// Smallest finite y in the data set; the y domain may start below it.
    pub data_y_min: f64,
}

impl ScaleState {
    /// Builds data-extent scales over the plot area, y inverted.
    ///
    /// Returns `None` when no sample has finite coordinates.
    #[must_use]
    pub fn from_samples(samples: &[Sample], viewport: Viewport, margins: Margins) -> Option<Self> {
        let (x_min, x_max) = x_extent(samples)?;
        let (y_min, y_max) = y_extent(samples)?;

        let x = LinearScale::new(
            (x_min, x_max),
            (margins.left, viewport.width_px() - margins.right),
        );
        let y = LinearScale::new(
            (y_min, y_max),
            (viewport.height_px() - margins.bottom, margins.top),
        );
        Some(Self {
            x,
            y,
            data_y_min: y_min,
        })
    }

    /// Lowers the y domain by one tick step when the first tick sits above
    /// the data minimum. Returns the new floor when the domain changed.
    pub fn extend_y_domain(&mut self, tick_count: usize) -> Option<f64> {
        let ticks = self.y.ticks(tick_count);
        let floor = extend_domain_floor(&ticks, self.data_y_min)?;
        let (_, end) = self.y.domain();
        self.y = self.y.with_domain(floor, end);
        Some(floor)
    }

    /// Ascending y ticks for `tick_count`, with the domain extended first.
    ///
    /// The nice ticks of the data domain are kept as generated; when the
    /// domain is extended, its new floor is prepended so the lowest tick sits
    /// at or below every sample.
    pub fn extended_y_ticks(&mut self, tick_count: usize) -> TickValues {
        let mut ticks = self.y.ticks(tick_count);
        ticks.sort_by(f64::total_cmp);
        if let Some(floor) = self.extend_y_domain(tick_count) {
            ticks.insert(0, floor);
        }
        ticks
    }

    /// Moves the left edge of the x range, keeping the right edge.
    pub fn set_left_edge(&mut self, left: f64) {
        let (_, right) = self.x.range();
        self.x = self.x.with_range(left, right);
    }
}
