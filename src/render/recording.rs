use crate::error::ChartResult;
use crate::render::{
    Extent, LinearGradient, Path, RasterSurface, Rect, Stroke, VectorElement, VectorSurface,
    estimate_text_width_px,
};

/// Line height used for estimated text extents, as a multiple of font size.
const ESTIMATED_LINE_HEIGHT_EM: f64 = 1.2;

/// Font size used to estimate overlays that have no configured extent.
const OVERLAY_FONT_SIZE_PX: f64 = 12.0;

/// Headless vector surface used by tests and offscreen usage.
///
/// Keeps the retained elements in memory and measures text with
/// [`estimate_text_width_px`]. Elements are validated on append so tests
/// catch invalid geometry without a real backend.
#[derive(Debug, Clone, Default)]
pub struct RecordingVectorSurface {
    elements: Vec<VectorElement>,
    overlay_extent: Option<Extent>,
    clear_count: usize,
}

impl RecordingVectorSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `extent` for every overlay instead of estimating from content.
    #[must_use]
    pub fn with_overlay_extent(mut self, extent: Extent) -> Self {
        self.overlay_extent = Some(extent);
        self
    }

    #[must_use]
    pub fn elements(&self) -> &[VectorElement] {
        &self.elements
    }

    /// Number of times the layer was cleared.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }
}

impl VectorSurface for RecordingVectorSurface {
    fn clear(&mut self) {
        self.elements.clear();
        self.clear_count += 1;
    }

    fn append(&mut self, element: &VectorElement) -> ChartResult<()> {
        element.validate()?;
        self.elements.push(element.clone());
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font_size_px: f64) -> Extent {
        Extent::new(
            estimate_text_width_px(text, font_size_px),
            font_size_px * ESTIMATED_LINE_HEIGHT_EM,
        )
    }

    fn measure_overlay(&mut self, content: &str) -> Extent {
        self.overlay_extent.unwrap_or_else(|| {
            Extent::new(
                estimate_text_width_px(content, OVERLAY_FONT_SIZE_PX),
                OVERLAY_FONT_SIZE_PX * ESTIMATED_LINE_HEIGHT_EM,
            )
        })
    }
}

/// One call received by a [`RecordingRasterSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum RasterOp {
    Clear(Rect),
    Save,
    Restore,
    Stroke { path: Path, stroke: Stroke },
    Fill { path: Path, gradient: LinearGradient },
}

/// Headless raster surface that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingRasterSurface {
    ops: Vec<RasterOp>,
    save_depth: usize,
}

impl RecordingRasterSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ops(&self) -> &[RasterOp] {
        &self.ops
    }

    /// Operations recorded since the last full clear.
    #[must_use]
    pub fn ops_since_clear(&self) -> &[RasterOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, RasterOp::Clear(_)))
            .map_or(0, |index| index + 1);
        &self.ops[start..]
    }

    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.save_depth
    }

    pub fn reset(&mut self) {
        self.ops.clear();
        self.save_depth = 0;
    }
}

impl RasterSurface for RecordingRasterSurface {
    fn clear(&mut self, region: Rect) -> ChartResult<()> {
        self.ops.push(RasterOp::Clear(region));
        Ok(())
    }

    fn save(&mut self) -> ChartResult<()> {
        self.save_depth += 1;
        self.ops.push(RasterOp::Save);
        Ok(())
    }

    fn restore(&mut self) -> ChartResult<()> {
        self.save_depth = self.save_depth.saturating_sub(1);
        self.ops.push(RasterOp::Restore);
        Ok(())
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) -> ChartResult<()> {
        self.ops.push(RasterOp::Stroke {
            path: path.clone(),
            stroke: *stroke,
        });
        Ok(())
    }

    fn fill_path(&mut self, path: &Path, fill: &LinearGradient) -> ChartResult<()> {
        self.ops.push(RasterOp::Fill {
            path: path.clone(),
            gradient: fill.clone(),
        });
        Ok(())
    }
}
