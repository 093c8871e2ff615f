mod frame;
mod line_frame;
mod path;
mod primitives;
mod recording;

pub use frame::{AxisFrame, ElementClass, VectorElement, VectorShape};
pub use line_frame::{
    CATMULL_ROM_ALPHA, CurveType, GradientStop, LineFrame, LineStyle, LinearGradient,
    SHADOW_TOP_ALPHA, ShadowFill, Stroke, full_surface, visible_prefix_len,
};
pub use path::{Path, PathCommand};
pub use primitives::{
    Color, Extent, LinePrimitive, Rect, TextAnchor, TextPrimitive, estimate_text_width_px,
};
pub use recording::{RasterOp, RecordingRasterSurface, RecordingVectorSurface};

use crate::error::ChartResult;

/// Retained vector layer holding axes, grid lines and labels.
///
/// The surface owns its elements between passes; `clear` drops all of them.
/// It is also the chart's text and overlay measurer, so the measured left
/// margin and marker boxes agree with what is actually drawn.
pub trait VectorSurface {
    fn clear(&mut self);

    fn append(&mut self, element: &VectorElement) -> ChartResult<()>;

    /// Rendered size of `text` at `font_size_px`.
    fn measure_text(&mut self, text: &str, font_size_px: f64) -> Extent;

    /// Rendered size of one host-supplied annotation overlay.
    fn measure_overlay(&mut self, content: &str) -> Extent;
}

/// Immediate-mode raster layer holding the line and its shadow.
pub trait RasterSurface {
    fn clear(&mut self, region: Rect) -> ChartResult<()>;

    fn save(&mut self) -> ChartResult<()>;

    fn restore(&mut self) -> ChartResult<()>;

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) -> ChartResult<()>;

    fn fill_path(&mut self, path: &Path, fill: &LinearGradient) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRasterSurface, CairoVectorSurface};
