//! Raster layer of a render pass: the progress-clipped line and its shadow.

use serde::{Deserialize, Serialize};

use crate::core::{RenderContext, Sample, Viewport};
use crate::error::ChartResult;
use crate::render::{Color, Path, RasterSurface, Rect};

/// Knot parameterization of the smoothed stroke.
pub const CATMULL_ROM_ALPHA: f64 = 0.5;

/// Opacity of the shadow gradient at the top of the plot.
pub const SHADOW_TOP_ALPHA: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveType {
    /// Straight segments between consecutive points.
    #[default]
    Linear,
    /// Catmull-Rom spline through the same points.
    #[serde(alias = "curve")]
    Smoothed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width_px: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

/// Linear gradient between two pixel-space points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Vertical fade from `color` at `SHADOW_TOP_ALPHA` (at `top`) to fully
    /// transparent (at `bottom`).
    #[must_use]
    pub fn vertical_fade(color: Color, top: f64, bottom: f64) -> Self {
        Self {
            x0: 0.0,
            y0: top,
            x1: 0.0,
            y1: bottom,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: color.with_alpha(color.alpha * SHADOW_TOP_ALPHA),
                },
                GradientStop {
                    offset: 1.0,
                    color: color.with_alpha(0.0),
                },
            ],
        }
    }
}

/// Visual options consumed by [`LineFrame::build`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub width_px: f64,
    pub curve: CurveType,
    pub show_shadow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowFill {
    pub path: Path,
    pub gradient: LinearGradient,
}

/// Backend-agnostic raster scene for one animation frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFrame {
    pub viewport: Viewport,
    pub stroke_path: Path,
    pub stroke: Stroke,
    pub shadow: Option<ShadowFill>,
    /// Number of simplified points included at this progress.
    pub drawn_points: usize,
}

/// Number of leading points drawn at `progress`.
#[must_use]
pub fn visible_prefix_len(total: usize, progress: f64) -> usize {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    ((total as f64) * progress).floor() as usize
}

impl LineFrame {
    /// Builds the frame for the first `floor(n * progress)` simplified points.
    ///
    /// Returns `None` when fewer than two points would be drawn.
    #[must_use]
    pub fn build(
        context: &RenderContext,
        simplified: &[Sample],
        progress: f64,
        style: LineStyle,
    ) -> Option<Self> {
        let drawn_points = visible_prefix_len(simplified.len(), progress);
        if drawn_points < 2 {
            return None;
        }

        let points = context.project_all(&simplified[..drawn_points]);
        let stroke_path = match style.curve {
            CurveType::Linear => Path::polyline(&points),
            CurveType::Smoothed => Path::catmull_rom(&points, CATMULL_ROM_ALPHA),
        };

        let shadow = style.show_shadow.then(|| {
            let first = points[0];
            let last = points[points.len() - 1];
            let mut path = stroke_path.clone();
            path.line_to(last.x, context.baseline_y);
            path.line_to(first.x, context.baseline_y);
            path.close();
            ShadowFill {
                path,
                gradient: LinearGradient::vertical_fade(
                    style.color,
                    context.margins.top,
                    context.baseline_y,
                ),
            }
        });

        Some(Self {
            viewport: context.viewport,
            stroke_path,
            stroke: Stroke {
                color: style.color,
                width_px: style.width_px,
            },
            shadow,
            drawn_points,
        })
    }

    /// Strokes the line, then fills the shadow, inside one save/restore pair.
    pub fn draw<S: RasterSurface + ?Sized>(&self, surface: &mut S) -> ChartResult<()> {
        self.stroke_path.validate()?;
        self.stroke.color.validate()?;

        surface.save()?;
        surface.stroke_path(&self.stroke_path, &self.stroke)?;
        if let Some(shadow) = &self.shadow {
            shadow.path.validate()?;
            surface.fill_path(&shadow.path, &shadow.gradient)?;
        }
        surface.restore()
    }
}

/// Full-surface clear region for `viewport`.
#[must_use]
pub fn full_surface(viewport: Viewport) -> Rect {
    Rect::new(0.0, 0.0, viewport.width_px(), viewport.height_px())
}
