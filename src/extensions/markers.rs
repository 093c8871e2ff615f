use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::api::MarkerPlacementMode;
use crate::core::{Annotation, PixelPoint, RenderContext};
use crate::render::VectorSurface;

/// Distance from an anchor up to the top edge of an overlay in the default
/// [`MarkerSide::Offset`] position.
pub const OVERLAY_OFFSET_PX: f64 = 20.0;

/// Which side of its anchor an overlay ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerSide {
    /// Flipped above the anchor because it would not fit over the baseline.
    Above,
    /// Default position, offset upward by [`OVERLAY_OFFSET_PX`].
    Offset,
    Centered,
}

/// One annotation overlay positioned in pixel space.
///
/// The list is declarative: hosts diff it against their mounted overlays
/// instead of the chart touching host UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedAnnotation {
    /// Position of the annotation in the input slice.
    pub index: usize,
    pub anchor: PixelPoint,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub side: MarkerSide,
    pub content: String,
}

impl PlacedAnnotation {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Positions every annotation whose anchor lies inside the plot bounds.
///
/// Anchors exactly on a bound are kept. Non-finite annotations are skipped.
pub fn place_annotations<M: VectorSurface + ?Sized>(
    annotations: &[Annotation],
    context: &RenderContext,
    mode: MarkerPlacementMode,
    measurer: &mut M,
) -> Vec<PlacedAnnotation> {
    let bounds = context.plot_bounds();
    let mut placed = Vec::with_capacity(annotations.len());

    for (index, annotation) in annotations.iter().enumerate() {
        if !annotation.sample().is_finite() {
            continue;
        }
        let anchor = context.project(annotation.sample());
        if !bounds.contains(anchor.x, anchor.y) {
            trace!(index, x = anchor.x, y = anchor.y, "annotation outside plot");
            continue;
        }

        let size = measurer.measure_overlay(&annotation.render);
        let (left, top, side) = match mode {
            MarkerPlacementMode::BoundaryAware => {
                let left = if anchor.x + size.width / 2.0 > bounds.right {
                    bounds.right - size.width
                } else {
                    anchor.x - size.width / 2.0
                };
                if context.baseline_y - anchor.y < 2.0 * size.height {
                    let top = (anchor.y - size.height).max(context.margins.top);
                    (left, top, MarkerSide::Above)
                } else {
                    (left, anchor.y - OVERLAY_OFFSET_PX, MarkerSide::Offset)
                }
            }
            MarkerPlacementMode::Centered => (
                anchor.x - size.width / 2.0,
                anchor.y - size.height / 2.0,
                MarkerSide::Centered,
            ),
        };

        placed.push(PlacedAnnotation {
            index,
            anchor,
            left,
            top,
            width: size.width,
            height: size.height,
            side,
            content: annotation.render.clone(),
        });
    }

    placed
}
