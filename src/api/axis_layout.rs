//! Axis and grid layout for one render pass.
//!
//! The layout pass owns every decision about horizontal placement: it
//! measures the y labels, derives the left margin, and hands the resulting
//! [`RenderContext`] to the line and marker stages so nothing downstream
//! recomputes it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AnnotationTick, RenderContext, Sample, ScaleState, TickValues, Viewport};
use crate::render::{
    AxisFrame, ElementClass, LinePrimitive, TextAnchor, TextPrimitive, VectorElement,
    VectorSurface,
};

use super::{AxisLayoutMode, ChartConfig, format_single_with, format_tick_labels};

/// Gap between the widest y label and the plot's left edge.
pub const LABEL_GAP_PX: f64 = 10.0;

/// Distance from the baseline to annotation tick labels.
pub const ANNOTATION_TICK_OFFSET_PX: f64 = 20.0;

/// Vertical shift that centers digits on their tick row.
pub const Y_LABEL_DY_EM: f64 = 0.32;

pub const GRID_DASH: [f64; 2] = [3.0, 3.0];
pub const GRID_STROKE_WIDTH_PX: f64 = 1.0;

/// Everything a layout pass reads.
#[derive(Debug, Clone, Copy)]
pub struct AxisLayoutInputs<'a> {
    pub samples: &'a [Sample],
    pub annotation_ticks: &'a [AnnotationTick],
    pub viewport: Viewport,
    pub config: &'a ChartConfig,
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub frame: AxisFrame,
    pub context: RenderContext,
    /// Y labels in tick order, as drawn.
    pub y_labels: Vec<(f64, String)>,
    /// Width of the widest y label as measured by the surface.
    pub max_label_width_px: f64,
}

impl AxisLayout {
    /// Serializes the layout to pretty JSON for snapshots.
    pub fn to_json_pretty(&self) -> crate::error::ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            crate::error::ChartError::InvalidData(format!("failed to serialize layout: {e}"))
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AxisLayoutEngine;

impl AxisLayoutEngine {
    /// Runs one layout pass, measuring labels through `measurer`.
    ///
    /// Returns `None` when the viewport is empty or no sample has finite
    /// coordinates.
    pub fn layout<M: VectorSurface + ?Sized>(
        inputs: AxisLayoutInputs<'_>,
        measurer: &mut M,
    ) -> Option<AxisLayout> {
        let AxisLayoutInputs {
            samples,
            annotation_ticks,
            viewport,
            config,
        } = inputs;
        if !viewport.is_valid() {
            return None;
        }
        let margins = config.margin;
        let mut scales = ScaleState::from_samples(samples, viewport, margins)?;

        let (y_ticks, y_labels, left_margin, max_label_width_px, baseline_y) =
            match config.layout_mode {
                AxisLayoutMode::DynamicMargin => {
                    let y_ticks = scales.extended_y_ticks(config.tick_count);
                    let y_labels = batch_or_fixed_labels(&y_ticks, config);
                    let max_label_width_px = y_labels
                        .iter()
                        .map(|(_, label)| {
                            measurer
                                .measure_text(label, config.axis_font_size_px)
                                .width
                        })
                        .fold(0.0_f64, f64::max);
                    let left_margin = margins.left + max_label_width_px + LABEL_GAP_PX;
                    scales.set_left_edge(left_margin);

                    let baseline_y = y_ticks
                        .first()
                        .map_or(viewport.height_px() - margins.bottom, |lowest| {
                            scales.y.map(*lowest)
                        });
                    debug!(
                        tick_count = y_ticks.len(),
                        domain_floor = scales.y.domain().0,
                        max_label_width_px,
                        left_margin,
                        baseline_y,
                        "dynamic axis layout"
                    );
                    (
                        y_ticks,
                        y_labels,
                        left_margin,
                        max_label_width_px,
                        baseline_y,
                    )
                }
                AxisLayoutMode::FixedMargin => {
                    let y_ticks = ascending(scales.y.ticks(config.tick_count));
                    let decimals = config.label_decimals.unwrap_or(0);
                    let options = config.label_options();
                    let y_labels = y_ticks
                        .iter()
                        .map(|tick| (*tick, format_single_with(*tick, Some(decimals), options)))
                        .collect();
                    let baseline_y = viewport.height_px() - margins.bottom;
                    debug!(tick_count = y_ticks.len(), baseline_y, "fixed axis layout");
                    (y_ticks, y_labels, margins.left, 0.0, baseline_y)
                }
            };

        let context = RenderContext {
            viewport,
            margins,
            left_margin,
            scales,
            y_ticks,
            baseline_y,
        };
        let frame = build_frame(&context, &y_labels, annotation_ticks, config);

        Some(AxisLayout {
            frame,
            context,
            y_labels,
            max_label_width_px,
        })
    }
}

fn ascending(mut ticks: TickValues) -> TickValues {
    ticks.sort_by(f64::total_cmp);
    ticks
}

fn batch_or_fixed_labels(ticks: &[f64], config: &ChartConfig) -> Vec<(f64, String)> {
    let options = config.label_options();
    match config.label_decimals {
        Some(decimals) => ticks
            .iter()
            .map(|tick| (*tick, format_single_with(*tick, Some(decimals), options)))
            .collect(),
        None => format_tick_labels(ticks, options)
            .iter()
            .map(|(tick, label)| (tick, label.to_owned()))
            .collect(),
    }
}

fn build_frame(
    context: &RenderContext,
    y_labels: &[(f64, String)],
    annotation_ticks: &[AnnotationTick],
    config: &ChartConfig,
) -> AxisFrame {
    let mut frame = AxisFrame::new(context.viewport);
    let left = context.left_margin;
    let right = context.viewport.width_px() - context.margins.right;
    let grid_line = |y: f64| {
        LinePrimitive::new(left, y, right, y, GRID_STROKE_WIDTH_PX, config.grid_color)
            .with_dash(&GRID_DASH)
    };

    for tick in &context.y_ticks {
        let y = context.scales.y.map(*tick);
        frame.push(VectorElement::line(ElementClass::GridLine, grid_line(y)));
    }

    for (tick, label) in y_labels {
        let y = context.scales.y.map(*tick);
        let text = TextPrimitive::new(
            label.clone(),
            left - LABEL_GAP_PX,
            y,
            config.axis_font_size_px,
            config.axis_text_color,
            TextAnchor::End,
        )
        .with_dy_em(Y_LABEL_DY_EM);
        frame.push(VectorElement::text(ElementClass::YAxisLabel, text));
    }

    frame.push(VectorElement::line(
        ElementClass::XAxis,
        grid_line(context.baseline_y),
    ));

    for tick in annotation_ticks.iter().filter(|tick| tick.x.is_finite()) {
        let text = TextPrimitive::new(
            tick.label.clone(),
            context.scales.x.map(tick.x),
            context.baseline_y + ANNOTATION_TICK_OFFSET_PX,
            config.axis_font_size_px,
            config.axis_text_color,
            TextAnchor::Middle,
        );
        frame.push(VectorElement::text(ElementClass::AnnotationTick, text));
    }

    frame
}
