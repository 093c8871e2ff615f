use approx::assert_relative_eq;
use linechart_rs::api::{
    AxisLayoutEngine, AxisLayoutInputs, AxisLayoutMode, ChartConfig, MarkerPlacementMode,
};
use linechart_rs::core::{Annotation, RenderContext, Sample, Viewport};
use linechart_rs::extensions::{MarkerSide, OVERLAY_OFFSET_PX, place_annotations};
use linechart_rs::render::{Extent, RecordingVectorSurface};

/// x: [0, 100] -> [50, 470], y: [0, 100] -> [260, 20], baseline 260.
fn fixed_context() -> RenderContext {
    context_for(AxisLayoutMode::FixedMargin)
}

fn context_for(mode: AxisLayoutMode) -> RenderContext {
    let samples = [Sample::new(0.0, 0.0), Sample::new(100.0, 100.0)];
    let config = ChartConfig {
        layout_mode: mode,
        ..ChartConfig::default()
    };
    AxisLayoutEngine::layout(
        AxisLayoutInputs {
            samples: &samples,
            annotation_ticks: &[],
            viewport: Viewport::new(500, 300),
            config: &config,
        },
        &mut RecordingVectorSurface::new(),
    )
    .expect("layout")
    .context
}

fn overlay(width: f64, height: f64) -> RecordingVectorSurface {
    RecordingVectorSurface::new().with_overlay_extent(Extent::new(width, height))
}

#[test]
fn overlay_is_centered_and_offset_above_the_point() {
    let placed = place_annotations(
        &[Annotation::new(50.0, 50.0, "mid")],
        &fixed_context(),
        MarkerPlacementMode::BoundaryAware,
        &mut overlay(40.0, 20.0),
    );

    assert_eq!(placed.len(), 1);
    let marker = &placed[0];
    assert_eq!((marker.anchor.x, marker.anchor.y), (260.0, 140.0));
    assert_eq!(marker.left, 240.0);
    assert_eq!(marker.top, 120.0);
    assert_eq!(marker.top, marker.anchor.y - OVERLAY_OFFSET_PX);
    assert!(marker.top < marker.anchor.y);
    assert_eq!(marker.side, MarkerSide::Offset);
    assert_eq!(marker.content, "mid");
    assert_eq!(marker.right(), 280.0);
}

#[test]
fn overlay_is_right_aligned_at_the_plot_edge() {
    let placed = place_annotations(
        &[Annotation::new(100.0, 50.0, "edge")],
        &fixed_context(),
        MarkerPlacementMode::BoundaryAware,
        &mut overlay(40.0, 20.0),
    );
    assert_eq!(placed[0].left, 430.0);
    assert_eq!(placed[0].right(), 470.0);
}

#[test]
fn overlay_near_the_baseline_moves_above_the_point() {
    let placed = place_annotations(
        &[Annotation::new(50.0, 5.0, "low")],
        &fixed_context(),
        MarkerPlacementMode::BoundaryAware,
        &mut overlay(40.0, 20.0),
    );
    assert_relative_eq!(placed[0].anchor.y, 248.0, epsilon = 1e-9);
    assert_eq!(placed[0].side, MarkerSide::Above);
    assert_relative_eq!(placed[0].top, 228.0, epsilon = 1e-9);
    assert_relative_eq!(placed[0].bottom(), 248.0, epsilon = 1e-9);
}

#[test]
fn overlay_above_the_point_is_clamped_to_the_top_margin() {
    let placed = place_annotations(
        &[Annotation::new(50.0, 50.0, "tall")],
        &fixed_context(),
        MarkerPlacementMode::BoundaryAware,
        &mut overlay(40.0, 200.0),
    );
    assert_eq!(placed[0].side, MarkerSide::Above);
    assert_eq!(placed[0].top, 20.0);
}

#[test]
fn anchors_outside_the_plot_are_dropped_and_bounds_are_inclusive() {
    let annotations = [
        Annotation::new(150.0, 50.0, "right of plot"),
        Annotation::new(0.0, 0.0, "corner"),
        Annotation::new(-1.0, 50.0, "left of plot"),
        Annotation::new(50.0, 120.0, "above plot"),
        Annotation::new(f64::NAN, 50.0, "nan"),
        Annotation::new(100.0, 100.0, "opposite corner"),
    ];
    let placed = place_annotations(
        &annotations,
        &fixed_context(),
        MarkerPlacementMode::BoundaryAware,
        &mut overlay(10.0, 10.0),
    );

    let kept: Vec<usize> = placed.iter().map(|marker| marker.index).collect();
    assert_eq!(kept, [1, 5]);
}

#[test]
fn centered_mode_ignores_edges_and_baseline() {
    let placed = place_annotations(
        &[Annotation::new(50.0, 50.0, "a"), Annotation::new(100.0, 5.0, "b")],
        &fixed_context(),
        MarkerPlacementMode::Centered,
        &mut overlay(40.0, 20.0),
    );
    assert_eq!((placed[0].left, placed[0].top), (240.0, 130.0));
    assert_eq!(placed[1].left, 450.0);
    assert_relative_eq!(placed[1].top, 238.0, epsilon = 1e-9);
    assert!(placed.iter().all(|marker| marker.side == MarkerSide::Centered));
}

#[test]
fn dynamic_layout_bounds_start_at_the_measured_margin() {
    let context = context_for(AxisLayoutMode::DynamicMargin);
    let placed = place_annotations(
        &[Annotation::new(0.0, 50.0, "first sample")],
        &context,
        MarkerPlacementMode::BoundaryAware,
        &mut overlay(10.0, 10.0),
    );
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].anchor.x, context.left_margin);
    assert!(context.left_margin > 50.0);
}

#[test]
fn overlays_are_measured_from_their_content_by_default() {
    let mut surface = RecordingVectorSurface::new();
    let placed = place_annotations(
        &[Annotation::new(50.0, 50.0, "wide label"), Annotation::new(50.0, 50.0, "w")],
        &fixed_context(),
        MarkerPlacementMode::BoundaryAware,
        &mut surface,
    );
    assert!(placed[0].width > placed[1].width);
}
