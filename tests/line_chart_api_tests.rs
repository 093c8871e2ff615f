use linechart_rs::api::ChartConfigPatch;
use linechart_rs::core::{Annotation, AnnotationTick, Sample, SimplifyPolicy, Viewport};
use linechart_rs::render::{
    CurveType, ElementClass, PathCommand, RasterOp, RecordingRasterSurface,
    RecordingVectorSurface,
};
use linechart_rs::runtime::ManualFrameScheduler;
use linechart_rs::{ChartConfig, ChartError, LineChart};

type TestChart = LineChart<RecordingVectorSurface, RecordingRasterSurface, ManualFrameScheduler>;

fn chart_with(config: ChartConfig) -> TestChart {
    LineChart::new(
        RecordingVectorSurface::new(),
        RecordingRasterSurface::new(),
        ManualFrameScheduler::new(),
        Viewport::new(500, 300),
        config,
    )
    .expect("chart")
}

fn chart() -> TestChart {
    chart_with(ChartConfig::default())
}

fn static_chart() -> TestChart {
    chart_with(ChartConfig {
        enable_animation: false,
        ..ChartConfig::default()
    })
}

fn series() -> Vec<Sample> {
    vec![
        Sample::new(0.0, 10.0),
        Sample::new(1.0, 40.0),
        Sample::new(2.0, 25.0),
        Sample::new(3.0, 60.0),
        Sample::new(4.0, 35.0),
    ]
}

fn strokes(ops: &[RasterOp]) -> Vec<&linechart_rs::render::Path> {
    ops.iter()
        .filter_map(|op| match op {
            RasterOp::Stroke { path, .. } => Some(path),
            _ => None,
        })
        .collect()
}

/// Fires the oldest pending frame at `now_ms`.
fn step(chart: &mut TestChart, now_ms: f64) -> Option<linechart_rs::runtime::FrameTick> {
    chart.scheduler_mut().set_now(now_ms);
    let id = chart.scheduler_mut().fire_next().expect("pending frame");
    chart.on_frame(id, now_ms).expect("frame")
}

#[test]
fn empty_viewport_is_rejected_on_creation() {
    let result = LineChart::new(
        RecordingVectorSurface::new(),
        RecordingRasterSurface::new(),
        ManualFrameScheduler::new(),
        Viewport::new(0, 300),
        ChartConfig::default(),
    );
    assert!(matches!(
        result,
        Err(ChartError::InvalidViewport {
            width: 0,
            height: 300
        })
    ));
}

#[test]
fn animated_pass_reveals_the_line_then_places_markers() {
    let mut chart = chart();
    chart
        .set_annotations(vec![Annotation::new(2.0, 25.0, "peak")])
        .and_then(|chart| chart.set_data(series()))
        .expect("set data");

    assert!(chart.is_animating());
    assert_eq!(chart.scheduler().pending_count(), 1);
    assert!(strokes(chart.raster_surface().ops_since_clear()).is_empty());
    assert!(chart.markers().is_empty());

    let tick = step(&mut chart, 500.0).expect("tick");
    assert_eq!(tick.progress, 0.5);
    assert!(!tick.finished);
    let drawn = strokes(chart.raster_surface().ops_since_clear());
    assert_eq!(drawn.len(), 1);
    assert_eq!(drawn[0].commands().len(), 2);
    assert!(chart.markers().is_empty());

    let tick = step(&mut chart, 1_000.0).expect("tick");
    assert!(tick.finished);
    assert!(!chart.is_animating());
    assert_eq!(chart.scheduler().pending_count(), 0);
    assert_eq!(strokes(chart.raster_surface().ops_since_clear())[0].commands().len(), 5);
    assert_eq!(chart.markers().len(), 1);
    assert_eq!(chart.markers()[0].content, "peak");
}

#[test]
fn line_and_shadow_are_drawn_inside_one_save_restore_pair() {
    let mut chart = static_chart();
    chart.set_data(series()).expect("set data");

    let ops = chart.raster_surface().ops_since_clear();
    assert!(matches!(ops.first(), Some(RasterOp::Save)));
    assert!(matches!(ops.last(), Some(RasterOp::Restore)));
    assert!(ops.iter().any(|op| matches!(op, RasterOp::Fill { .. })));
    assert_eq!(chart.raster_surface().save_depth(), 0);
}

#[test]
fn disabled_animation_draws_the_final_frame_immediately() {
    let mut chart = static_chart();
    chart
        .set_annotations(vec![Annotation::new(1.0, 40.0, "a")])
        .and_then(|chart| chart.set_data(series()))
        .expect("set data");

    assert_eq!(chart.scheduler().requested_total(), 0);
    assert_eq!(chart.progress(), 1.0);
    assert_eq!(strokes(chart.raster_surface().ops_since_clear()).len(), 1);
    assert_eq!(chart.markers().len(), 1);
}

#[test]
fn all_layers_share_the_measured_left_edge() {
    let mut chart = static_chart();
    chart.set_data(series()).expect("set data");

    let layout = chart.axis_layout().expect("layout");
    let left = layout.context.left_margin;
    assert!(left > chart.config().margin.left);

    let grid_x = layout
        .frame
        .elements_of(ElementClass::GridLine)
        .filter_map(|element| element.as_line())
        .map(|line| line.x1)
        .next()
        .expect("grid line");
    assert_eq!(grid_x, left);

    let stroke = strokes(chart.raster_surface().ops_since_clear())[0];
    match stroke.commands()[0] {
        PathCommand::MoveTo { x, .. } => assert_eq!(x, left),
        other => panic!("unexpected first command {other:?}"),
    }
}

#[test]
fn non_finite_samples_are_rejected_and_the_series_is_kept() {
    let mut chart = static_chart();
    chart.set_data(series()).expect("set data");

    let err = chart
        .set_data(vec![Sample::new(0.0, 1.0), Sample::new(1.0, f64::NAN)])
        .expect_err("nan sample");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(chart.data(), series().as_slice());
}

#[test]
fn empty_series_clears_both_layers_without_drawing() {
    let mut chart = static_chart();
    chart.set_data(series()).expect("set data");
    chart.set_data(Vec::<Sample>::new()).expect("empty data");

    assert!(chart.axis_layout().is_none());
    assert!(chart.vector_surface().elements().is_empty());
    assert!(chart.raster_surface().ops_since_clear().is_empty());
    assert!(chart.markers().is_empty());
}

#[test]
fn restart_replaces_the_pending_frame() {
    let mut chart = chart();
    chart.set_data(series()).expect("set data");
    let first = chart.scheduler().pending()[0];

    chart.restart_animation().expect("restart");

    assert_eq!(chart.scheduler().pending_count(), 1);
    assert_eq!(chart.scheduler().cancelled_total(), 1);
    assert_eq!(chart.progress(), 0.0);
    assert!(chart.on_frame(first, 500.0).expect("frame").is_none());
}

#[test]
fn every_setter_restarts_the_reveal() {
    let mut chart = chart();
    chart.set_data(series()).expect("set data");
    step(&mut chart, 600.0).expect("tick");
    assert_eq!(chart.progress(), 0.6);

    chart
        .set_annotation_ticks(vec![AnnotationTick::new(2.0, "mid")])
        .expect("ticks");
    assert_eq!(chart.progress(), 0.0);
    assert_eq!(chart.scheduler().pending_count(), 1);
}

#[test]
fn rejected_config_patch_leaves_state_unchanged() {
    let mut chart = static_chart();
    chart.set_data(series()).expect("set data");
    let before = chart.config().clone();
    let clears = chart.vector_surface().clear_count();

    let err = chart
        .set_config(&ChartConfigPatch::new().with_tick_count(0))
        .expect_err("zero ticks");
    assert!(matches!(
        err,
        ChartError::InvalidConfig {
            field: "tick_count",
            ..
        }
    ));
    assert_eq!(chart.config(), &before);
    assert_eq!(chart.vector_surface().clear_count(), clears);
}

#[test]
fn only_simplification_patches_resimplify_the_series() {
    let mut chart = static_chart();
    chart.set_data(series()).expect("set data");
    assert_eq!(chart.simplified(), series().as_slice());

    let coarse = ChartConfigPatch::new()
        .with_simplification(SimplifyPolicy::fixed(100.0));
    chart.set_config(&coarse).expect("coarse policy");
    assert_eq!(
        chart.simplified(),
        &[Sample::new(0.0, 10.0), Sample::new(4.0, 35.0)]
    );

    chart
        .set_config(&ChartConfigPatch::new().with_tick_count(3))
        .expect("tick count");
    assert_eq!(chart.simplified().len(), 2);

    let default_policy = ChartConfigPatch::new()
        .with_simplification(SimplifyPolicy::default());
    chart.set_config(&default_policy).expect("default policy");
    assert_eq!(chart.simplified(), series().as_slice());
}

#[test]
fn smoothed_curve_is_drawn_with_cubic_segments() {
    let mut chart = static_chart();
    chart
        .set_config(&ChartConfigPatch::new().with_curve_type(CurveType::Smoothed))
        .and_then(|chart| chart.set_data(series()))
        .expect("set data");

    let stroke = strokes(chart.raster_surface().ops_since_clear())[0];
    assert!(matches!(stroke.commands()[0], PathCommand::MoveTo { .. }));
    assert!(
        stroke.commands()[1..]
            .iter()
            .all(|command| matches!(command, PathCommand::CubicTo { .. }))
    );
}

#[test]
fn hidden_shadow_skips_the_fill() {
    let mut chart = static_chart();
    chart
        .set_config(&ChartConfigPatch::new().with_show_shadow(false))
        .and_then(|chart| chart.set_data(series()))
        .expect("set data");

    assert!(
        !chart
            .raster_surface()
            .ops_since_clear()
            .iter()
            .any(|op| matches!(op, RasterOp::Fill { .. }))
    );
}

#[test]
fn annotation_ticks_are_drawn_under_the_baseline() {
    let mut chart = static_chart();
    chart
        .set_annotation_ticks(vec![
            AnnotationTick::new(2.0, "release"),
            AnnotationTick::new(f64::NAN, "skipped"),
        ])
        .and_then(|chart| chart.set_data(series()))
        .expect("set data");

    let context = chart.render_context().expect("context").clone();
    let texts: Vec<_> = chart
        .vector_surface()
        .elements()
        .iter()
        .filter(|element| element.class == ElementClass::AnnotationTick)
        .filter_map(|element| element.as_text())
        .collect();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].text, "release");
    assert_eq!(texts[0].x, context.scales.x.map(2.0));
    assert_eq!(texts[0].y, context.baseline_y + 20.0);
}

#[test]
fn toggling_animation_waits_for_the_next_pass() {
    let mut chart = static_chart();
    chart.set_data(series()).expect("set data");
    let clears = chart.vector_surface().clear_count();

    chart
        .set_enable_animation(true, Some(250.0))
        .expect("enable animation");
    assert_eq!(chart.vector_surface().clear_count(), clears);
    assert_eq!(chart.scheduler().requested_total(), 0);
    assert_eq!(chart.animation_duration_ms(), 250.0);

    chart.restart_animation().expect("restart");
    assert_eq!(chart.scheduler().pending_count(), 1);
    let tick = step(&mut chart, 250.0).expect("tick");
    assert!(tick.finished);

    assert!(chart.set_enable_animation(true, Some(-1.0)).is_err());
    assert_eq!(chart.animation_duration_ms(), 250.0);
}

#[test]
fn detach_ignores_later_frames() {
    let mut chart = chart();
    chart.set_data(series()).expect("set data");
    let pending = chart.scheduler().pending()[0];

    chart.detach();
    assert!(!chart.is_attached());
    assert_eq!(chart.scheduler().pending_count(), 0);
    assert!(chart.on_frame(pending, 500.0).expect("frame").is_none());

    chart.set_data(series()).expect("reattach");
    assert!(chart.is_attached());
    assert_eq!(chart.scheduler().pending_count(), 1);
}

#[test]
fn dropping_the_chart_cancels_the_pending_frame() {
    let mut scheduler = ManualFrameScheduler::new();
    {
        let mut chart = LineChart::new(
            RecordingVectorSurface::new(),
            RecordingRasterSurface::new(),
            &mut scheduler,
            Viewport::new(500, 300),
            ChartConfig::default(),
        )
        .expect("chart");
        chart.set_data(series()).expect("set data");
    }
    assert_eq!(scheduler.requested_total(), 1);
    assert_eq!(scheduler.pending_count(), 0);
    assert_eq!(scheduler.cancelled_total(), 1);
}

#[test]
fn resize_relayouts_against_the_new_viewport() {
    let mut chart = static_chart();
    chart.set_data(series()).expect("set data");

    chart.resize(Viewport::new(800, 400)).expect("resize");
    let context = chart.render_context().expect("context");
    assert_eq!(context.viewport, Viewport::new(800, 400));
    assert_eq!(context.plot_bounds().right, 770.0);

    chart.resize(Viewport::new(0, 0)).expect("collapse");
    assert!(chart.axis_layout().is_none());
}
