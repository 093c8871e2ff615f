use linechart_rs::api::ChartConfigPatch;
use linechart_rs::core::{Sample, Viewport};
use linechart_rs::render::{RecordingRasterSurface, RecordingVectorSurface};
use linechart_rs::runtime::{ManualFrameScheduler, ResizeDebouncer};
use linechart_rs::{ChartConfig, LineChart};

#[test]
fn debouncer_hands_out_the_latest_size_once() {
    let mut debouncer = ResizeDebouncer::new(200.0);
    debouncer.notify(Viewport::new(400, 300), 0.0);
    debouncer.notify(Viewport::new(420, 300), 50.0);
    debouncer.notify(Viewport::new(640, 360), 100.0);

    assert_eq!(debouncer.deadline_ms(), Some(300.0));
    assert_eq!(debouncer.poll(250.0), None);
    assert_eq!(debouncer.poll(300.0), Some(Viewport::new(640, 360)));
    assert_eq!(debouncer.poll(400.0), None);
    assert!(!debouncer.is_pending());
}

#[test]
fn invalid_delays_fall_back_to_zero() {
    let mut debouncer = ResizeDebouncer::new(f64::NAN);
    assert_eq!(debouncer.delay_ms(), 0.0);
    debouncer.set_delay_ms(-5.0);
    assert_eq!(debouncer.delay_ms(), 0.0);

    debouncer.notify(Viewport::new(10, 10), 7.0);
    assert_eq!(debouncer.poll(7.0), Some(Viewport::new(10, 10)));
}

#[test]
fn resize_burst_produces_a_single_relayout() {
    let mut chart = LineChart::new(
        RecordingVectorSurface::new(),
        RecordingRasterSurface::new(),
        ManualFrameScheduler::new(),
        Viewport::new(400, 300),
        ChartConfig {
            enable_animation: false,
            ..ChartConfig::default()
        },
    )
    .expect("chart");
    chart
        .set_data(vec![Sample::new(0.0, 1.0), Sample::new(1.0, 3.0)])
        .expect("set data");
    let clears = chart.vector_surface().clear_count();

    for (now_ms, width) in [(0.0, 420), (50.0, 500), (100.0, 640)] {
        chart.scheduler_mut().set_now(now_ms);
        chart.notify_resize(Viewport::new(width, 360));
    }
    assert!(chart.has_pending_resize());

    chart.scheduler_mut().set_now(250.0);
    assert!(!chart.poll_resize().expect("poll"));
    assert_eq!(chart.viewport(), Viewport::new(400, 300));

    chart.scheduler_mut().set_now(300.0);
    assert!(chart.poll_resize().expect("poll"));
    assert_eq!(chart.viewport(), Viewport::new(640, 360));
    assert_eq!(chart.vector_surface().clear_count(), clears + 1);
    assert!(!chart.has_pending_resize());

    chart.scheduler_mut().set_now(1_000.0);
    assert!(!chart.poll_resize().expect("poll"));
    assert_eq!(chart.vector_surface().clear_count(), clears + 1);
}

#[test]
fn debounce_delay_follows_the_config() {
    let mut chart = LineChart::new(
        RecordingVectorSurface::new(),
        RecordingRasterSurface::new(),
        ManualFrameScheduler::new(),
        Viewport::new(400, 300),
        ChartConfig::default(),
    )
    .expect("chart");
    chart
        .set_config(&ChartConfigPatch {
            resize_debounce_ms: Some(50.0),
            ..ChartConfigPatch::default()
        })
        .expect("config");

    chart.notify_resize(Viewport::new(300, 200));
    chart.scheduler_mut().set_now(50.0);
    assert!(chart.poll_resize().expect("poll"));
    assert_eq!(chart.viewport(), Viewport::new(300, 200));
}

#[test]
fn detach_drops_a_pending_resize() {
    let mut chart = LineChart::new(
        RecordingVectorSurface::new(),
        RecordingRasterSurface::new(),
        ManualFrameScheduler::new(),
        Viewport::new(400, 300),
        ChartConfig::default(),
    )
    .expect("chart");
    chart.notify_resize(Viewport::new(300, 200));
    chart.detach();

    chart.scheduler_mut().set_now(1_000.0);
    assert!(!chart.poll_resize().expect("poll"));
    assert_eq!(chart.viewport(), Viewport::new(400, 300));
}
