use linechart_rs::runtime::{AnimationDriver, FrameRequestId, ManualFrameScheduler};

fn fire(scheduler: &mut ManualFrameScheduler) -> FrameRequestId {
    scheduler.fire_next().expect("pending frame")
}

#[test]
fn progress_follows_elapsed_time_and_finishes_once() {
    let mut scheduler = ManualFrameScheduler::new();
    scheduler.set_now(1_000.0);
    let mut driver = AnimationDriver::new();
    driver.start(&mut scheduler, 1_000.0);
    assert_eq!(scheduler.pending_count(), 1);
    assert_eq!(driver.progress(), 0.0);

    let id = fire(&mut scheduler);
    let tick = driver.on_frame(&mut scheduler, id, 1_250.0).expect("tick");
    assert_eq!(tick.progress, 0.25);
    assert!(!tick.finished);
    assert_eq!(scheduler.pending_count(), 1);

    let id = fire(&mut scheduler);
    let tick = driver.on_frame(&mut scheduler, id, 2_500.0).expect("tick");
    assert_eq!(tick.progress, 1.0);
    assert!(tick.finished);
    assert_eq!(scheduler.pending_count(), 0);
    assert!(!driver.is_running());

    assert!(driver.on_frame(&mut scheduler, id, 3_000.0).is_none());
    assert_eq!(driver.progress(), 1.0);
}

#[test]
fn progress_never_decreases_within_a_run() {
    let mut scheduler = ManualFrameScheduler::new();
    let mut driver = AnimationDriver::new();
    driver.start(&mut scheduler, 1_000.0);

    let mut last = 0.0;
    for now in [400.0, 300.0, 600.0, 100.0, 999.0] {
        let id = fire(&mut scheduler);
        let tick = driver.on_frame(&mut scheduler, id, now).expect("tick");
        assert!(tick.progress >= last);
        last = tick.progress;
    }
    assert_eq!(last, 0.999);
}

#[test]
fn restarting_leaves_exactly_one_pending_frame() {
    let mut scheduler = ManualFrameScheduler::new();
    let mut driver = AnimationDriver::new();

    driver.start(&mut scheduler, 1_000.0);
    let first = scheduler.pending()[0];
    driver.start(&mut scheduler, 1_000.0);

    assert_eq!(scheduler.pending_count(), 1);
    assert_eq!(scheduler.cancelled_total(), 1);
    assert_ne!(scheduler.pending()[0], first);
    assert_eq!(driver.pending_frame(), Some(scheduler.pending()[0]));

    assert!(driver.on_frame(&mut scheduler, first, 500.0).is_none());
    assert_eq!(driver.progress(), 0.0);
}

#[test]
fn restart_resets_progress() {
    let mut scheduler = ManualFrameScheduler::new();
    let mut driver = AnimationDriver::new();
    driver.start(&mut scheduler, 100.0);
    let id = fire(&mut scheduler);
    driver.on_frame(&mut scheduler, id, 50.0).expect("tick");
    assert_eq!(driver.progress(), 0.5);

    driver.start(&mut scheduler, 100.0);
    assert_eq!(driver.progress(), 0.0);
}

#[test]
fn zero_duration_finishes_on_first_frame() {
    let mut scheduler = ManualFrameScheduler::new();
    let mut driver = AnimationDriver::new();
    driver.start(&mut scheduler, 0.0);

    let id = fire(&mut scheduler);
    let tick = driver.on_frame(&mut scheduler, id, 0.0).expect("tick");
    assert_eq!(tick.progress, 1.0);
    assert!(tick.finished);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn cancel_releases_the_pending_frame() {
    let mut scheduler = ManualFrameScheduler::new();
    let mut driver = AnimationDriver::new();
    driver.start(&mut scheduler, 1_000.0);
    driver.cancel(&mut scheduler);

    assert_eq!(scheduler.pending_count(), 0);
    assert!(!driver.is_running());
    assert_eq!(driver.pending_frame(), None);
}

#[test]
fn complete_jumps_to_full_progress_without_frames() {
    let mut scheduler = ManualFrameScheduler::new();
    let mut driver = AnimationDriver::new();
    driver.start(&mut scheduler, 1_000.0);
    driver.complete(&mut scheduler);

    assert_eq!(driver.progress(), 1.0);
    assert_eq!(scheduler.pending_count(), 0);
    assert_eq!(scheduler.requested_total(), 1);
}
