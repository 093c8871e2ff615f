use approx::assert_relative_eq;
use linechart_rs::core::{Sample, perpendicular_distance};

#[test]
fn distance_to_horizontal_line() {
    let distance = perpendicular_distance(
        Sample::new(5.0, 3.0),
        Sample::new(0.0, 0.0),
        Sample::new(10.0, 0.0),
    );
    assert_eq!(distance, 3.0);
}

#[test]
fn distance_to_vertical_line() {
    let distance = perpendicular_distance(
        Sample::new(3.0, 5.0),
        Sample::new(0.0, 0.0),
        Sample::new(0.0, 10.0),
    );
    assert_eq!(distance, 3.0);
}

#[test]
fn distance_to_diagonal_line() {
    let distance = perpendicular_distance(
        Sample::new(0.0, 0.0),
        Sample::new(0.0, 1.0),
        Sample::new(1.0, 0.0),
    );
    assert_relative_eq!(distance, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
}

#[test]
fn distance_is_measured_to_the_infinite_line() {
    // Beyond the segment end, still measured perpendicular to the line.
    let distance = perpendicular_distance(
        Sample::new(20.0, 4.0),
        Sample::new(0.0, 0.0),
        Sample::new(10.0, 0.0),
    );
    assert_eq!(distance, 4.0);
}

#[test]
fn coincident_endpoints_fall_back_to_horizontal_distance() {
    let distance = perpendicular_distance(
        Sample::new(7.0, 100.0),
        Sample::new(2.0, 2.0),
        Sample::new(2.0, 2.0),
    );
    assert_eq!(distance, 5.0);
}
