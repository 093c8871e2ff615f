use crate::core::Sample;

/// Distance from `point` to the infinite line through `line_start` and `line_end`.
///
/// A vertical line (`line_start.x == line_end.x`) is handled separately so
/// the slope is never divided by zero. Coincident endpoints fall into that
/// branch as well and yield the horizontal distance.
#[must_use]
pub fn perpendicular_distance(point: Sample, line_start: Sample, line_end: Sample) -> f64 {
    if line_start.x == line_end.x {
        return (point.x - line_start.x).abs();
    }

    let slope = (line_end.y - line_start.y) / (line_end.x - line_start.x);
    let intercept = line_start.y - slope * line_start.x;

    // a*x + b*y + c = 0 with b = 1
    let a = -slope;
    let b = 1.0;
    let c = -intercept;

    (a * point.x + b * point.y + c).abs() / (a * a + b * b).sqrt()
}
