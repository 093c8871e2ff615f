//! Ramer-Douglas-Peucker curve simplification and the policy deciding when
//! and how aggressively to apply it.

use serde::{Deserialize, Serialize};

use crate::core::Sample;
use crate::core::geometry::perpendicular_distance;
use crate::core::primitives::y_extent;

/// Reduces `points` to a visually equivalent subsequence.
///
/// A point survives when it deviates from the chord of its enclosing range by
/// more than `epsilon`. The first and last points always survive and the
/// relative order is never changed. Inputs with two or fewer points are
/// returned as-is.
///
/// The result is identical to the classic recursive formulation; ranges are
/// processed from an explicit stack so long monotone inputs cannot exhaust
/// the call stack.
#[must_use]
pub fn simplify(points: &[Sample], epsilon: f64) -> Vec<Sample> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let epsilon = if epsilon.is_finite() {
        epsilon.max(0.0)
    } else {
        0.0
    };

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut ranges = vec![(0usize, last)];
    while let Some((start, end)) = ranges.pop() {
        if end - start < 2 {
            continue;
        }

        let (max_distance, max_index) = farthest_from_chord(&points[start..=end]);
        if max_distance > epsilon {
            let split = start + max_index;
            keep[split] = true;
            ranges.push((split, end));
            ranges.push((start, split));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect()
}

/// First interior point with the largest distance from the first-last chord.
///
/// Returns `(0.0, 0)` when no interior point has a positive distance.
fn farthest_from_chord(points: &[Sample]) -> (f64, usize) {
    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_distance = 0.0;
    let mut max_index = 0;
    for (index, point) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let distance = perpendicular_distance(*point, first, last);
        if distance > max_distance {
            max_distance = distance;
            max_index = index;
        }
    }

    (max_distance, max_index)
}

/// Tolerance selection used by [`SimplifyPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EpsilonPolicy {
    /// One tolerance for every data set, in data units.
    Fixed { epsilon: f64 },
    /// `min(max, y_range * ratio)`, or `small_data_fallback` for data sets
    /// below the policy's `min_points`.
    RangeProportional {
        ratio: f64,
        max: f64,
        small_data_fallback: f64,
    },
}

impl Default for EpsilonPolicy {
    fn default() -> Self {
        Self::RangeProportional {
            ratio: 0.01,
            max: 10.0,
            small_data_fallback: 0.1,
        }
    }
}

/// Decides whether a data set is simplified and with which tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimplifyPolicy {
    /// Data sets with fewer points are drawn unsimplified. `0` disables the guard.
    pub min_points: usize,
    pub epsilon: EpsilonPolicy,
}

impl Default for SimplifyPolicy {
    fn default() -> Self {
        Self {
            min_points: 70,
            epsilon: EpsilonPolicy::default(),
        }
    }
}

impl SimplifyPolicy {
    #[must_use]
    pub fn new(min_points: usize, epsilon: EpsilonPolicy) -> Self {
        Self {
            min_points,
            epsilon,
        }
    }

    #[must_use]
    pub fn fixed(epsilon: f64) -> Self {
        Self::new(0, EpsilonPolicy::Fixed { epsilon })
    }

    #[must_use]
    pub fn is_below_threshold(self, points: &[Sample]) -> bool {
        points.len() < self.min_points
    }

    /// Tolerance this policy would use for `points`.
    #[must_use]
    pub fn select_epsilon(self, points: &[Sample]) -> f64 {
        match self.epsilon {
            EpsilonPolicy::Fixed { epsilon } => epsilon,
            EpsilonPolicy::RangeProportional {
                ratio,
                max,
                small_data_fallback,
            } => {
                if self.is_below_threshold(points) {
                    return small_data_fallback;
                }
                let y_range = y_extent(points).map_or(0.0, |(min, max)| max - min);
                max.min(y_range * ratio)
            }
        }
    }

    /// Simplifies `points`, or copies them when they are below `min_points`.
    #[must_use]
    pub fn apply(self, points: &[Sample]) -> Vec<Sample> {
        if self.is_below_threshold(points) {
            return points.to_vec();
        }
        simplify(points, self.select_epsilon(points))
    }
}
