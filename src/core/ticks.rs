//! Nice tick generation on 1/2/5 x 10^k increments.

use smallvec::SmallVec;

/// Tick values for one axis. Axes rarely carry more than a dozen ticks.
pub type TickValues = SmallVec<[f64; 12]>;

// Thresholds between the 1/2/5/10 step factors (sqrt(50), sqrt(10), sqrt(2)).
const E10: f64 = 7.0710678118654755;
const E5: f64 = 3.1622776601683795;
const E2: f64 = 1.4142135623730951;

/// Rounds half-way cases towards positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Returns `(first index, last index, increment)` for ticks inside `[start, stop]`.
///
/// A negative increment means the tick value is `index / -increment`, which
/// keeps sub-unit steps exact in decimal.
fn tick_increment_range(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * inc);
        i2 = round_half_up(stop * inc);
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        i1 = round_half_up(start / inc);
        i2 = round_half_up(stop / inc);
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        increment = inc;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_increment_range(start, stop, count * 2.0);
    }
    (i1, i2, increment)
}

/// Generates roughly `count` human-friendly ticks covering `[start, stop]`.
///
/// Ticks are returned in ascending order for an ascending domain and in
/// descending order for a reversed one. A degenerate domain yields the single
/// domain value; a zero count or non-finite bound yields no ticks.
#[must_use]
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> TickValues {
    let mut ticks = TickValues::new();
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return ticks;
    }
    if start == stop {
        ticks.push(start);
        return ticks;
    }

    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, increment) = tick_increment_range(low, high, count as f64);
    if !(i2 >= i1) {
        return ticks;
    }

    let n = (i2 - i1) as usize + 1;
    for offset in 0..n {
        let index = i1 + offset as f64;
        let value = if increment < 0.0 {
            index / -increment
        } else {
            index * increment
        };
        ticks.push(value);
    }
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Lower domain bound that puts the baseline one tick step below the data.
///
/// Returns `Some(ticks[0] - (ticks[1] - ticks[0]))` when the smallest tick is
/// strictly above `data_min`. Requires at least two ticks; `ticks` may be in
/// any order.
#[must_use]
pub fn extend_domain_floor(ticks: &[f64], data_min: f64) -> Option<f64> {
    if ticks.len() < 2 {
        return None;
    }

    let mut sorted: TickValues = ticks.iter().copied().collect();
    sorted.sort_by(f64::total_cmp);
    if sorted[0] > data_min {
        let step = sorted[1] - sorted[0];
        Some(sorted[0] - step)
    } else {
        None
    }
}
