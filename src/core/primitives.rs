use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::core::Sample;
use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Returns `(min, max)` of `values`, or `None` for an empty iterator.
///
/// Non-finite values are skipped.
pub fn finite_extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

#[must_use]
pub fn x_extent(samples: &[Sample]) -> Option<(f64, f64)> {
    finite_extent(samples.iter().map(|sample| sample.x))
}

#[must_use]
pub fn y_extent(samples: &[Sample]) -> Option<(f64, f64)> {
    finite_extent(samples.iter().map(|sample| sample.y))
}
