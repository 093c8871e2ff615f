use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Highest precision tried when resolving label collisions.
pub const MAX_LABEL_DECIMALS: usize = 6;

const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelFormatOptions {
    /// Groups the integer part in 3-digit clusters with `,`.
    pub thousands_separator: bool,
}

/// Batch-formatted tick labels in tick order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLabels {
    pub labels: IndexMap<OrderedFloat<f64>, String>,
    /// Precision shared by every label.
    pub decimals: usize,
}

impl TickLabels {
    #[must_use]
    pub fn get(&self, tick: f64) -> Option<&str> {
        self.labels.get(&OrderedFloat(tick)).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &str)> {
        self.labels
            .iter()
            .map(|(tick, label)| (tick.into_inner(), label.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Formats axis ticks with the smallest shared precision that keeps labels
/// distinct.
///
/// Precision starts at 0 and grows while two ticks share a label, up to
/// [`MAX_LABEL_DECIMALS`]; past that the last attempt is kept as is.
#[must_use]
pub fn format_tick_labels(ticks: &[f64], options: LabelFormatOptions) -> TickLabels {
    let mut decimals = 0;
    let mut rendered = render_batch(ticks, decimals, options);
    while decimals < MAX_LABEL_DECIMALS && has_collision(&rendered) {
        decimals += 1;
        rendered = render_batch(ticks, decimals, options);
    }

    TickLabels {
        labels: ticks
            .iter()
            .map(|tick| OrderedFloat(*tick))
            .zip(rendered)
            .collect(),
        decimals,
    }
}

/// Formats one value with K/M suffixing.
///
/// `None` renders the shortest natural representation, `Some(d)` renders
/// exactly `d` decimals.
#[must_use]
pub fn format_single(value: f64, decimals: Option<usize>) -> String {
    format_single_with(value, decimals, LabelFormatOptions::default())
}

#[must_use]
pub fn format_single_with(
    value: f64,
    decimals: Option<usize>,
    options: LabelFormatOptions,
) -> String {
    let (scaled, suffix) = split_suffix(value);
    let text = match decimals {
        Some(decimals) => format_fixed(scaled, decimals),
        None => format_natural(scaled),
    };
    finish(text, suffix, options)
}

fn render_batch(ticks: &[f64], decimals: usize, options: LabelFormatOptions) -> Vec<String> {
    ticks
        .iter()
        .map(|tick| {
            let (scaled, suffix) = split_suffix(*tick);
            let text = if suffix.is_empty() && decimals == 0 {
                format_natural(scaled)
            } else {
                format_fixed(scaled, decimals)
            };
            finish(text, suffix, options)
        })
        .collect()
}

fn has_collision(labels: &[String]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(labels.len());
    labels.iter().any(|label| !seen.insert(label.as_str()))
}

fn split_suffix(value: f64) -> (f64, &'static str) {
    let magnitude = value.abs();
    if magnitude >= MILLION {
        (value / MILLION, "M")
    } else if magnitude >= THOUSAND {
        (value / THOUSAND, "K")
    } else {
        (value, "")
    }
}

/// Fixed-point rendering with half-way cases rounded away from zero
/// (`2.5 -> "3"`, `-0.125 -> "-0.13"`), judged on the exact binary value.
///
/// Values outside the decimal range fall back to the float formatter.
fn format_fixed(value: f64, decimals: usize) -> String {
    let text = match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let dp = u32::try_from(decimals).unwrap_or(u32::MAX);
            let rounded = exact.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.decimals$}")
        }
        None => format!("{value:.decimals$}"),
    };
    normalize_negative_zero(text)
}

fn format_natural(value: f64) -> String {
    normalize_negative_zero(value.to_string())
}

fn normalize_negative_zero(text: String) -> String {
    let is_negative_zero = text
        .strip_prefix('-')
        .is_some_and(|rest| rest.chars().all(|ch| ch == '0' || ch == '.'));
    if is_negative_zero {
        text[1..].to_owned()
    } else {
        text
    }
}

fn finish(text: String, suffix: &str, options: LabelFormatOptions) -> String {
    let mut text = if options.thousands_separator {
        group_thousands(&text)
    } else {
        text
    };
    text.push_str(suffix);
    text
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    if !integer.chars().all(|ch| ch.is_ascii_digit()) {
        return text.to_owned();
    }

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
