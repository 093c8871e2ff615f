use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{EpsilonPolicy, Margins, SimplifyPolicy};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, CurveType, LineStyle};

use super::LabelFormatOptions;

/// Largest accepted `tick_count`; tick generation allocates one entry per tick.
pub const MAX_TICK_COUNT: usize = 100;

/// How the left margin and y labels are derived each pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisLayoutMode {
    /// Measured label widths widen the left margin; the y domain may be
    /// extended below the data minimum; labels are batch formatted.
    #[default]
    DynamicMargin,
    /// Configured left margin, no domain extension, single-value labels.
    FixedMargin,
}

/// How annotation overlays are positioned around their anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPlacementMode {
    /// Kept inside the right plot edge; flipped above points near the baseline.
    #[default]
    BoundaryAware,
    /// Centered on the anchor point.
    Centered,
}

/// Visual and behavioral options of a [`super::LineChart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub line_color: Color,
    pub line_width_px: f64,
    pub show_shadow: bool,
    pub grid_color: Color,
    pub enable_animation: bool,
    pub animation_duration_ms: f64,
    pub axis_text_color: Color,
    pub axis_font_size_px: f64,
    pub curve_type: CurveType,
    pub tick_count: usize,
    /// Fixed y label precision; `None` lets the batch formatter choose.
    pub label_decimals: Option<usize>,
    pub thousands_separator: bool,
    pub margin: Margins,
    pub layout_mode: AxisLayoutMode,
    pub marker_placement: MarkerPlacementMode,
    pub simplification: SimplifyPolicy,
    pub resize_debounce_ms: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            line_color: Color::rgb8(0x34, 0x98, 0xdb),
            line_width_px: 2.0,
            show_shadow: true,
            grid_color: Color::rgb8(0xe0, 0xe0, 0xe0),
            enable_animation: true,
            animation_duration_ms: 1_000.0,
            axis_text_color: Color::rgb8(0x33, 0x33, 0x33),
            axis_font_size_px: 12.0,
            curve_type: CurveType::Linear,
            tick_count: 5,
            label_decimals: None,
            thousands_separator: false,
            margin: Margins::default(),
            layout_mode: AxisLayoutMode::DynamicMargin,
            marker_placement: MarkerPlacementMode::BoundaryAware,
            simplification: SimplifyPolicy::default(),
            resize_debounce_ms: 200.0,
        }
    }
}

impl ChartConfig {
    /// Returns a copy with `patch` applied, or the first validation error.
    pub fn merged(&self, patch: &ChartConfigPatch) -> ChartResult<Self> {
        let mut next = self.clone();
        patch.apply_to(&mut next);
        next.validate()?;
        Ok(next)
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (field, color) in [
            ("line_color", self.line_color),
            ("grid_color", self.grid_color),
            ("axis_text_color", self.axis_text_color),
        ] {
            color
                .validate()
                .map_err(|err| ChartError::invalid_config(field, err.to_string()))?;
        }

        positive("line_width_px", self.line_width_px)?;
        positive("axis_font_size_px", self.axis_font_size_px)?;
        non_negative("animation_duration_ms", self.animation_duration_ms)?;
        non_negative("resize_debounce_ms", self.resize_debounce_ms)?;

        if self.tick_count == 0 {
            return Err(ChartError::invalid_config("tick_count", "must be > 0"));
        }
        if self.tick_count > MAX_TICK_COUNT {
            return Err(ChartError::invalid_config(
                "tick_count",
                format!("must be <= {MAX_TICK_COUNT}, got {}", self.tick_count),
            ));
        }
        if let Some(decimals) = self.label_decimals.filter(|decimals| *decimals > 20) {
            return Err(ChartError::invalid_config(
                "label_decimals",
                format!("must be <= 20, got {decimals}"),
            ));
        }

        for (name, value) in [
            ("margin.top", self.margin.top),
            ("margin.right", self.margin.right),
            ("margin.bottom", self.margin.bottom),
            ("margin.left", self.margin.left),
        ] {
            non_negative(name, value)?;
        }

        match self.simplification.epsilon {
            EpsilonPolicy::Fixed { epsilon } => {
                non_negative("simplification.epsilon", epsilon)?;
            }
            EpsilonPolicy::RangeProportional {
                ratio,
                max,
                small_data_fallback,
            } => {
                non_negative("simplification.epsilon.ratio", ratio)?;
                non_negative("simplification.epsilon.max", max)?;
                non_negative(
                    "simplification.epsilon.small_data_fallback",
                    small_data_fallback,
                )?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn label_options(&self) -> LabelFormatOptions {
        LabelFormatOptions {
            thousands_separator: self.thousands_separator,
        }
    }

    #[must_use]
    pub fn line_style(&self) -> LineStyle {
        LineStyle {
            color: self.line_color,
            width_px: self.line_width_px,
            curve: self.curve_type,
            show_shadow: self.show_shadow,
        }
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates a full config; missing fields take defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn positive(field: &'static str, value: f64) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChartError::invalid_config(
            field,
            format!("must be finite and > 0, got {value}"),
        ))
    }
}

fn non_negative(field: &'static str, value: f64) -> ChartResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::invalid_config(
            field,
            format!("must be finite and >= 0, got {value}"),
        ))
    }
}

/// Per-side margin override; absent sides keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginsPatch {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl MarginsPatch {
    fn apply_to(&self, margins: &mut Margins) {
        if let Some(top) = self.top {
            margins.top = top;
        }
        if let Some(right) = self.right {
            margins.right = right;
        }
        if let Some(bottom) = self.bottom {
            margins.bottom = bottom;
        }
        if let Some(left) = self.left {
            margins.left = left;
        }
    }
}

/// Partial config update.
///
/// Every present field replaces the current value; `margin` merges per side.
/// `label_decimals: null` in JSON resets to batch precision, while an absent
/// key leaves it unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfigPatch {
    pub line_color: Option<Color>,
    pub line_width_px: Option<f64>,
    pub show_shadow: Option<bool>,
    pub grid_color: Option<Color>,
    pub enable_animation: Option<bool>,
    pub animation_duration_ms: Option<f64>,
    pub axis_text_color: Option<Color>,
    pub axis_font_size_px: Option<f64>,
    pub curve_type: Option<CurveType>,
    pub tick_count: Option<usize>,
    #[serde(
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub label_decimals: Option<Option<usize>>,
    pub thousands_separator: Option<bool>,
    pub margin: Option<MarginsPatch>,
    pub layout_mode: Option<AxisLayoutMode>,
    pub marker_placement: Option<MarkerPlacementMode>,
    pub simplification: Option<SimplifyPolicy>,
    pub resize_debounce_ms: Option<f64>,
}

impl ChartConfigPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config patch: {e}")))
    }

    #[must_use]
    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_curve_type(mut self, curve: CurveType) -> Self {
        self.curve_type = Some(curve);
        self
    }

    #[must_use]
    pub fn with_show_shadow(mut self, show: bool) -> Self {
        self.show_shadow = Some(show);
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = Some(tick_count);
        self
    }

    #[must_use]
    pub fn with_label_decimals(mut self, decimals: Option<usize>) -> Self {
        self.label_decimals = Some(decimals);
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: MarginsPatch) -> Self {
        self.margin = Some(margin);
        self
    }

    #[must_use]
    pub fn with_layout_mode(mut self, mode: AxisLayoutMode) -> Self {
        self.layout_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_marker_placement(mut self, mode: MarkerPlacementMode) -> Self {
        self.marker_placement = Some(mode);
        self
    }

    #[must_use]
    pub fn with_simplification(mut self, policy: SimplifyPolicy) -> Self {
        self.simplification = Some(policy);
        self
    }

    /// Whether this patch carries a simplification policy. Only such patches
    /// can change the simplified point set.
    #[must_use]
    pub fn touches_simplification(&self) -> bool {
        self.simplification.is_some()
    }

    fn apply_to(&self, config: &mut ChartConfig) {
        if let Some(color) = self.line_color {
            config.line_color = color;
        }
        if let Some(width) = self.line_width_px {
            config.line_width_px = width;
        }
        if let Some(show) = self.show_shadow {
            config.show_shadow = show;
        }
        if let Some(color) = self.grid_color {
            config.grid_color = color;
        }
        if let Some(enable) = self.enable_animation {
            config.enable_animation = enable;
        }
        if let Some(duration) = self.animation_duration_ms {
            config.animation_duration_ms = duration;
        }
        if let Some(color) = self.axis_text_color {
            config.axis_text_color = color;
        }
        if let Some(size) = self.axis_font_size_px {
            config.axis_font_size_px = size;
        }
        if let Some(curve) = self.curve_type {
            config.curve_type = curve;
        }
        if let Some(tick_count) = self.tick_count {
            config.tick_count = tick_count;
        }
        if let Some(decimals) = self.label_decimals {
            config.label_decimals = decimals;
        }
        if let Some(separator) = self.thousands_separator {
            config.thousands_separator = separator;
        }
        if let Some(margin) = &self.margin {
            margin.apply_to(&mut config.margin);
        }
        if let Some(mode) = self.layout_mode {
            config.layout_mode = mode;
        }
        if let Some(mode) = self.marker_placement {
            config.marker_placement = mode;
        }
        if let Some(policy) = self.simplification {
            config.simplification = policy;
        }
        if let Some(delay) = self.resize_debounce_ms {
            config.resize_debounce_ms = delay;
        }
    }
}

/// Maps a present key (including `null`) to `Some`, so absent and `null`
/// stay distinguishable.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
