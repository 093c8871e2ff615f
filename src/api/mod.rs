mod animation_controller;
mod axis_layout;
mod chart_config;
mod data_controller;
mod label_format;
mod line_chart;
mod render_coordinator;
mod resize_controller;

pub use axis_layout::{
    ANNOTATION_TICK_OFFSET_PX, AxisLayout, AxisLayoutEngine, AxisLayoutInputs, GRID_DASH,
    GRID_STROKE_WIDTH_PX, LABEL_GAP_PX, Y_LABEL_DY_EM,
};
pub use chart_config::{
    AxisLayoutMode, ChartConfig, ChartConfigPatch, MAX_TICK_COUNT, MarginsPatch,
    MarkerPlacementMode,
};
pub use label_format::{
    LabelFormatOptions, MAX_LABEL_DECIMALS, TickLabels, format_single, format_single_with,
    format_tick_labels,
};
pub use line_chart::LineChart;
