//! linechart-rs: animated time-series line chart core.
//!
//! The crate turns an ordered series of samples into a simplified, animated
//! line with measured axis labels and annotation overlays. Drawing and frame
//! timing are delegated to host surfaces through the traits in [`render`]
//! and [`runtime`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod runtime;
pub mod telemetry;

pub use api::{ChartConfig, ChartConfigPatch, LineChart};
pub use error::{ChartError, ChartResult};
