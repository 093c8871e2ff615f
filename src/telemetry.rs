//! Tracing setup for applications embedding `linechart-rs`.
//!
//! The chart only emits `tracing` events (layout decisions at `debug`,
//! per-frame progress at `trace`); installing a subscriber is left to the
//! host. The helpers here are for tools and demos.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "linechart_rs=info";

/// Installs a compact subscriber filtered by `RUST_LOG`, or [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback filter,
/// e.g. `"linechart_rs=trace"` to log every animation frame.
#[must_use]
pub fn init_tracing(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
